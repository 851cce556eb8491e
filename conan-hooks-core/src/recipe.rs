//! Recipe attributes and the seam through which hooks obtain them.
//!
//! Hooks never parse recipes themselves. They ask a [`RecipeInspector`],
//! which either delegates to the package manager (`conan inspect`) or reads
//! an exported attribute document.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::InspectError;

// ---------------------------------------------------------------------------
// RecipeAttributes
// ---------------------------------------------------------------------------

/// A recipe's `license` attribute: a single SPDX id or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    One(String),
    Many(Vec<String>),
}

impl LicenseField {
    /// Normalise to a sequence; a single string becomes a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            LicenseField::One(s) => vec![s.clone()],
            LicenseField::Many(v) => v.clone(),
        }
    }
}

/// Flat snapshot of the attributes a recipe declares.
///
/// Unknown attributes are ignored; every field may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeAttributes {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub license: Option<LicenseField>,
    pub url: Option<String>,
    pub homepage: Option<String>,
    pub author: Option<String>,
}

impl RecipeAttributes {
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn topics(&self) -> Option<&[String]> {
        self.topics.as_deref().filter(|t| !t.is_empty())
    }

    /// Declared licenses as a sequence, `None` when nothing is declared.
    pub fn licenses(&self) -> Option<Vec<String>> {
        let licenses = self.license.as_ref()?.to_vec();
        match licenses.as_slice() {
            [] => None,
            [only] if only.is_empty() => None,
            _ => Some(licenses),
        }
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    pub fn homepage(&self) -> Option<&str> {
        non_empty(self.homepage.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Inspectors
// ---------------------------------------------------------------------------

/// Obtains the declared attributes of the recipe at `path`.
pub trait RecipeInspector {
    fn inspect(&self, path: &Path) -> Result<RecipeAttributes, InspectError>;
}

/// Delegates to `conan inspect <recipe> --json <file>`.
#[derive(Debug, Clone)]
pub struct ConanInspector {
    program: String,
}

impl ConanInspector {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ConanInspector {
    fn default() -> Self {
        Self::new("conan")
    }
}

impl RecipeInspector for ConanInspector {
    fn inspect(&self, path: &Path) -> Result<RecipeAttributes, InspectError> {
        let scratch = tempfile::tempdir().map_err(|source| InspectError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
        let json_path = scratch.path().join("inspect.json");

        tracing::debug!(program = %self.program, recipe = %path.display(), "inspecting recipe");
        let output = Command::new(&self.program)
            .arg("inspect")
            .arg(path)
            .arg("--json")
            .arg(&json_path)
            .output()
            .map_err(|source| InspectError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(InspectError::Failed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&json_path).map_err(|source| InspectError::Io {
            path: json_path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|e| InspectError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Reads an exported attribute document (YAML or JSON) directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestInspector;

impl RecipeInspector for ManifestInspector {
    fn inspect(&self, path: &Path) -> Result<RecipeAttributes, InspectError> {
        let contents = std::fs::read_to_string(path).map_err(|source| InspectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: Option<RecipeAttributes> =
            serde_yaml::from_str(&contents).map_err(|e| InspectError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(parsed.unwrap_or_default())
    }
}

/// Pick the inspector for a recipe path: attribute documents are read
/// directly, anything else goes through the package manager.
pub fn inspector_for(path: &Path, conan_program: &str) -> Box<dyn RecipeInspector> {
    let is_manifest = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "yml" | "yaml" | "json"))
        .unwrap_or(false);
    if is_manifest {
        Box::new(ManifestInspector)
    } else {
        Box::new(ConanInspector::new(conan_program))
    }
}

/// Chooses an inspector per recipe path with [`inspector_for`].
#[derive(Debug, Clone)]
pub struct AutoInspector {
    conan_program: String,
}

impl AutoInspector {
    pub fn new(conan_program: impl Into<String>) -> Self {
        Self {
            conan_program: conan_program.into(),
        }
    }
}

impl Default for AutoInspector {
    fn default() -> Self {
        Self::new("conan")
    }
}

impl RecipeInspector for AutoInspector {
    fn inspect(&self, path: &Path) -> Result<RecipeAttributes, InspectError> {
        inspector_for(path, &self.conan_program).inspect(path)
    }
}
