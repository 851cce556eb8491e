//! Package-folder verification.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::analyzer::{Architecture, BinaryAnalyzer, BinaryFormat, BinaryInfo};
use crate::error::{io_err, LintError};
use crate::target::Verifier;

/// One recognised binary in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the package folder.
    pub path: PathBuf,
    pub info: BinaryInfo,
    pub sha256: String,
}

/// A platform mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    FormatMismatch {
        path: PathBuf,
        found: BinaryFormat,
        expected: BinaryFormat,
        os: String,
    },
    ArchMismatch {
        path: PathBuf,
        found: Vec<Architecture>,
        expected: Architecture,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::FormatMismatch {
                path,
                found,
                expected,
                os,
            } => write!(
                f,
                "{} is {found} but binaries for os {os} must be {expected}",
                path.display()
            ),
            Finding::ArchMismatch {
                path,
                found,
                expected,
            } => {
                let found: Vec<String> = found.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{} targets {} but arch setting expects {expected}",
                    path.display(),
                    found.join(", ")
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub artifacts: Vec<Artifact>,
    pub findings: Vec<Finding>,
}

/// Checks every binary under a package folder against one [`Verifier`].
pub struct BinaryLinter<'a> {
    analyzer: &'a dyn BinaryAnalyzer,
    verifier: Verifier,
    expected_arch: Option<Architecture>,
}

impl<'a> BinaryLinter<'a> {
    pub fn new(
        analyzer: &'a dyn BinaryAnalyzer,
        verifier: Verifier,
        expected_arch: Option<Architecture>,
    ) -> Self {
        Self {
            analyzer,
            verifier,
            expected_arch,
        }
    }

    /// Walk `package_folder` in file-name order and lint every binary.
    pub fn verify(&self, package_folder: &Path) -> Result<LintReport, LintError> {
        let mut report = LintReport::default();

        for entry in WalkDir::new(package_folder).sort_by_file_name() {
            let entry = entry.map_err(|source| LintError::Walk {
                path: package_folder.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let bytes = fs::read(path).map_err(|e| io_err(path, e))?;
            let Some(info) = self.analyzer.analyze(&bytes) else {
                continue;
            };
            let relative = path
                .strip_prefix(package_folder)
                .unwrap_or(path)
                .to_path_buf();
            tracing::debug!(path = %relative.display(), %info, "binary artifact");

            report.findings.extend(self.check(&relative, &info));
            report.artifacts.push(Artifact {
                sha256: hex::encode(Sha256::digest(&bytes)),
                path: relative,
                info,
            });
        }

        Ok(report)
    }

    fn check(&self, path: &Path, info: &BinaryInfo) -> Vec<Finding> {
        if info.format != self.verifier.format {
            // Machine types are meaningless across formats.
            return vec![Finding::FormatMismatch {
                path: path.to_path_buf(),
                found: info.format,
                expected: self.verifier.format,
                os: self.verifier.os.clone(),
            }];
        }
        match self.expected_arch {
            Some(expected) if !info.architectures.contains(&expected) => {
                vec![Finding::ArchMismatch {
                    path: path.to_path_buf(),
                    found: info.architectures.clone(),
                    expected,
                }]
            }
            _ => Vec::new(),
        }
    }
}
