//! Stable-branch classification.

use regex::Regex;

use crate::DetectError;

/// Patterns used when no override is configured.
pub const DEFAULT_STABLE_PATTERNS: [&str; 3] = ["master$", "release*", "stable*"];

/// Decides whether a branch publishes stable packages.
///
/// Each pattern must match at the start of the branch name; the rest of the
/// name is unconstrained unless the pattern itself anchors the end.
#[derive(Debug, Clone)]
pub struct StabilityClassifier {
    patterns: Vec<Regex>,
}

impl StabilityClassifier {
    /// Compile `override_pattern`, or the defaults when it is `None`.
    pub fn new(override_pattern: Option<&str>) -> Result<Self, DetectError> {
        let sources: Vec<&str> = match override_pattern {
            Some(pattern) => vec![pattern],
            None => DEFAULT_STABLE_PATTERNS.to_vec(),
        };
        let patterns = sources
            .into_iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})")).map_err(|source| DetectError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_stable(&self, branch: Option<&str>) -> bool {
        let Some(branch) = branch else { return false };
        self.patterns.iter().any(|p| p.is_match(branch))
    }
}
