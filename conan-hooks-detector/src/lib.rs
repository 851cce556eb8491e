//! Branch detection for `conan-hooks-detector`.
//!
//! [`detect_branch`] works out the branch being built from CI environment
//! variables, falling back to the local git checkout, and
//! [`StabilityClassifier`] decides whether that branch publishes stable
//! packages.

pub mod branch;
pub mod stability;

use thiserror::Error;

pub use branch::{detect_branch, parse_current_branch, BranchProbe, GitProbe, CI_BRANCH_VARIABLES};
pub use stability::{StabilityClassifier, DEFAULT_STABLE_PATTERNS};

/// Errors from branch classification.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid stable branch pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
