//! # conan-hooks-linter
//!
//! `post_package` hook that introspects every binary in a package folder and
//! warns when an artifact was built for the wrong platform.

pub mod analyzer;
pub mod error;
pub mod hook;
pub mod linter;
pub mod target;

pub use analyzer::{Architecture, BinaryAnalyzer, BinaryFormat, BinaryInfo, ObjectAnalyzer};
pub use error::LintError;
pub use hook::BinaryLinterHook;
pub use linter::{Artifact, BinaryLinter, Finding, LintReport};
pub use target::Verifier;
