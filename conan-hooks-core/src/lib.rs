//! conan-hooks core library: domain types, configuration, hook plumbing.
//!
//! - [`types`]: package references and remotes
//! - [`config`]: [`HookConfig`], sourced once at process start
//! - [`recipe`]: recipe attributes and the inspection seam
//! - [`hook`] / [`registry`]: lifecycle hook trait and explicit registration
//! - [`output`]: the output sink hooks write to
//! - [`error`]: error enums shared by every hook crate

pub mod config;
pub mod error;
pub mod hook;
pub mod output;
pub mod recipe;
pub mod registry;
pub mod types;

pub use config::{ConfigFile, HookConfig, DEFAULT_BINTRAY_API_URL};
pub use error::{ConfigError, CoreError, HookError, InspectError};
pub use hook::{HookPoint, LifecycleHook, PackageEvent, PackageSettings, UploadRecipeEvent};
pub use output::{ConsoleOutput, HookOutput, Level, MemoryOutput, OutputRecord};
pub use recipe::{
    inspector_for, AutoInspector, ConanInspector, LicenseField, ManifestInspector, RecipeAttributes,
    RecipeInspector,
};
pub use registry::HookRegistry;
pub use types::{ConanReference, Remote};
