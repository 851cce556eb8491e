//! Lifecycle hook trait and the events the host dispatches.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::output::HookOutput;
use crate::types::{ConanReference, Remote};

/// Points in the package-manager lifecycle where hooks can be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// After a recipe has been uploaded to a remote.
    PostUploadRecipe,
    /// After a binary package has been assembled in its package folder.
    PostPackage,
}

impl HookPoint {
    /// Method name used in output prefixes.
    pub fn method_name(self) -> &'static str {
        match self {
            HookPoint::PostUploadRecipe => "post_upload_recipe",
            HookPoint::PostPackage => "post_package",
        }
    }
}

/// Payload of [`HookPoint::PostUploadRecipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecipeEvent {
    /// Exported recipe file in the local cache.
    pub recipe_path: PathBuf,
    pub reference: ConanReference,
    pub remote: Remote,
}

/// Settings of the binary package being produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSettings {
    pub os: Option<String>,
    pub arch: Option<String>,
}

/// Payload of [`HookPoint::PostPackage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEvent {
    pub recipe_path: PathBuf,
    /// Folder holding the packaged artifacts.
    pub package_folder: PathBuf,
    pub settings: PackageSettings,
}

/// A hook the host calls at fixed lifecycle points.
///
/// Implementors override the methods for the points listed in
/// [`hook_points`](LifecycleHook::hook_points); the rest stay no-ops.
/// Returning `Err` fails the host operation, so hooks whose work is
/// best-effort report problems through `out` and return `Ok(())`.
pub trait LifecycleHook {
    /// A unique name for this hook.
    fn name(&self) -> &str;

    /// The lifecycle points this hook should be called at.
    fn hook_points(&self) -> &[HookPoint];

    fn post_upload_recipe(
        &self,
        _out: &mut dyn HookOutput,
        _event: &UploadRecipeEvent,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn post_package(
        &self,
        _out: &mut dyn HookOutput,
        _event: &PackageEvent,
    ) -> Result<(), HookError> {
        Ok(())
    }
}
