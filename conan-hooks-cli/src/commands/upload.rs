//! `conan-hooks post-upload-recipe`: a recipe was uploaded to a remote.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use conan_hooks_core::{ConanReference, HookConfig, HookOutput, Remote, UploadRecipeEvent};

use crate::build_registry;

/// Arguments for `conan-hooks post-upload-recipe`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Exported recipe file (conanfile.py, or a YAML/JSON attribute file).
    pub recipe: PathBuf,

    /// Uploaded reference, e.g. `zlib/1.2.11@conan/stable`.
    #[arg(long)]
    pub reference: ConanReference,

    /// Name of the remote the recipe was uploaded to.
    #[arg(long)]
    pub remote: String,

    /// URL of that remote.
    #[arg(long, value_name = "URL")]
    pub remote_url: String,

    /// Package-manager executable used for recipe inspection.
    #[arg(long, default_value = "conan", value_name = "PROGRAM")]
    pub conan: String,
}

impl UploadArgs {
    pub fn run(self, config: &HookConfig, out: &mut dyn HookOutput) -> Result<()> {
        let registry = build_registry(config, &self.conan);
        let event = UploadRecipeEvent {
            recipe_path: self.recipe,
            reference: self.reference,
            remote: Remote::new(self.remote, self.remote_url),
        };
        registry
            .run_post_upload_recipe(out, &event)
            .with_context(|| format!("post_upload_recipe hooks failed for {}", event.reference))
    }
}
