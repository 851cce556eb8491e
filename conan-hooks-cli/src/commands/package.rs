//! `conan-hooks post-package`: a binary package was assembled.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use conan_hooks_core::{HookConfig, HookOutput, PackageEvent, PackageSettings};

use crate::build_registry;

/// Arguments for `conan-hooks post-package`.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Recipe the package was built from.
    pub recipe: PathBuf,

    /// Folder holding the packaged artifacts.
    #[arg(long, value_name = "DIR")]
    pub package_folder: PathBuf,

    /// `os` setting of the package (e.g. Linux, Windows, Macos).
    #[arg(long)]
    pub os: Option<String>,

    /// `arch` setting of the package (e.g. x86_64, armv8).
    #[arg(long)]
    pub arch: Option<String>,
}

impl PackageArgs {
    pub fn run(self, config: &HookConfig, out: &mut dyn HookOutput) -> Result<()> {
        let registry = build_registry(config, "conan");
        let event = PackageEvent {
            recipe_path: self.recipe,
            package_folder: self.package_folder,
            settings: PackageSettings {
                os: self.os,
                arch: self.arch,
            },
        };
        registry
            .run_post_package(out, &event)
            .with_context(|| format!("post_package hooks failed for {}", event.package_folder.display()))
    }
}
