//! conan-hooks: host-side entry point for lifecycle hooks.
//!
//! # Usage
//!
//! ```text
//! conan-hooks post-upload-recipe <recipe> --reference <ref> --remote <name> --remote-url <url> [--conan <bin>]
//! conan-hooks post-package <recipe> --package-folder <dir> [--os <os>] [--arch <arch>]
//! conan-hooks hooks
//! ```
//!
//! The binary in `main.rs` only sets up tracing and configuration; everything
//! else lives here so tests can drive the CLI in-process (see [`testing`]).

pub mod commands;
pub mod testing;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use conan_hooks_bintray::BintrayUpdater;
use conan_hooks_core::{
    AutoInspector, ConfigFile, HookConfig, HookOutput, HookRegistry,
};
use conan_hooks_linter::BinaryLinterHook;

use commands::{package::PackageArgs, upload::UploadArgs};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "conan-hooks",
    version,
    about = "Run package-manager lifecycle hooks",
    long_about = None,
)]
pub struct Cli {
    /// YAML config file (defaults to ~/.conan/hooks/conan-hooks.yaml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch the post_upload_recipe event.
    PostUploadRecipe(UploadArgs),

    /// Dispatch the post_package event.
    PostPackage(PackageArgs),

    /// List registered hooks.
    Hooks,
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Register every hook this binary ships, in dispatch order.
pub fn build_registry(config: &HookConfig, conan_program: &str) -> HookRegistry {
    let mut registry = HookRegistry::new();
    registry.register(Box::new(
        BintrayUpdater::new(config.clone())
            .with_inspector(Box::new(AutoInspector::new(conan_program))),
    ));
    registry.register(Box::new(BinaryLinterHook::new()));
    registry
}

/// Run a parsed command against `config`, writing hook output to `out`.
///
/// `--config` is merged here; environment values still win over the file.
pub fn run(cli: Cli, config: HookConfig, out: &mut dyn HookOutput) -> Result<()> {
    let config = match &cli.config {
        Some(path) => config.with_file(
            ConfigFile::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
        ),
        None => config,
    };

    match cli.command {
        Commands::PostUploadRecipe(args) => args.run(&config, out),
        Commands::PostPackage(args) => args.run(&config, out),
        Commands::Hooks => commands::hooks::run(&config, out),
    }
}
