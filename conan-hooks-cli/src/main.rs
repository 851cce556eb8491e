//! `conan-hooks` binary entry point.

use anyhow::{Context, Result};
use clap::Parser;

use conan_hooks_cli::{run, Cli};
use conan_hooks_core::{ConfigFile, ConsoleOutput, HookConfig};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Configuration is sourced exactly once, here.
    let mut config = HookConfig::from_env();
    if cli.config.is_none() {
        if let Some(home) = dirs::home_dir() {
            let path = ConfigFile::default_path_at(&home);
            if path.exists() {
                let file = ConfigFile::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?;
                config = config.with_file(file);
            }
        }
    }

    let mut out = ConsoleOutput::stdout();
    run(cli, config, &mut out)
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
