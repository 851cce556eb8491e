//! `conan-hooks hooks`: list registered hooks.

use anyhow::Result;

use conan_hooks_core::{HookConfig, HookOutput};

use crate::build_registry;

pub fn run(config: &HookConfig, out: &mut dyn HookOutput) -> Result<()> {
    let registry = build_registry(config, "conan");
    for name in registry.names() {
        out.info(name);
    }
    Ok(())
}
