//! Explicit registry of lifecycle hooks.

use crate::error::HookError;
use crate::hook::{HookPoint, LifecycleHook, PackageEvent, UploadRecipeEvent};
use crate::output::{HookOutput, ScopedOutput};

/// Hooks in registration order.
///
/// Dispatch only reaches hooks that declared the event's [`HookPoint`], and
/// the first hook error stops the chain.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn LifecycleHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn LifecycleHook>) {
        tracing::debug!(hook = hook.name(), "registered hook");
        self.hooks.push(hook);
    }

    /// Registered hook names, in dispatch order.
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn run_post_upload_recipe(
        &self,
        out: &mut dyn HookOutput,
        event: &UploadRecipeEvent,
    ) -> Result<(), HookError> {
        self.dispatch(out, HookPoint::PostUploadRecipe, |hook, scoped| {
            hook.post_upload_recipe(scoped, event)
        })
    }

    pub fn run_post_package(
        &self,
        out: &mut dyn HookOutput,
        event: &PackageEvent,
    ) -> Result<(), HookError> {
        self.dispatch(out, HookPoint::PostPackage, |hook, scoped| {
            hook.post_package(scoped, event)
        })
    }

    fn dispatch<F>(&self, out: &mut dyn HookOutput, point: HookPoint, mut call: F) -> Result<(), HookError>
    where
        F: FnMut(&dyn LifecycleHook, &mut dyn HookOutput) -> Result<(), HookError>,
    {
        for hook in self.hooks.iter().filter(|h| h.hook_points().contains(&point)) {
            tracing::debug!(hook = hook.name(), point = point.method_name(), "running hook");
            let mut scoped = ScopedOutput::new(&mut *out, hook.name(), point.method_name());
            if let Err(err) = call(hook.as_ref(), &mut scoped) {
                tracing::warn!(hook = hook.name(), error = %err, "hook failed");
                return Err(err);
            }
        }
        Ok(())
    }
}
