//! `post_upload_recipe` hook: sync recipe metadata to Bintray.
//!
//! Sequence per upload:
//!
//! 1. Resolve the package endpoint from the remote URL and reference.
//! 2. GET the published package record.
//! 3. Inspect the uploaded recipe.
//! 4. Classify the current branch.
//! 5. Reconcile; PATCH only when something changed.
//!
//! Metadata sync is best-effort: any failure becomes one error line on the
//! hook output and the upload carries on.

use conan_hooks_core::{
    AutoInspector, HookConfig, HookError, HookOutput, HookPoint, LifecycleHook, RecipeInspector,
    UploadRecipeEvent,
};
use conan_hooks_detector::{detect_branch, BranchProbe, GitProbe, StabilityClassifier};

use crate::client::BintrayClient;
use crate::credentials::resolve_credentials;
use crate::endpoint::PackageEndpoint;
use crate::error::BintrayError;
use crate::reconcile::reconcile;
use crate::record::PackageUpdate;

/// Updates Bintray package info after a recipe upload.
pub struct BintrayUpdater {
    config: HookConfig,
    client: BintrayClient,
    inspector: Box<dyn RecipeInspector>,
    probe: Box<dyn BranchProbe>,
}

impl BintrayUpdater {
    pub const NAME: &'static str = "bintray-updater";

    pub fn new(config: HookConfig) -> Self {
        Self {
            config,
            client: BintrayClient::new(),
            inspector: Box::new(AutoInspector::default()),
            probe: Box::new(GitProbe::new()),
        }
    }

    pub fn with_client(mut self, client: BintrayClient) -> Self {
        self.client = client;
        self
    }

    pub fn with_inspector(mut self, inspector: Box<dyn RecipeInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn with_branch_probe(mut self, probe: Box<dyn BranchProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Run the sync and surface errors.
    ///
    /// Returns the update that was written, or `None` when Bintray was
    /// already up to date.
    pub fn sync(
        &self,
        out: &mut dyn HookOutput,
        event: &UploadRecipeEvent,
    ) -> Result<Option<PackageUpdate>, BintrayError> {
        let endpoint = PackageEndpoint::new(&self.config, &event.remote, &event.reference)?;

        out.info("Reading package info from Bintray...");
        let remote_record = self.client.fetch_package(&endpoint)?;

        out.info("Inspecting recipe info ...");
        let recipe = self.inspector.inspect(&event.recipe_path)?;

        let classifier = StabilityClassifier::new(self.config.stable_branch_pattern.as_deref())?;
        let branch = detect_branch(&self.config, self.probe.as_ref());
        let is_stable = classifier.is_stable(branch.as_deref());
        tracing::debug!(branch = ?branch, is_stable, "classified branch");

        let update = reconcile(
            &recipe,
            &remote_record,
            is_stable,
            self.config.issue_tracker_url.as_deref(),
        );
        if update.is_empty() {
            out.info("Bintray package info is up-to-date.");
            return Ok(None);
        }

        out.info(&format!(
            "Bintray is outdated. Updating Bintray package info: {}",
            update.field_names().join(" ")
        ));
        let credentials = resolve_credentials(&self.config, &event.remote.name)?;
        self.client.patch_package(&endpoint, &update, &credentials)?;
        Ok(Some(update))
    }
}

impl LifecycleHook for BintrayUpdater {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn hook_points(&self) -> &[HookPoint] {
        &[HookPoint::PostUploadRecipe]
    }

    fn post_upload_recipe(
        &self,
        out: &mut dyn HookOutput,
        event: &UploadRecipeEvent,
    ) -> Result<(), HookError> {
        if let Err(err) = self.sync(out, event) {
            tracing::warn!(reference = %event.reference, error = %err, "Bintray metadata sync failed");
            out.error(&err.to_string());
        }
        Ok(())
    }
}
