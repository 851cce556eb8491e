//! `post_package` hook wrapper around [`BinaryLinter`].

use conan_hooks_core::{HookError, HookOutput, HookPoint, LifecycleHook, PackageEvent};

use crate::analyzer::{BinaryAnalyzer, ObjectAnalyzer};
use crate::linter::BinaryLinter;
use crate::target::{expected_architecture, Verifier};

pub struct BinaryLinterHook {
    analyzer: Box<dyn BinaryAnalyzer>,
}

impl BinaryLinterHook {
    pub const NAME: &'static str = "binary-linter";

    pub fn new() -> Self {
        Self::with_analyzer(Box::new(ObjectAnalyzer))
    }

    pub fn with_analyzer(analyzer: Box<dyn BinaryAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl Default for BinaryLinterHook {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleHook for BinaryLinterHook {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn hook_points(&self) -> &[HookPoint] {
        &[HookPoint::PostPackage]
    }

    fn post_package(&self, out: &mut dyn HookOutput, event: &PackageEvent) -> Result<(), HookError> {
        out.info("conan binary linter plug-in");

        let os = event.settings.os.as_deref();
        let Some(verifier) = Verifier::for_os(os) else {
            out.warn(&format!(
                "don't know how to verify for os {}, giving up...",
                os.unwrap_or("None")
            ));
            return Ok(());
        };

        let linter = BinaryLinter::new(
            self.analyzer.as_ref(),
            verifier,
            expected_architecture(event.settings.arch.as_deref()),
        );
        let report = linter
            .verify(&event.package_folder)
            .map_err(|err| HookError::failed(Self::NAME, err))?;

        if report.artifacts.is_empty() {
            out.info("no binaries found in package folder");
        }
        for artifact in &report.artifacts {
            out.info(&format!(
                "{}: {} (sha256 {})",
                artifact.path.display(),
                artifact.info,
                artifact.sha256
            ));
        }
        for finding in &report.findings {
            out.warn(&finding.to_string());
        }
        Ok(())
    }
}
