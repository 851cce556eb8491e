//! Current-branch detection.
//!
//! CI systems are checked in a fixed priority order; the first one whose
//! marker variable and branch variable are both set wins. Only when no CI
//! system matches is the local checkout asked. Nothing here fails: an
//! unknown branch is `None`.

use std::path::PathBuf;
use std::process::Command;

use conan_hooks_core::HookConfig;

/// `(marker variable, branch variable)` per CI system, in priority order.
pub const CI_BRANCH_VARIABLES: [(&str, &str); 6] = [
    ("TRAVIS", "TRAVIS_BRANCH"),
    ("APPVEYOR", "APPVEYOR_REPO_BRANCH"),
    ("bamboo_buildNumber", "bamboo_planRepository_branch"),
    ("JENKINS_URL", "BRANCH_NAME"),
    ("GITLAB_CI", "CI_BUILD_REF_NAME"),
    ("CIRCLECI", "CIRCLE_BRANCH"),
];

/// Source of the current branch when no CI system reports one.
pub trait BranchProbe {
    fn current_branch(&self) -> Option<String>;
}

/// Asks git via `git branch --no-color`.
#[derive(Debug, Clone, Default)]
pub struct GitProbe {
    workdir: Option<PathBuf>,
}

impl GitProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir` instead of the process working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }
}

impl BranchProbe for GitProbe {
    fn current_branch(&self) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.args(["branch", "--no-color"]);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(error = %err, "git unavailable for branch detection");
                return None;
            }
        };
        if !output.status.success() {
            tracing::debug!(status = %output.status, "git branch failed");
            return None;
        }
        parse_current_branch(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Pick the current branch out of `git branch` output.
///
/// The current line is the one marked with `*`; a detached HEAD has no
/// branch.
pub fn parse_current_branch(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('*') && !line.contains(" (HEAD detached"))
        .map(|line| line.replacen('*', "", 1).trim().to_string())
}

/// Current branch: CI variables first, then `probe`.
pub fn detect_branch(config: &HookConfig, probe: &dyn BranchProbe) -> Option<String> {
    for (marker, branch_var) in CI_BRANCH_VARIABLES {
        if let (Some(_), Some(branch)) = (config.var(marker), config.var(branch_var)) {
            tracing::debug!(ci = marker, branch, "branch from CI environment");
            return Some(branch.to_string());
        }
    }
    let branch = probe.current_branch();
    tracing::debug!(branch = ?branch, "branch from local checkout");
    branch
}
