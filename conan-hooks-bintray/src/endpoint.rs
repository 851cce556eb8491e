//! Bintray package endpoint resolution.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use conan_hooks_core::{ConanReference, HookConfig, Remote};

use crate::error::BintrayError;

fn remote_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://api\.bintray\.com/conan/(.*)/(.*)").expect("static pattern")
    })
}

/// Extract `(owner, repository)` from a Bintray conan remote URL.
///
/// `https://api.bintray.com/conan/conan-community/conan` yields
/// `("conan-community", "conan")`.
pub fn parse_remote_url(remote: &Remote) -> Result<(String, String), BintrayError> {
    let caps = remote_pattern()
        .captures(&remote.url)
        .ok_or_else(|| BintrayError::NotBintrayRemote {
            remote: remote.name.clone(),
            url: remote.url.clone(),
        })?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// The REST resource for one package: `{api}/packages/{owner}/{repo}/{name}%3A{user}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEndpoint {
    url: String,
}

impl PackageEndpoint {
    pub fn new(
        config: &HookConfig,
        remote: &Remote,
        reference: &ConanReference,
    ) -> Result<Self, BintrayError> {
        let (owner, repo) = parse_remote_url(remote)?;
        let package = format!("{}%3A{}", reference.name, reference.user_or_placeholder());
        Ok(Self {
            url: format!(
                "{}/packages/{owner}/{repo}/{package}",
                config.bintray_api_url
            ),
        })
    }

    /// Wrap an already-built URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_https(&self) -> bool {
        self.url.starts_with("https://")
    }
}

impl fmt::Display for PackageEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn zlib() -> ConanReference {
        ConanReference::new("zlib", "1.2.11").with_user_channel("conan", "stable")
    }

    #[rstest]
    #[case("https://api.bintray.com/conan/conan-community/conan", "conan-community", "conan")]
    #[case("http://api.bintray.com/conan/bincrafters/public-conan", "bincrafters", "public-conan")]
    fn parses_owner_and_repository(#[case] url: &str, #[case] owner: &str, #[case] repo: &str) {
        let parsed = parse_remote_url(&Remote::new("r", url)).expect("parse");
        assert_eq!(parsed, (owner.to_string(), repo.to_string()));
    }

    #[rstest]
    #[case("https://center.conan.io")]
    #[case("https://bintray.com/conan/owner/repo")]
    #[case("https://api.bintray.com/npm/owner/repo")]
    fn non_bintray_remote_names_the_remote(#[case] url: &str) {
        let err = parse_remote_url(&Remote::new("conancenter", url)).unwrap_err();
        assert!(matches!(err, BintrayError::NotBintrayRemote { .. }));
        assert!(err.to_string().contains("conancenter"));
    }

    #[test]
    fn builds_package_url_with_encoded_token() {
        let remote = Remote::new("bintray", "https://api.bintray.com/conan/conan-community/conan");
        let endpoint = PackageEndpoint::new(&HookConfig::default(), &remote, &zlib()).expect("endpoint");
        assert_eq!(
            endpoint.url(),
            "https://api.bintray.com/packages/conan-community/conan/zlib%3Aconan"
        );
        assert!(endpoint.is_https());
    }

    #[test]
    fn api_host_is_overridable() {
        let config = HookConfig::from_vars([("BINTRAY_API_URL", "http://127.0.0.1:9000")]);
        let remote = Remote::new("bintray", "https://api.bintray.com/conan/owner/repo");
        let endpoint = PackageEndpoint::new(&config, &remote, &zlib()).expect("endpoint");
        assert_eq!(endpoint.url(), "http://127.0.0.1:9000/packages/owner/repo/zlib%3Aconan");
        assert!(!endpoint.is_https());
    }

    #[test]
    fn reference_without_user_uses_placeholder() {
        let remote = Remote::new("bintray", "https://api.bintray.com/conan/owner/repo");
        let reference = ConanReference::new("fmt", "9.1.0");
        let endpoint = PackageEndpoint::new(&HookConfig::default(), &remote, &reference).expect("endpoint");
        assert!(endpoint.url().ends_with("/fmt%3A_"));
    }
}
