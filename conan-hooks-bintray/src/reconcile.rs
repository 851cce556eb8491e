//! Recipe → Bintray metadata reconciliation.
//!
//! Field rules:
//!
//! | recipe       | remote              | staged when                                   |
//! |--------------|---------------------|-----------------------------------------------|
//! | description  | `desc`              | declared and different                        |
//! | topics       | `labels`            | declared and different (order-sensitive)      |
//! | license      | `licenses`          | declared and no license in common             |
//! | url          | `vcs_url`           | declared (always overwritten)                 |
//! | url / env    | `issue_tracker_url` | derived or overridden, non-empty and different|
//! | branch       | `maturity`          | stable branch and remote not already `Stable` |
//! | homepage     | `website_url`       | declared and different                        |

use std::collections::HashSet;

use conan_hooks_core::RecipeAttributes;

use crate::record::{PackageUpdate, RemoteRecord};

/// The only maturity value ever written.
pub const STABLE_MATURITY: &str = "Stable";

/// `<url minus its last path segment>/community/issues`.
pub fn derive_issue_tracker_url(url: &str) -> String {
    let base = match url.rfind('/') {
        Some(idx) => &url[..idx],
        None => url,
    };
    format!("{base}/community/issues")
}

/// Compute the fields of `remote` that must change to match `recipe`.
///
/// Pure: `is_stable_branch` and `issue_tracker_override` carry everything
/// that would otherwise come from the environment.
pub fn reconcile(
    recipe: &RecipeAttributes,
    remote: &RemoteRecord,
    is_stable_branch: bool,
    issue_tracker_override: Option<&str>,
) -> PackageUpdate {
    let mut update = PackageUpdate::default();

    if let Some(description) = recipe.description() {
        if remote.desc.as_deref() != Some(description) {
            update.desc = Some(description.to_string());
        }
    }

    if let Some(topics) = recipe.topics() {
        if remote.labels.as_deref() != Some(topics) {
            update.labels = Some(topics.to_vec());
        }
    }

    if let Some(licenses) = recipe.licenses() {
        let published: HashSet<&str> = remote
            .licenses
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !licenses.iter().any(|l| published.contains(l.as_str())) {
            update.licenses = Some(licenses);
        }
    }

    let url = recipe.url();
    if let Some(url) = url {
        update.vcs_url = Some(url.to_string());
    }

    let issue_tracker_url = match issue_tracker_override {
        Some(overridden) => overridden.to_string(),
        None => url.map(derive_issue_tracker_url).unwrap_or_default(),
    };
    if !issue_tracker_url.is_empty()
        && remote.issue_tracker_url.as_deref() != Some(issue_tracker_url.as_str())
    {
        update.issue_tracker_url = Some(issue_tracker_url);
    }

    if is_stable_branch && remote.maturity.as_deref() != Some(STABLE_MATURITY) {
        update.maturity = Some(STABLE_MATURITY.to_string());
    }

    if let Some(homepage) = recipe.homepage() {
        if remote.website_url.as_deref() != Some(homepage) {
            update.website_url = Some(homepage.to_string());
        }
    }

    update
}

#[cfg(test)]
mod tests {
    use conan_hooks_core::LicenseField;
    use rstest::rstest;

    use super::*;

    fn recipe() -> RecipeAttributes {
        RecipeAttributes {
            description: Some("new".into()),
            topics: Some(vec!["a".into(), "b".into()]),
            license: Some(LicenseField::One("MIT".into())),
            url: Some("https://x/y".into()),
            homepage: Some("https://x".into()),
            ..RecipeAttributes::default()
        }
    }

    fn remote() -> RemoteRecord {
        RemoteRecord {
            desc: Some("old".into()),
            labels: Some(vec![]),
            licenses: Some(vec!["MIT".into()]),
            ..RemoteRecord::default()
        }
    }

    #[test]
    fn end_to_end_on_non_stable_branch() {
        let update = reconcile(&recipe(), &remote(), false, None);
        assert_eq!(
            update,
            PackageUpdate {
                desc: Some("new".into()),
                labels: Some(vec!["a".into(), "b".into()]),
                licenses: None,
                vcs_url: Some("https://x/y".into()),
                issue_tracker_url: Some("https://x/community/issues".into()),
                maturity: None,
                website_url: Some("https://x".into()),
            }
        );
    }

    #[test]
    fn absent_description_never_staged() {
        for description in [None, Some(String::new())] {
            let recipe = RecipeAttributes {
                description,
                ..recipe()
            };
            assert!(reconcile(&recipe, &remote(), false, None).desc.is_none());
        }
    }

    #[test]
    fn equal_description_not_staged() {
        let remote = RemoteRecord {
            desc: Some("new".into()),
            ..remote()
        };
        assert!(reconcile(&recipe(), &remote, false, None).desc.is_none());
    }

    #[test]
    fn topics_compare_in_order() {
        let remote = RemoteRecord {
            labels: Some(vec!["b".into(), "a".into()]),
            ..remote()
        };
        assert_eq!(
            reconcile(&recipe(), &remote, false, None).labels,
            Some(vec!["a".into(), "b".into()])
        );

        let remote = RemoteRecord {
            labels: Some(vec!["a".into(), "b".into()]),
            ..remote
        };
        assert!(reconcile(&recipe(), &remote, false, None).labels.is_none());
    }

    #[rstest]
    #[case(vec!["MIT", "Apache-2.0"], vec!["Apache-2.0"], false)]
    #[case(vec!["MIT"], vec!["MIT", "BSD-3-Clause"], false)]
    #[case(vec!["GPL-3.0"], vec!["MIT"], true)]
    #[case(vec!["GPL-3.0", "LGPL-3.0"], vec![], true)]
    fn licenses_staged_only_without_overlap(
        #[case] declared: Vec<&str>,
        #[case] published: Vec<&str>,
        #[case] staged: bool,
    ) {
        let declared: Vec<String> = declared.into_iter().map(String::from).collect();
        let recipe = RecipeAttributes {
            license: Some(LicenseField::Many(declared.clone())),
            ..recipe()
        };
        let remote = RemoteRecord {
            licenses: Some(published.into_iter().map(String::from).collect()),
            ..remote()
        };
        let update = reconcile(&recipe, &remote, false, None);
        assert_eq!(update.licenses, staged.then_some(declared));
    }

    #[test]
    fn single_license_staged_as_sequence() {
        let recipe = RecipeAttributes {
            license: Some(LicenseField::One("Zlib".into())),
            ..recipe()
        };
        let remote = RemoteRecord {
            licenses: None,
            ..remote()
        };
        assert_eq!(
            reconcile(&recipe, &remote, false, None).licenses,
            Some(vec!["Zlib".to_string()])
        );
    }

    #[test]
    fn vcs_url_always_overwritten() {
        let remote = RemoteRecord {
            vcs_url: Some("https://x/y".into()),
            ..remote()
        };
        assert_eq!(
            reconcile(&recipe(), &remote, false, None).vcs_url.as_deref(),
            Some("https://x/y")
        );
    }

    #[test]
    fn no_url_means_no_vcs_or_issue_tracker() {
        let recipe = RecipeAttributes {
            url: None,
            ..recipe()
        };
        let update = reconcile(&recipe, &remote(), false, None);
        assert!(update.vcs_url.is_none());
        assert!(update.issue_tracker_url.is_none());
    }

    #[test]
    fn issue_tracker_override_wins_even_without_url() {
        let recipe = RecipeAttributes {
            url: None,
            ..recipe()
        };
        let update = reconcile(&recipe, &remote(), false, Some("https://tracker.example"));
        assert_eq!(update.issue_tracker_url.as_deref(), Some("https://tracker.example"));
    }

    #[test]
    fn empty_issue_tracker_override_disables_derivation() {
        let update = reconcile(&recipe(), &remote(), false, Some(""));
        assert!(update.issue_tracker_url.is_none());
        assert_eq!(update.vcs_url.as_deref(), Some("https://x/y"));
    }

    #[test]
    fn matching_issue_tracker_not_staged() {
        let remote = RemoteRecord {
            issue_tracker_url: Some("https://x/community/issues".into()),
            ..remote()
        };
        assert!(reconcile(&recipe(), &remote, false, None).issue_tracker_url.is_none());
    }

    #[rstest]
    #[case("https://github.com/conan-community/conan-zlib", "https://github.com/conan-community/community/issues")]
    #[case("https://x/y", "https://x/community/issues")]
    #[case("no-slashes", "no-slashes/community/issues")]
    fn derives_issue_tracker(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(derive_issue_tracker_url(url), expected);
    }

    #[test]
    fn stable_branch_marks_missing_maturity() {
        let update = reconcile(&recipe(), &remote(), true, None);
        assert_eq!(update.maturity.as_deref(), Some(STABLE_MATURITY));
    }

    #[test]
    fn stable_branch_replaces_other_maturity() {
        let remote = RemoteRecord {
            maturity: Some("Development".into()),
            ..remote()
        };
        assert_eq!(
            reconcile(&recipe(), &remote, true, None).maturity.as_deref(),
            Some(STABLE_MATURITY)
        );
    }

    #[test]
    fn already_stable_not_staged() {
        let remote = RemoteRecord {
            maturity: Some(STABLE_MATURITY.into()),
            ..remote()
        };
        assert!(reconcile(&recipe(), &remote, true, None).maturity.is_none());
    }

    #[test]
    fn non_stable_branch_never_touches_maturity() {
        assert!(reconcile(&recipe(), &RemoteRecord::default(), false, None)
            .maturity
            .is_none());
    }

    #[test]
    fn empty_recipe_against_stable_remote_is_empty() {
        let remote = RemoteRecord {
            maturity: Some(STABLE_MATURITY.into()),
            ..RemoteRecord::default()
        };
        assert!(reconcile(&RecipeAttributes::default(), &remote, true, None).is_empty());
    }
}
