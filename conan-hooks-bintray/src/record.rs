//! Bintray package record and the partial update built from it.

use serde::{Deserialize, Serialize};

/// The package record as Bintray reports it. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteRecord {
    pub desc: Option<String>,
    pub labels: Option<Vec<String>>,
    pub licenses: Option<Vec<String>>,
    pub vcs_url: Option<String>,
    pub issue_tracker_url: Option<String>,
    pub maturity: Option<String>,
    pub website_url: Option<String>,
}

/// Fields to PATCH. Only staged fields are serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_tracker_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl PackageUpdate {
    /// Names of the staged fields, in payload order.
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("desc", self.desc.is_some()),
            ("labels", self.labels.is_some()),
            ("licenses", self.licenses.is_some()),
            ("vcs_url", self.vcs_url.is_some()),
            ("issue_tracker_url", self.issue_tracker_url.is_some()),
            ("maturity", self.maturity.is_some()),
            ("website_url", self.website_url.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, staged)| staged.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}
