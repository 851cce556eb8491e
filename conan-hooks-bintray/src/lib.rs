//! # conan-hooks-bintray
//!
//! Keeps a Bintray package's metadata in step with its recipe.
//!
//! After a recipe upload, [`BintrayUpdater`] reads the package record from
//! the Bintray REST API, compares it with the recipe attributes via
//! [`reconcile`], and PATCHes only the fields that differ.

pub mod client;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod updater;

pub use client::BintrayClient;
pub use credentials::{resolve_credentials, Credentials};
pub use endpoint::{parse_remote_url, PackageEndpoint};
pub use error::BintrayError;
pub use reconcile::{derive_issue_tracker_url, reconcile, STABLE_MATURITY};
pub use record::{PackageUpdate, RemoteRecord};
pub use updater::BintrayUpdater;
