//! Error types for conan-hooks-bintray.
//!
//! Variants fall into three groups: configuration (bad remote, missing
//! credentials, insecure endpoint, bad branch pattern), transport (HTTP
//! status, connection, body decoding) and delegation (recipe inspection).

use thiserror::Error;

use conan_hooks_core::InspectError;
use conan_hooks_detector::DetectError;

/// All errors that can arise while syncing package metadata.
#[derive(Debug, Error)]
pub enum BintrayError {
    #[error("the remote {remote} ({url}) is not a Bintray repository")]
    NotBintrayRemote { remote: String, url: String },

    #[error("could not update Bintray info: username not found")]
    MissingUsername,

    #[error("could not update Bintray info: password not found")]
    MissingPassword,

    /// Credentials travel as Basic auth, so plaintext endpoints are refused.
    #[error("bad package URL {url}: only HTTPS is allowed, Bintray API uses Basic Auth")]
    InsecureUrl { url: String },

    #[error(transparent)]
    Pattern(#[from] DetectError),

    /// Non-success HTTP status.
    #[error("could not {action} package info: {body} ({status})")]
    Http {
        action: &'static str,
        status: u16,
        body: String,
    },

    /// Connection-level failure (DNS, TLS, refused, ...).
    #[error("could not reach Bintray at {url}: {message}")]
    Transport { url: String, message: String },

    #[error("unexpected Bintray response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("recipe inspection failed: {0}")]
    Inspect(#[from] InspectError),
}
