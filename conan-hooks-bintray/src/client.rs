//! Blocking Bintray REST client.
//!
//! One GET and at most one PATCH per hook invocation; no retries.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::credentials::Credentials;
use crate::endpoint::PackageEndpoint;
use crate::error::BintrayError;
use crate::record::{PackageUpdate, RemoteRecord};

/// Thin wrapper over a `ureq` agent.
#[derive(Debug, Clone)]
pub struct BintrayClient {
    agent: ureq::Agent,
    allow_plaintext: bool,
}

impl BintrayClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("conan-hooks/", env!("CARGO_PKG_VERSION")))
                .build(),
            allow_plaintext: false,
        }
    }

    /// Let PATCH requests go to `http://` endpoints (local mock servers).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn allow_plaintext(mut self) -> Self {
        self.allow_plaintext = true;
        self
    }

    /// Read the published package record. No authentication is sent.
    pub fn fetch_package(&self, endpoint: &PackageEndpoint) -> Result<RemoteRecord, BintrayError> {
        tracing::debug!(url = %endpoint, "GET package info");
        let response = self
            .agent
            .get(endpoint.url())
            .call()
            .map_err(|err| request_error("request", endpoint, err))?;
        response.into_json().map_err(|source| BintrayError::Decode {
            url: endpoint.url().to_string(),
            source,
        })
    }

    /// PATCH `update` onto the package with Basic auth.
    ///
    /// Refuses non-HTTPS endpoints before any network I/O.
    pub fn patch_package(
        &self,
        endpoint: &PackageEndpoint,
        update: &PackageUpdate,
        credentials: &Credentials,
    ) -> Result<RemoteRecord, BintrayError> {
        if !endpoint.is_https() && !self.allow_plaintext {
            return Err(BintrayError::InsecureUrl {
                url: endpoint.url().to_string(),
            });
        }

        let token = STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
        tracing::info!(url = %endpoint, fields = ?update.field_names(), "PATCH package info");
        let response = self
            .agent
            .patch(endpoint.url())
            .set("Authorization", &format!("Basic {token}"))
            .send_json(update)
            .map_err(|err| request_error("patch", endpoint, err))?;
        response.into_json().map_err(|source| BintrayError::Decode {
            url: endpoint.url().to_string(),
            source,
        })
    }
}

impl Default for BintrayClient {
    fn default() -> Self {
        Self::new()
    }
}

fn request_error(action: &'static str, endpoint: &PackageEndpoint, err: ureq::Error) -> BintrayError {
    match err {
        ureq::Error::Status(status, response) => BintrayError::Http {
            action,
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => BintrayError::Transport {
            url: endpoint.url().to_string(),
            message: transport.to_string(),
        },
    }
}
