//! Bintray login resolution.
//!
//! Credentials are looked up fresh on every write and never cached.

use std::fmt;

use conan_hooks_core::HookConfig;

use crate::error::BintrayError;

/// Username/API-key pair for Basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resolve credentials for `remote_name`.
///
/// Username: `BINTRAY_LOGIN_USERNAME_<REMOTE>`, then `BINTRAY_LOGIN_USERNAME`,
/// then `BINTRAY_USERNAME`. Password: `BINTRAY_PASSWORD_<REMOTE>`, then
/// `BINTRAY_PASSWORD`. `<REMOTE>` is the remote name upper-cased.
pub fn resolve_credentials(config: &HookConfig, remote_name: &str) -> Result<Credentials, BintrayError> {
    let remote = remote_name.to_uppercase();

    let username = [
        format!("BINTRAY_LOGIN_USERNAME_{remote}"),
        "BINTRAY_LOGIN_USERNAME".to_string(),
        "BINTRAY_USERNAME".to_string(),
    ]
    .iter()
    .find_map(|var| config.var(var))
    .ok_or(BintrayError::MissingUsername)?;

    let password = config
        .var(&format!("BINTRAY_PASSWORD_{remote}"))
        .or_else(|| config.var("BINTRAY_PASSWORD"))
        .ok_or(BintrayError::MissingPassword)?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
