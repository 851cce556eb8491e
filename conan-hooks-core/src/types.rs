//! Domain types shared by every hook.
//!
//! References are parsed once at the CLI boundary; hooks only ever see the
//! structured form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ConanReference
// ---------------------------------------------------------------------------

/// A package reference: `name/version@user/channel`, with the
/// `@user/channel` half optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConanReference {
    pub name: String,
    pub version: String,
    pub user: Option<String>,
    pub channel: Option<String>,
}

impl ConanReference {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            user: None,
            channel: None,
        }
    }

    pub fn with_user_channel(mut self, user: impl Into<String>, channel: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.channel = Some(channel.into());
        self
    }

    /// The user half, or `_` when the reference has none.
    pub fn user_or_placeholder(&self) -> &str {
        self.user.as_deref().unwrap_or("_")
    }
}

impl fmt::Display for ConanReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if let (Some(user), Some(channel)) = (&self.user, &self.channel) {
            write!(f, "@{user}/{channel}")?;
        }
        Ok(())
    }
}

impl FromStr for ConanReference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| CoreError::InvalidReference {
            input: s.to_string(),
            reason,
        };

        let (head, tail) = match s.split_once('@') {
            Some((head, tail)) => (head, Some(tail)),
            None => (s, None),
        };

        let (name, version) = head
            .split_once('/')
            .ok_or_else(|| invalid("expected 'name/version'"))?;
        if name.is_empty() || version.is_empty() || version.contains('/') {
            return Err(invalid("expected 'name/version'"));
        }

        let mut reference = ConanReference::new(name, version);
        if let Some(tail) = tail {
            let (user, channel) = tail
                .split_once('/')
                .ok_or_else(|| invalid("expected 'user/channel' after '@'"))?;
            if user.is_empty() || channel.is_empty() || channel.contains('/') {
                return Err(invalid("expected 'user/channel' after '@'"));
            }
            reference = reference.with_user_channel(user, channel);
        }
        Ok(reference)
    }
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

/// A configured package-repository endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

impl Remote {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}
