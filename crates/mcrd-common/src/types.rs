//! Domain primitive types used across the mcrd workspace.

use std::fmt;

use crate::error::{McrdError, Result};

/// The non-root user the containerized server runs as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootlessIdentity {
    name: String,
    uid: u32,
}

impl RootlessIdentity {
    /// Parses a `<name>:<uid>` entry. Parts after the UID are ignored.
    ///
    /// # Errors
    ///
    /// Returns `McrdError::InvalidRootless` if the entry has fewer than two
    /// parts, an empty name, or a non-numeric UID.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || McrdError::InvalidRootless {
            value: value.to_string(),
        };

        let mut parts = value.split(':');
        let name = parts.next().filter(|n| !n.is_empty()).ok_or_else(invalid)?;
        let uid = parts
            .next()
            .and_then(|u| u.parse::<u32>().ok())
            .ok_or_else(invalid)?;

        Ok(Self {
            name: name.to_string(),
            uid,
        })
    }

    /// Returns the username.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the numeric UID.
    #[must_use]
    pub const fn uid(&self) -> u32 {
        self.uid
    }
}

impl fmt::Display for RootlessIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.uid)
    }
}
