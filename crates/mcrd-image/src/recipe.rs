//! Build recipe rendering.
//!
//! The recipe is a Dockerfile derived deterministically from the
//! configuration, the rootless identity, and the resolved server download.
//! It is rewritten in full on every install.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use mcrd_common::config::Config;
use mcrd_common::constants::{CONTAINER_DATA_ROOT, CONTAINER_INSTANCE_DIR, NOLOGIN_SHELL};
use mcrd_common::error::{McrdError, Result};
use mcrd_common::types::RootlessIdentity;

/// OS family of the base image, which decides the user-creation tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseFamily {
    /// Busybox `adduser`.
    Alpine,
    /// shadow-utils `useradd`.
    Debian,
}

impl BaseFamily {
    /// Detects the family from an image reference.
    #[must_use]
    pub fn detect(image: &str) -> Self {
        if image.to_lowercase().contains("alpine") {
            Self::Alpine
        } else {
            Self::Debian
        }
    }

    /// Returns the shell command that creates the rootless user.
    #[must_use]
    pub fn create_user_command(self, identity: &RootlessIdentity) -> String {
        let (name, uid) = (identity.name(), identity.uid());
        match self {
            Self::Alpine => format!("adduser -u {uid} -s {NOLOGIN_SHELL} -D {name}"),
            Self::Debian => format!("useradd -u {uid} -s {NOLOGIN_SHELL} {name}"),
        }
    }
}

/// A rendered build recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecipe {
    text: String,
}

impl BuildRecipe {
    /// Renders the recipe for the given server download.
    #[must_use]
    pub fn render(config: &Config, identity: &RootlessIdentity, server_url: &str) -> Self {
        let jar = format!("{CONTAINER_DATA_ROOT}/bin/server-{}.jar", config.version);
        let create_user = BaseFamily::detect(&config.base_image).create_user_command(identity);

        let mut text = String::new();
        let _ = writeln!(text, "FROM {}", config.base_image);
        let _ = writeln!(text, "ADD {server_url} {jar}");
        let _ = writeln!(
            text,
            "RUN {create_user} && mkdir {CONTAINER_INSTANCE_DIR} && chown -R {} {CONTAINER_DATA_ROOT}/*",
            identity.uid()
        );
        let _ = writeln!(text, "WORKDIR {CONTAINER_INSTANCE_DIR}");
        let _ = writeln!(text, "USER {}", identity.name());
        let _ = writeln!(
            text,
            r#"CMD ["java", "-Xmx{}", "-Dlog4j2.formatMsgNoLookups=true", "-jar", "{jar}", "--nogui"]"#,
            config.memory
        );
        Self { text }
    }

    /// Returns the recipe text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Writes the recipe to `path`, replacing any previous content.
    ///
    /// The text goes to a sibling temporary file first and is renamed into
    /// place, so `path` never holds a partially written recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "writing build recipe");
        let staging = staging_path(path);
        std::fs::write(&staging, &self.text).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            McrdError::Io {
                path: staging.clone(),
                source: e,
            }
        })?;
        std::fs::rename(&staging, path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            McrdError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
