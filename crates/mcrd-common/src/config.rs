//! Configuration model, install layout, and the configuration loader.
//!
//! The configuration is a flat JSON object written by the operator. It is
//! read once at program entry and passed by reference to every operation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants;
use crate::error::{McrdError, Result};

/// Location of the installed tool and the files derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    /// Creates a layout rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the layout from the directory holding the running executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be determined.
    pub fn detect() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|e| McrdError::Io {
            path: PathBuf::from("<current executable>"),
            source: e,
        })?;
        let root = exe.parent().ok_or_else(|| McrdError::Config {
            message: format!("executable {} has no parent directory", exe.display()),
        })?;
        Ok(Self::new(root))
    }

    /// Returns the install directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the default configuration file path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(constants::CONFIG_FILE_NAME)
    }

    /// Returns the path the build recipe is written to.
    #[must_use]
    pub fn recipe_path(&self) -> PathBuf {
        self.root.join(constants::RECIPE_FILE_NAME)
    }

    /// Returns the directory handed to the engine as build context.
    #[must_use]
    pub fn build_context(&self) -> &Path {
        &self.root
    }
}

/// Fully populated settings for one server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server version identifier, looked up in the version manifest.
    pub version: String,
    /// Tag for the built image.
    pub build_tag: String,
    /// Base JDK image reference.
    pub base_image: String,
    /// Name of the single managed container.
    pub container_name: String,
    /// Rootless identity entry, `<name>:<uid>`.
    pub rootless: String,
    /// Host directory mounted as the instance data directory.
    pub data_dir: PathBuf,
    /// Port published on the host and the container.
    pub server_port: String,
    /// JVM heap ceiling, e.g. `1024M`.
    pub memory: String,
    /// Whether to apply the SELinux sandbox label before start.
    pub selinux: bool,
    /// Container engine binary.
    pub engine: String,
    /// URL of the version index.
    pub manifest_url: String,
    /// Ceiling, in seconds, for each manifest request. `None` waits forever.
    pub manifest_timeout_secs: Option<u64>,
}

impl Config {
    /// Returns the built-in configuration for an install directory.
    #[must_use]
    pub fn defaults(layout: &InstallLayout) -> Self {
        Self {
            version: constants::DEFAULT_VERSION.into(),
            build_tag: constants::DEFAULT_BUILD_TAG.into(),
            base_image: constants::DEFAULT_BASE_IMAGE.into(),
            container_name: constants::DEFAULT_CONTAINER_NAME.into(),
            rootless: constants::DEFAULT_ROOTLESS.into(),
            data_dir: layout.root().join(constants::DEFAULT_DATA_DIR_NAME),
            server_port: constants::DEFAULT_SERVER_PORT.into(),
            memory: constants::DEFAULT_MEMORY.into(),
            selinux: true,
            engine: constants::DEFAULT_ENGINE.into(),
            manifest_url: constants::VERSION_MANIFEST_URL.into(),
            manifest_timeout_secs: None,
        }
    }

    /// Returns the manifest request timeout, if one is configured.
    #[must_use]
    pub fn manifest_timeout(&self) -> Option<Duration> {
        self.manifest_timeout_secs.map(Duration::from_secs)
    }
}

/// On-disk shape of the configuration file. Every key is optional.
///
/// Scalars are read leniently: string settings accept any JSON scalar and
/// `selinux` follows JSON truthiness. Checking individual values is left
/// to the code that uses them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct ConfigFile {
    #[serde(rename = "mc-version", deserialize_with = "lenient::string")]
    version: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    build_tag: Option<String>,
    #[serde(rename = "jdk-image", deserialize_with = "lenient::string")]
    base_image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    container_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    rootless: Option<String>,
    #[serde(rename = "instance-data-dir", deserialize_with = "lenient::path")]
    data_dir: Option<PathBuf>,
    #[serde(deserialize_with = "lenient::string")]
    server_port: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    memory: Option<String>,
    #[serde(deserialize_with = "lenient::truthy")]
    selinux: Option<bool>,
    #[serde(rename = "container-engine", deserialize_with = "lenient::string")]
    engine: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    manifest_url: Option<String>,
    #[serde(deserialize_with = "lenient::seconds")]
    manifest_timeout_secs: Option<u64>,
}

mod lenient {
    use std::path::PathBuf;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `null` is treated as absent.
    fn text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(text(Value::deserialize(d)?))
    }

    pub fn path<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PathBuf>, D::Error> {
        Ok(text(Value::deserialize(d)?).map(PathBuf::from))
    }

    pub fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let flag = match Value::deserialize(d)? {
            Value::Null => return Ok(None),
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        Ok(Some(flag))
    }

    pub fn seconds<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timeout: {n}"))),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid timeout: {s:?}"))),
            other => Err(D::Error::custom(format!("invalid timeout: {other}"))),
        }
    }
}

impl ConfigFile {
    fn over(self, defaults: Config) -> Config {
        Config {
            version: self.version.unwrap_or(defaults.version),
            build_tag: self.build_tag.unwrap_or(defaults.build_tag),
            base_image: self.base_image.unwrap_or(defaults.base_image),
            container_name: self.container_name.unwrap_or(defaults.container_name),
            rootless: self.rootless.unwrap_or(defaults.rootless),
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            server_port: self.server_port.unwrap_or(defaults.server_port),
            memory: self.memory.unwrap_or(defaults.memory),
            selinux: self.selinux.unwrap_or(defaults.selinux),
            engine: self.engine.unwrap_or(defaults.engine),
            manifest_url: self.manifest_url.unwrap_or(defaults.manifest_url),
            manifest_timeout_secs: self.manifest_timeout_secs.or(defaults.manifest_timeout_secs),
        }
    }
}

/// Loads the configuration.
///
/// Without an explicit path the layout's `conf.json` is used. A path that
/// does not name a regular file yields the built-in defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, is not
/// well-formed JSON, or its root is not an object.
pub fn load(path: Option<&Path>, layout: &InstallLayout) -> Result<Config> {
    let path = path.map_or_else(|| layout.config_path(), Path::to_path_buf);

    if !path.is_file() {
        tracing::warn!(path = %path.display(), "no config file found, defaults applied");
        return Ok(Config::defaults(layout));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| McrdError::Io {
        path: path.clone(),
        source: e,
    })?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(McrdError::Config {
            message: format!("{} must contain a JSON object", path.display()),
        });
    }
    let file: ConfigFile = serde_json::from_value(value)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(file.over(Config::defaults(layout)))
}
