//! Configuration directories and file loading.
//!
//! Registries are built from up to three directories:
//!
//! | Layer | Source | Required |
//! |-------|--------|----------|
//! | local | user override directory | no |
//! | custom | site override directory | no |
//! | system | bundled defaults | yes |
//!
//! Style databases load local, then custom, then system; areas load in the
//! opposite order. Within each registry a later load replaces entries of
//! the same name. Missing files are skipped.

mod error;

use std::path::{Path, PathBuf};

use serde_yaml::Value;

pub use error::ConfigError;

/// Styles for parameter (field) plotting.
pub const PARAM_STYLE_FILE: &str = "param_style.yaml";
/// Rules mapping parameters to parameter styles.
pub const PARAM_RULES_FILE: &str = "params.yaml";
/// Styles for map backgrounds (coastlines, grid, labels).
pub const MAP_STYLE_FILE: &str = "map_style.yaml";
/// Named map areas.
pub const AREAS_FILE: &str = "areas.yaml";

/// The system directory shipped with this crate.
pub const BUNDLED_ETC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/etc");

/// The directories a registry is loaded from.
///
/// # Example
///
/// ```rust
/// use metstyle::ConfigPaths;
///
/// let paths = ConfigPaths::bundled()
///     .with_custom("/opt/site/metstyle")
///     .with_local("/home/me/.metstyle");
/// assert_eq!(paths.layers_for_styles().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Always-consulted defaults
    pub system: PathBuf,
    /// Optional site-wide overrides
    pub custom: Option<PathBuf>,
    /// Optional user overrides
    pub local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Uses `system` as the defaults directory, with no overrides.
    pub fn new(system: impl Into<PathBuf>) -> Self {
        Self {
            system: system.into(),
            custom: None,
            local: None,
        }
    }

    /// Uses the defaults bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_ETC_DIR)
    }

    /// Sets the site override directory.
    pub fn with_custom(mut self, dir: impl Into<PathBuf>) -> Self {
        self.custom = Some(dir.into());
        self
    }

    /// Sets the user override directory.
    pub fn with_local(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local = Some(dir.into());
        self
    }

    /// Directories in style database load order: local, custom, system.
    pub fn layers_for_styles(&self) -> impl Iterator<Item = &Path> {
        self.local
            .as_deref()
            .into_iter()
            .chain(self.custom.as_deref())
            .chain(std::iter::once(self.system.as_path()))
    }

    /// Directories in area load order: system, custom, local.
    pub fn layers_for_areas(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.system.as_path())
            .chain(self.custom.as_deref())
            .chain(self.local.as_deref())
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Reads and parses a YAML file.
///
/// Returns `Ok(None)` if the file does not exist and `Value::Null` for an
/// empty file.
pub(crate) fn read_yaml(path: &Path) -> Result<Option<Value>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml(&text, path).map(Some)
}

pub(crate) fn parse_yaml(text: &str, path: &Path) -> Result<Value, ConfigError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
