//! Configuration load errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a registry cannot be built from its configuration.
///
/// Any of these aborts construction; no partially loaded registry is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid YAML or has the wrong shape
    #[error("invalid configuration in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A parameter rule names a style that has not been defined
    #[error("invalid style '{style}' specified in rule {rule} (file: {})", .path.display())]
    UndefinedStyle {
        style: String,
        rule: String,
        path: PathBuf,
    },

    /// A style entry cannot be decoded into directives
    #[error("malformed style '{name}' in {}: {reason}", .path.display())]
    MalformedStyle {
        name: String,
        path: PathBuf,
        reason: String,
    },

    /// A parameter rule record is structurally invalid
    #[error("malformed parameter rule #{index} in {}: {reason}", .path.display())]
    MalformedRule {
        index: usize,
        path: PathBuf,
        reason: String,
    },

    /// An area entry is not a single `name: params` mapping
    #[error("malformed area definition in {}: {reason}", .path.display())]
    MalformedArea { path: PathBuf, reason: String },
}
