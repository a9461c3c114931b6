//! # Metstyle - rule-based plotting styles for meteorological fields
//!
//! Metstyle picks a visual style for a data field from layered YAML
//! configuration and turns it into renderer requests.
//!
//! ## Core Concepts
//!
//! - [`ParamInfo`]: the metadata of one field (parameter name, level type, level)
//! - [`MatchCondition`]: scores how precisely a field satisfies one filter
//! - [`StyleRule`]: OR'd conditions plus the style names to use per plot type
//! - [`StyleDb`]: the merged registry of named styles and ordered rules
//! - [`Style`] / [`Visdef`]: an ordered bundle of rendering directives
//! - [`MapConfig`] / [`GeoView`]: named map areas combined with coastline styles
//!
//! ## Configuration Layers
//!
//! Registries are built from up to three directories described by
//! [`ConfigPaths`]: an optional local directory, an optional custom (site)
//! directory and the system directory, which is always consulted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use metstyle::{ConfigPaths, ParamInfo, StyleDb};
//!
//! let paths = ConfigPaths::bundled().with_custom("/etc/metstyle");
//! let db = StyleDb::param_db(&paths)?;
//!
//! let field = ParamInfo::new("t").with_level_type("pl").with_level(850.0);
//! if let Some(style) = db.resolve(&field, true, "map") {
//!     for request in style.to_request()? {
//!         println!("{}", request.verb());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod db;
mod field;
pub mod map;
pub mod rules;
pub mod style;
pub mod visdef;

pub use config::{ConfigError, ConfigPaths};
pub use db::{
    DbKind, StyleDb, DIFF_DEFAULT_STYLE_NAME, FALLBACK_STYLE_NAME, SCALAR_DEFAULT_STYLE_NAME,
    VECTOR_DEFAULT_STYLE_NAME,
};
pub use field::ParamInfo;
pub use map::{GeoView, MapConfig};
pub use rules::{MatchCondition, ParamKind, PlotType, StyleRule};
pub use style::Style;
pub use visdef::{
    Arg, Backend, BackendError, CallResult, FieldsetHandle, ParamArg, Params, RenderVerb, Reply,
    Request, RequestError, Visdef,
};

/// Parameter values as they appear in configuration files.
pub use serde_yaml::Value;
