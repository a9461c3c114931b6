//! The closed set of renderer verbs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::RequestError;

/// Verbs that may appear as the head of a directive in a style file.
///
/// A single-entry mapping whose key is not one of these is read as the
/// coastline shorthand (see [`crate::style`]).
pub const PARAM_VISDEF_VERBS: &[&str] = &["mcont", "mwind", "mcoast", "msymb", "mgraph"];

/// A renderer entry point.
///
/// Configuration stores verbs as free-form strings; they are checked against
/// this enum only when a request is built, so unknown verbs in unused styles
/// never fail a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderVerb {
    /// Contouring and shading
    Mcont,
    /// Wind arrows and flags
    Mwind,
    /// Coastlines, grid and map labels
    Mcoast,
    /// Symbol plotting
    Msymb,
    /// Curves and graphs
    Mgraph,
    /// Text annotation
    Mtext,
    /// Map view definition
    Geoview,
}

impl RenderVerb {
    /// All supported verbs.
    pub const ALL: [RenderVerb; 7] = [
        RenderVerb::Mcont,
        RenderVerb::Mwind,
        RenderVerb::Mcoast,
        RenderVerb::Msymb,
        RenderVerb::Mgraph,
        RenderVerb::Mtext,
        RenderVerb::Geoview,
    ];

    /// Returns the name of the backend function implementing this verb.
    pub fn as_str(self) -> &'static str {
        match self {
            RenderVerb::Mcont => "mcont",
            RenderVerb::Mwind => "mwind",
            RenderVerb::Mcoast => "mcoast",
            RenderVerb::Msymb => "msymb",
            RenderVerb::Mgraph => "mgraph",
            RenderVerb::Mtext => "mtext",
            RenderVerb::Geoview => "geoview",
        }
    }
}

impl FromStr for RenderVerb {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcont" => Ok(RenderVerb::Mcont),
            "mwind" => Ok(RenderVerb::Mwind),
            "mcoast" => Ok(RenderVerb::Mcoast),
            "msymb" => Ok(RenderVerb::Msymb),
            "mgraph" => Ok(RenderVerb::Mgraph),
            "mtext" => Ok(RenderVerb::Mtext),
            "geoview" => Ok(RenderVerb::Geoview),
            _ => Err(RequestError::UnsupportedVerb {
                verb: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RenderVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
