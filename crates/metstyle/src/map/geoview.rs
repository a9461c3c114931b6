//! Map views: area parameters plus a coastline style.

use std::fmt;

use crate::style::Style;
use crate::visdef::{ParamArg, Params, RenderVerb, Request, RequestError};

/// Argument of the geoview request that carries the coastline requests.
pub const COASTLINES_PARAM: &str = "coastlines";

/// A map projection context ready to be rendered.
///
/// Coastlines always come from the resolved style. A `coastlines` key in
/// the area parameters (any case) is dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoView {
    params: Params,
    style: Option<Style>,
}

impl GeoView {
    /// Creates a view from area parameters and an optional coastline style.
    pub fn new(mut params: Params, style: Option<Style>) -> Self {
        params.retain(|key, _| !key.eq_ignore_ascii_case(COASTLINES_PARAM));
        Self { params, style }
    }

    /// Returns the area parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the coastline style.
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// Builds the `geoview` request, nesting the style's requests under
    /// `coastlines` when a style is set.
    pub fn to_request(&self) -> Result<Request, RequestError> {
        let mut request = Request::from_params(RenderVerb::Geoview, &self.params);
        if let Some(style) = &self.style {
            request.set(COASTLINES_PARAM, ParamArg::Requests(style.to_request()?));
        }
        Ok(request)
    }
}

impl fmt::Display for GeoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoView[params={:?}, style=", self.params.keys().collect::<Vec<_>>())?;
        match &self.style {
            Some(style) => write!(f, "{}]", style.name()),
            None => f.write_str("none]"),
        }
    }
}
