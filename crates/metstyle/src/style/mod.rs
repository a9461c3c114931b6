//! Named styles: ordered bundles of rendering directives.
//!
//! A [`Style`] is built once when configuration is loaded and owned by a
//! [`StyleDb`](crate::StyleDb). Per-call tweaks go through
//! [`Style::update`], which works on a copy, so the registry's styles stay
//! as configured. [`Style::update_in_place`] is for styles the caller
//! already owns.

pub(crate) mod decode;

use std::fmt;

use crate::visdef::{Params, Request, RequestError, Visdef};

/// A named, ordered list of directives. Order is render order.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    name: String,
    visdefs: Vec<Visdef>,
}

impl Style {
    /// Creates a style from its directives.
    pub fn new(name: impl Into<String>, visdefs: Vec<Visdef>) -> Self {
        Self {
            name: name.into(),
            visdefs,
        }
    }

    /// Returns the style name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the directives in render order.
    pub fn visdefs(&self) -> &[Visdef] {
        &self.visdefs
    }

    /// Returns the directives for modification.
    pub fn visdefs_mut(&mut self) -> &mut [Visdef] {
        &mut self.visdefs
    }

    /// Returns a copy with positional parameter overrides applied.
    ///
    /// The i-th override is merged into the i-th directive; keys are
    /// lowercased. Overrides beyond the number of directives are ignored.
    /// `self` is never modified.
    ///
    /// # Example
    ///
    /// ```rust
    /// use metstyle::{Params, Style, Value, Visdef};
    ///
    /// let base = Style::new("coast", vec![Visdef::new("mcoast", Params::new())]);
    /// let mut off = Params::new();
    /// off.insert("MAP_GRID".into(), Value::from("off"));
    ///
    /// let stamp = base.update(&[off]);
    /// assert_eq!(stamp.visdefs()[0].params().get("map_grid"), Some(&Value::from("off")));
    /// assert!(base.visdefs()[0].params().is_empty());
    /// ```
    pub fn update(&self, overrides: &[Params]) -> Style {
        let mut style = self.clone();
        style.update_in_place(overrides);
        style
    }

    /// Applies positional parameter overrides to this style itself.
    ///
    /// Same merge rules as [`Style::update`].
    pub fn update_in_place(&mut self, overrides: &[Params]) -> &mut Self {
        for (visdef, params) in self.visdefs.iter_mut().zip(overrides) {
            visdef.merge_lowercase(params);
        }
        self
    }

    /// Builds one renderer call per directive, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first directive whose verb has no renderer.
    pub fn to_request(&self) -> Result<Vec<Request>, RequestError> {
        self.visdefs.iter().map(Visdef::to_request).collect()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Style[name={}]", self.name)?;
        for vd in &self.visdefs {
            write!(f, " {}", vd)?;
        }
        Ok(())
    }
}
