//! Visual directives: one rendering verb with its parameters.
//!
//! This module provides:
//!
//! - [`Visdef`]: a verb plus its parameter mapping, as read from configuration
//! - [`RenderVerb`]: the closed set of renderer entry points
//! - [`Request`]: a renderer call built from a directive
//! - [`Backend`]: the boundary to the native plotting library
//!
//! Directives keep their verb as the string found in configuration. It is
//! checked only by [`Visdef::to_request`], so a style that is never
//! rendered may carry a verb no renderer knows.

mod error;
mod request;
mod verb;

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

pub use error::{BackendError, RequestError};
pub use request::{Arg, Backend, CallResult, FieldsetHandle, ParamArg, Reply, Request};
pub use verb::{RenderVerb, PARAM_VISDEF_VERBS};

/// Parameter mapping of a directive, keyed by parameter name.
pub type Params = BTreeMap<String, Value>;

/// One rendering instruction.
///
/// `Clone` is a deep copy: the parameter map and every value in it are
/// owned, so mutating a clone never touches the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Visdef {
    verb: String,
    params: Params,
}

impl Visdef {
    /// Creates a directive. The verb is not validated here.
    pub fn new(verb: impl Into<String>, params: Params) -> Self {
        Self {
            verb: verb.into(),
            params,
        }
    }

    /// Returns the verb as written in configuration.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Returns the parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the parameters for modification.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Sets `param` to `value` if this directive's verb is `verb`.
    pub fn change(&mut self, verb: &str, param: &str, value: impl Into<Value>) {
        if verb == self.verb {
            self.params.insert(param.to_string(), value.into());
        }
    }

    /// Replaces the text list of a text-mode symbol directive.
    ///
    /// Only applies to `msymb` directives whose `symbol_type` is `text`.
    pub fn change_symbol_text_list(&mut self, value: impl Into<Value>) {
        if self.verb != "msymb" {
            return;
        }
        let is_text = self
            .params
            .get("symbol_type")
            .and_then(Value::as_str)
            .is_some_and(|t| t.eq_ignore_ascii_case("text"));
        if is_text {
            self.params
                .insert("symbol_text_list".to_string(), value.into());
        }
    }

    /// Merges `overrides` into the parameters, lowercasing their keys.
    pub(crate) fn merge_lowercase(&mut self, overrides: &Params) {
        for (key, value) in overrides {
            self.params.insert(key.to_lowercase(), value.clone());
        }
    }

    /// Builds the renderer call for this directive.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnsupportedVerb`] if the verb has no renderer.
    pub fn to_request(&self) -> Result<Request, RequestError> {
        let verb: RenderVerb = self.verb.parse()?;
        Ok(Request::from_params(verb, &self.params))
    }
}

impl fmt::Display for Visdef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visdef[verb={}, params={{", self.verb)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, display_value(value))?;
        }
        f.write_str("}]")
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
