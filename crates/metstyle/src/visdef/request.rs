//! Renderer requests and the backend call boundary.
//!
//! A [`Request`] is a verb plus named arguments. It is the only thing the
//! style engine hands to the rendering side; submitting one goes through
//! the [`Backend`] trait, which stands in for the native library bridge.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::Value;

use super::error::{BackendError, RequestError};
use super::verb::RenderVerb;
use super::Params;

/// One named argument of a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamArg {
    /// A plain configuration value
    Value(Value),
    /// Nested requests (e.g. the coastlines of a geoview)
    Requests(Vec<Request>),
}

impl From<Value> for ParamArg {
    fn from(value: Value) -> Self {
        ParamArg::Value(value)
    }
}

/// A renderer call: `verb(**params)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    verb: RenderVerb,
    params: BTreeMap<String, ParamArg>,
}

impl Request {
    /// Creates a request with no arguments.
    pub fn new(verb: RenderVerb) -> Self {
        Self {
            verb,
            params: BTreeMap::new(),
        }
    }

    /// Creates a request whose arguments are copied from `params`.
    pub fn from_params(verb: RenderVerb, params: &Params) -> Self {
        Self {
            verb,
            params: params
                .iter()
                .map(|(k, v)| (k.clone(), ParamArg::Value(v.clone())))
                .collect(),
        }
    }

    /// Sets one named argument, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, arg: impl Into<ParamArg>) {
        self.params.insert(name.into(), arg.into());
    }

    /// Returns the verb.
    pub fn verb(&self) -> RenderVerb {
        self.verb
    }

    /// Returns a named argument.
    pub fn get(&self, name: &str) -> Option<&ParamArg> {
        self.params.get(name)
    }

    /// Returns all arguments ordered by name.
    pub fn params(&self) -> &BTreeMap<String, ParamArg> {
        &self.params
    }

    /// Sends this request to the backend as `verb(request)`.
    ///
    /// The result is passed through untouched.
    pub fn submit(&self, backend: &mut dyn Backend) -> Result<CallResult, RequestError> {
        tracing::trace!(verb = %self.verb, args = self.params.len(), "Submitting request");
        let result = backend.call(self.verb.as_str(), vec![Arg::Request(self.clone())])?;
        Ok(result)
    }
}

/// Opaque reference to a fieldset held by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldsetHandle(pub String);

/// A request returned by the backend, with values already stringified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    /// Verb of the returned request
    pub verb: String,
    /// Named values of the returned request
    pub values: BTreeMap<String, String>,
}

/// A positional argument for a backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A numeric argument
    Number(f64),
    /// A string argument
    Str(String),
    /// A fieldset already held by the backend
    Fieldset(FieldsetHandle),
    /// A renderer request
    Request(Request),
}

/// The value a backend call produces.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// The call returned a number
    Number(f64),
    /// The call returned a string
    Str(String),
    /// The call returned a fieldset
    Fieldset(FieldsetHandle),
    /// The call returned a request
    Request(Reply),
}

/// The external rendering bridge.
///
/// Implementations forward `function(args...)` to the plotting library and
/// report what it returned. The style engine never inspects the result.
pub trait Backend {
    /// Calls a backend function by name.
    fn call(&mut self, function: &str, args: Vec<Arg>) -> Result<CallResult, BackendError>;
}
