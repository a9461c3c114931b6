//! Decoding style file entries into directives.
//!
//! A style file maps style names to one of two shapes:
//!
//! ```yaml
//! # a list of single-key verb mappings, rendered in order
//! t_shaded:
//!   - mcont: { contour_shade: "on" }
//!   - mcont: { contour_line_colour: black }
//!
//! # a single directive, with or without the verb
//! msl_black:
//!   mcont: { contour_line_colour: black }
//! grey_coast:
//!   map_coastline_colour: grey
//!   map_grid: "off"
//! ```
//!
//! Precedence, checked once per entry:
//!
//! 1. A single mapping (bare, or the only list element) with more than one
//!    key, no keys at all, or a key that is not in [`PARAM_VISDEF_VERBS`]
//!    is the coastline shorthand: the whole mapping becomes the parameters
//!    of one `mcoast` directive.
//! 2. Otherwise every element must be a single-key `verb: params` mapping.

use serde_yaml::{Mapping, Value};

use crate::visdef::{Params, Visdef, PARAM_VISDEF_VERBS};

/// Verb used for entries written without one.
pub(crate) const SHORTHAND_VERB: &str = "mcoast";

/// Decodes one style file entry into its ordered directives.
///
/// On failure returns a short reason; the caller attaches style name and file.
pub(crate) fn decode_style(entry: &Value) -> Result<Vec<Visdef>, String> {
    let items: Vec<&Value> = match entry {
        Value::Sequence(seq) => seq.iter().collect(),
        other => vec![other],
    };

    if let [Value::Mapping(map)] = items.as_slice() {
        if is_shorthand(map) {
            return Ok(vec![Visdef::new(SHORTHAND_VERB, to_params(map)?)]);
        }
    }

    items.into_iter().map(decode_directive).collect()
}

fn is_shorthand(map: &Mapping) -> bool {
    if map.len() != 1 {
        return true;
    }
    match map.keys().next().and_then(Value::as_str) {
        Some(key) => !PARAM_VISDEF_VERBS.contains(&key),
        None => true,
    }
}

fn decode_directive(item: &Value) -> Result<Visdef, String> {
    let map = item
        .as_mapping()
        .ok_or_else(|| format!("expected a 'verb: params' mapping, found {}", kind(item)))?;
    let mut entries = map.iter();
    let (verb, params) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(format!(
                "a directive must have exactly one verb, found {} keys",
                map.len()
            ))
        }
    };
    let verb = verb
        .as_str()
        .ok_or_else(|| format!("directive verb must be a string, found {}", kind(verb)))?;
    let params = match params {
        Value::Mapping(m) => to_params(m)?,
        Value::Null => Params::new(),
        other => {
            return Err(format!(
                "parameters of '{}' must be a mapping, found {}",
                verb,
                kind(other)
            ))
        }
    };
    Ok(Visdef::new(verb, params))
}

/// Converts a YAML mapping into directive parameters.
pub(crate) fn to_params(map: &Mapping) -> Result<Params, String> {
    map.iter()
        .map(|(k, v)| {
            let key = k
                .as_str()
                .ok_or_else(|| format!("parameter names must be strings, found {}", kind(k)))?;
            Ok((key.to_string(), v.clone()))
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
