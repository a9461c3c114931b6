//! The style database: named styles plus ordered parameter rules.
//!
//! # Loading
//!
//! [`StyleDb::load`] walks the layers of a [`ConfigPaths`] in style order
//! (local, custom, system). For each directory:
//!
//! 1. If the styles file is absent the layer is skipped entirely, rules
//!    file included.
//! 2. Every style in the file is decoded and inserted, replacing an existing
//!    style of the same name.
//! 3. The three built-in defaults are added if still missing.
//! 4. Rules are appended in file order. Each style they name must already
//!    exist, or loading fails with [`ConfigError::UndefinedStyle`].
//!
//! # Resolution
//!
//! [`StyleDb::resolve`] scores every rule against the field and keeps the
//! first rule with the strictly highest non-zero score, so configuration
//! order breaks ties. A field no rule matches gets the scalar or vector
//! default.

use std::collections::HashMap;
use std::path::Path;

use serde_yaml::Value;

use crate::config::{
    parse_yaml, read_yaml, ConfigError, ConfigPaths, MAP_STYLE_FILE, PARAM_RULES_FILE,
    PARAM_STYLE_FILE,
};
use crate::field::ParamInfo;
use crate::rules::{PlotType, RuleRecord, StyleRule};
use crate::style::decode::decode_style;
use crate::style::Style;
use crate::visdef::{Params, Request, RequestError, Visdef};

/// Default style for scalar fields no rule matches.
pub const SCALAR_DEFAULT_STYLE_NAME: &str = "default_mcont";
/// Default style for vector fields no rule matches.
pub const VECTOR_DEFAULT_STYLE_NAME: &str = "default_mwind";
/// Default style for difference plots.
pub const DIFF_DEFAULT_STYLE_NAME: &str = "default_diff";
/// Style returned by [`StyleDb::get_style`] for unknown names, if defined.
pub const FALLBACK_STYLE_NAME: &str = "default";

const BUILTIN_DEFAULTS: [(&str, &str); 3] = [
    (SCALAR_DEFAULT_STYLE_NAME, "mcont"),
    (VECTOR_DEFAULT_STYLE_NAME, "mwind"),
    (DIFF_DEFAULT_STYLE_NAME, "mcont"),
];

/// Which style database to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Field styles with parameter rules
    Param,
    /// Map background styles, no rules
    Map,
}

impl DbKind {
    /// Name of the styles file in each layer.
    pub fn style_file(self) -> &'static str {
        match self {
            DbKind::Param => PARAM_STYLE_FILE,
            DbKind::Map => MAP_STYLE_FILE,
        }
    }

    /// Name of the rules file in each layer, if this kind has rules.
    pub fn rules_file(self) -> Option<&'static str> {
        match self {
            DbKind::Param => Some(PARAM_RULES_FILE),
            DbKind::Map => None,
        }
    }
}

/// Registry of named styles and parameter rules.
///
/// Built once by the application and passed to whatever needs styles.
/// Lookups hand out shared references; use [`Style::update`] for per-call
/// variants.
#[derive(Debug, Clone, Default)]
pub struct StyleDb {
    styles: HashMap<String, Style>,
    rules: Vec<StyleRule>,
}

impl StyleDb {
    /// Creates a database holding only the built-in defaults.
    pub fn new() -> Self {
        let mut db = Self::default();
        db.ensure_defaults();
        db
    }

    /// Loads a database of the given kind from all configured layers.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed files and on rules naming undefined
    /// styles.
    pub fn load(paths: &ConfigPaths, kind: DbKind) -> Result<Self, ConfigError> {
        let mut db = Self::default();
        for dir in paths.layers_for_styles() {
            db.load_layer(dir, kind)?;
        }
        db.ensure_defaults();
        tracing::debug!(
            ?kind,
            styles = db.styles.len(),
            rules = db.rules.len(),
            "Style database ready"
        );
        Ok(db)
    }

    /// Loads the parameter style database.
    pub fn param_db(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        Self::load(paths, DbKind::Param)
    }

    /// Loads the map style database.
    pub fn map_db(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        Self::load(paths, DbKind::Map)
    }

    /// Builds a database from in-memory YAML, as if it were one layer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use metstyle::StyleDb;
    ///
    /// let db = StyleDb::from_yaml("foo:\n  mcont: { a: 1 }\n", None).unwrap();
    /// let foo = db.style_by_name("foo").unwrap();
    /// assert_eq!(foo.visdefs()[0].verb(), "mcont");
    /// ```
    pub fn from_yaml(styles: &str, rules: Option<&str>) -> Result<Self, ConfigError> {
        let origin = Path::new("<inline>");
        let mut db = Self::default();
        db.load_styles(&parse_yaml(styles, origin)?, origin)?;
        if let Some(rules) = rules {
            db.load_rules(&parse_yaml(rules, origin)?, origin)?;
        }
        Ok(db)
    }

    fn load_layer(&mut self, dir: &Path, kind: DbKind) -> Result<(), ConfigError> {
        let style_path = dir.join(kind.style_file());
        let Some(styles) = read_yaml(&style_path)? else {
            tracing::debug!(path = %style_path.display(), "No styles file, skipping layer");
            return Ok(());
        };
        self.load_styles(&styles, &style_path)?;

        if let Some(rules_file) = kind.rules_file() {
            let rules_path = dir.join(rules_file);
            if let Some(rules) = read_yaml(&rules_path)? {
                self.load_rules(&rules, &rules_path)?;
            }
        }
        Ok(())
    }

    fn load_styles(&mut self, conf: &Value, path: &Path) -> Result<(), ConfigError> {
        let mut count = 0;
        match conf {
            Value::Null => {}
            Value::Mapping(map) => {
                for (name, entry) in map {
                    let name = name.as_str().ok_or_else(|| ConfigError::MalformedStyle {
                        name: format!("{name:?}"),
                        path: path.to_path_buf(),
                        reason: "style names must be strings".to_string(),
                    })?;
                    let visdefs =
                        decode_style(entry).map_err(|reason| ConfigError::MalformedStyle {
                            name: name.to_string(),
                            path: path.to_path_buf(),
                            reason,
                        })?;
                    self.styles
                        .insert(name.to_string(), Style::new(name, visdefs));
                    count += 1;
                }
            }
            _ => {
                return Err(ConfigError::MalformedStyle {
                    name: String::new(),
                    path: path.to_path_buf(),
                    reason: "a styles file must map style names to directives".to_string(),
                })
            }
        }
        self.ensure_defaults();
        tracing::debug!(path = %path.display(), styles = count, "Loaded styles");
        Ok(())
    }

    fn load_rules(&mut self, conf: &Value, path: &Path) -> Result<(), ConfigError> {
        let records = match conf {
            Value::Null => return Ok(()),
            Value::Sequence(seq) => seq,
            _ => {
                return Err(ConfigError::MalformedRule {
                    index: 0,
                    path: path.to_path_buf(),
                    reason: "a rules file must be a list of rules".to_string(),
                })
            }
        };

        for (index, record) in records.iter().enumerate() {
            let malformed = |reason: String| ConfigError::MalformedRule {
                index,
                path: path.to_path_buf(),
                reason,
            };
            let record: RuleRecord =
                serde_yaml::from_value(record.clone()).map_err(|e| malformed(e.to_string()))?;
            if record.conditions.is_empty() {
                return Err(malformed("rule has no match conditions".to_string()));
            }
            let rule = StyleRule::from_record(record);

            if let Some(missing) = rule
                .referenced_styles()
                .find(|name| !self.styles.contains_key(*name))
            {
                return Err(ConfigError::UndefinedStyle {
                    style: missing.to_string(),
                    rule: rule.to_string(),
                    path: path.to_path_buf(),
                });
            }
            self.rules.push(rule);
        }
        tracing::debug!(path = %path.display(), rules = records.len(), "Loaded parameter rules");
        Ok(())
    }

    fn ensure_defaults(&mut self) {
        for (name, verb) in BUILTIN_DEFAULTS {
            self.styles
                .entry(name.to_string())
                .or_insert_with(|| Style::new(name, vec![Visdef::new(verb, Params::new())]));
        }
    }

    /// Returns the style called `name`, or the `default` style if there is
    /// no such style.
    pub fn get_style(&self, name: &str) -> Option<&Style> {
        self.styles
            .get(name)
            .or_else(|| self.styles.get(FALLBACK_STYLE_NAME))
    }

    /// Returns the style called exactly `name`.
    pub fn style_by_name(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Resolves the style for a field.
    ///
    /// `plot_type` is `""` or `"map"`, `"diff"`, or `"xs"`/`"cross-section"`.
    /// Any other plot type yields `None` when a rule matches. A field no rule
    /// matches gets the scalar default if `is_scalar`, otherwise the vector
    /// default. A rule naming a style that is not in the database yields
    /// `None`.
    pub fn resolve(&self, field: &ParamInfo, is_scalar: bool, plot_type: &str) -> Option<&Style> {
        let Some(rule) = self.best_rule(field) else {
            return self.default_style(field, is_scalar);
        };
        let Some(plot_type) = PlotType::parse(plot_type) else {
            tracing::debug!(%field, plot_type, "Unsupported plot type");
            return None;
        };
        self.rule_style(field, rule, plot_type)
    }

    /// Resolves the style for a field with an already parsed plot type.
    pub fn resolve_for(
        &self,
        field: &ParamInfo,
        is_scalar: bool,
        plot_type: PlotType,
    ) -> Option<&Style> {
        match self.best_rule(field) {
            Some(rule) => self.rule_style(field, rule, plot_type),
            None => self.default_style(field, is_scalar),
        }
    }

    /// Resolves using the field's own scalar flag.
    pub fn style(&self, field: &ParamInfo, plot_type: &str) -> Option<&Style> {
        self.resolve(field, field.scalar, plot_type)
    }

    /// Resolves the field's style and builds its renderer calls.
    ///
    /// Returns `Ok(None)` when no style applies.
    pub fn visdef(
        &self,
        field: &ParamInfo,
        plot_type: &str,
    ) -> Result<Option<Vec<Request>>, RequestError> {
        self.style(field, plot_type)
            .map(Style::to_request)
            .transpose()
    }

    /// Returns the first rule with the highest non-zero score.
    pub fn best_rule(&self, field: &ParamInfo) -> Option<&StyleRule> {
        let mut best: Option<(&StyleRule, u32)> = None;
        for rule in &self.rules {
            let score = rule.score(field);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((rule, score));
            }
        }
        if let Some((rule, score)) = best {
            tracing::trace!(%field, score, %rule, "Matched parameter rule");
        }
        best.map(|(rule, _)| rule)
    }

    fn rule_style(
        &self,
        field: &ParamInfo,
        rule: &StyleRule,
        plot_type: PlotType,
    ) -> Option<&Style> {
        let name = rule.style_name(plot_type);
        let style = self.styles.get(name);
        tracing::trace!(
            %field,
            ?plot_type,
            style = name,
            found = style.is_some(),
            "Resolved style"
        );
        style
    }

    fn default_style(&self, field: &ParamInfo, is_scalar: bool) -> Option<&Style> {
        let name = if is_scalar {
            SCALAR_DEFAULT_STYLE_NAME
        } else {
            VECTOR_DEFAULT_STYLE_NAME
        };
        tracing::debug!(%field, style = name, "No rule matched, using default style");
        self.styles.get(name)
    }

    /// Returns the rules in load order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Returns all style names, sorted.
    pub fn style_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns true if no styles are registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
