//! Parameter style rules.

use std::fmt;

use serde::Deserialize;

use super::condition::MatchCondition;
use crate::db::{DIFF_DEFAULT_STYLE_NAME, SCALAR_DEFAULT_STYLE_NAME, VECTOR_DEFAULT_STYLE_NAME};
use crate::field::ParamInfo;

/// Whether a rule describes a scalar or a vector parameter.
///
/// Decides which built-in default a rule falls back to when it names no
/// map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Contoured or shaded field
    #[default]
    Scalar,
    /// Wind-like field drawn with arrows or flags
    Vector,
}

impl ParamKind {
    /// Style used when a rule of this kind names no map style.
    pub fn default_style_name(self) -> &'static str {
        match self {
            ParamKind::Scalar => SCALAR_DEFAULT_STYLE_NAME,
            ParamKind::Vector => VECTOR_DEFAULT_STYLE_NAME,
        }
    }
}

/// The rendering context that selects a style variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotType {
    /// Standard map plot (`""` or `"map"`)
    Map,
    /// Cross-section (`"xs"` or `"cross-section"`)
    CrossSection,
    /// Difference plot (`"diff"`)
    Diff,
}

impl PlotType {
    /// Parses a plot type name.
    ///
    /// Returns `None` for anything else; such plot types get no style.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "map" => Some(PlotType::Map),
            "xs" | "cross-section" => Some(PlotType::CrossSection),
            "diff" => Some(PlotType::Diff),
            _ => None,
        }
    }
}

/// Style names for one plot type: a single name or a list.
///
/// Only the first name of a list is ever used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StyleNames {
    One(String),
    Many(Vec<String>),
}

impl StyleNames {
    fn into_vec(self) -> Vec<String> {
        match self {
            StyleNames::One(name) => vec![name],
            StyleNames::Many(names) => names,
        }
    }
}

/// One record of a parameter rules file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RuleRecord {
    #[serde(rename = "match")]
    pub(crate) conditions: Vec<MatchCondition>,
    #[serde(default)]
    pub(crate) param_type: ParamKind,
    #[serde(default)]
    pub(crate) styles: Option<StyleNames>,
    #[serde(default)]
    pub(crate) xs_styles: Option<StyleNames>,
    #[serde(default)]
    pub(crate) diff_styles: Option<StyleNames>,
}

/// A parameter rule: OR'd conditions plus style names per plot type.
///
/// Unset style lists fall back to defaults when a name is asked for:
///
/// - map styles default to the [`ParamKind`] default
/// - cross-section styles default to the map styles
/// - diff styles default to [`DIFF_DEFAULT_STYLE_NAME`]
///
/// An empty list counts as unset.
///
/// # Example
///
/// ```rust
/// use metstyle::{MatchCondition, ParamKind, PlotType, StyleRule};
///
/// let rule = StyleRule::new(vec![MatchCondition::new("wind")])
///     .with_kind(ParamKind::Vector)
///     .with_xs_styles(["flag_blue"]);
///
/// assert_eq!(rule.style_name(PlotType::Map), "default_mwind");
/// assert_eq!(rule.style_name(PlotType::CrossSection), "flag_blue");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    conditions: Vec<MatchCondition>,
    kind: ParamKind,
    styles: Vec<String>,
    xs_styles: Vec<String>,
    diff_styles: Vec<String>,
}

impl StyleRule {
    /// Creates a scalar rule with no style names set.
    pub fn new(conditions: Vec<MatchCondition>) -> Self {
        Self {
            conditions,
            kind: ParamKind::Scalar,
            styles: Vec::new(),
            xs_styles: Vec::new(),
            diff_styles: Vec::new(),
        }
    }

    /// Sets the parameter kind.
    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the map style names.
    pub fn with_styles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cross-section style names.
    pub fn with_xs_styles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xs_styles = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the difference style names.
    pub fn with_diff_styles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diff_styles = names.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn from_record(record: RuleRecord) -> Self {
        let names = |n: Option<StyleNames>| n.map(StyleNames::into_vec).unwrap_or_default();
        Self::new(record.conditions)
            .with_kind(record.param_type)
            .with_styles(names(record.styles))
            .with_xs_styles(names(record.xs_styles))
            .with_diff_styles(names(record.diff_styles))
    }

    /// Returns the best score over all conditions, 0 if none match.
    pub fn score(&self, field: &ParamInfo) -> u32 {
        self.conditions
            .iter()
            .map(|c| c.score(field))
            .max()
            .unwrap_or(0)
    }

    /// Returns the style name to use for `plot_type`.
    ///
    /// Only the first name of a list is used.
    pub fn style_name(&self, plot_type: PlotType) -> &str {
        let map = || {
            self.styles
                .first()
                .map_or(self.kind.default_style_name(), String::as_str)
        };
        match plot_type {
            PlotType::Map => map(),
            PlotType::CrossSection => self
                .xs_styles
                .first()
                .map_or_else(map, String::as_str),
            PlotType::Diff => self
                .diff_styles
                .first()
                .map_or(DIFF_DEFAULT_STYLE_NAME, String::as_str),
        }
    }

    /// Iterates over every style name this rule refers to, defaults included.
    pub fn referenced_styles(&self) -> impl Iterator<Item = &str> {
        let listed = self
            .styles
            .iter()
            .chain(&self.xs_styles)
            .chain(&self.diff_styles)
            .map(String::as_str);
        let resolved = [PlotType::Map, PlotType::CrossSection, PlotType::Diff]
            .into_iter()
            .map(move |plot_type| self.style_name(plot_type));
        listed.chain(resolved)
    }

    /// Returns the alternative conditions.
    pub fn conditions(&self) -> &[MatchCondition] {
        &self.conditions
    }

    /// Returns the parameter kind.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "info_name={}", c.info_name)?;
            if let Some(level_type) = &c.level_type {
                write!(f, ",level_type={}", level_type)?;
            }
            if !c.levels.is_empty() {
                write!(f, ",levels={:?}", c.levels)?;
            }
        }
        write!(f, "] styles={:?}", self.styles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_rule() -> StyleRule {
        StyleRule::new(vec![MatchCondition::new("t")])
    }

    #[test]
    fn test_plot_type_parse() {
        assert_eq!(PlotType::parse(""), Some(PlotType::Map));
        assert_eq!(PlotType::parse("map"), Some(PlotType::Map));
        assert_eq!(PlotType::parse("diff"), Some(PlotType::Diff));
        assert_eq!(PlotType::parse("xs"), Some(PlotType::CrossSection));
        assert_eq!(PlotType::parse("cross-section"), Some(PlotType::CrossSection));
        assert_eq!(PlotType::parse("stamp"), None);
        assert_eq!(PlotType::parse("MAP"), None);
    }

    #[test]
    fn test_defaults() {
        let r = t_rule();
        assert_eq!(r.kind(), ParamKind::Scalar);
        assert_eq!(r.style_name(PlotType::Map), SCALAR_DEFAULT_STYLE_NAME);
        assert_eq!(r.style_name(PlotType::CrossSection), SCALAR_DEFAULT_STYLE_NAME);
        assert_eq!(r.style_name(PlotType::Diff), DIFF_DEFAULT_STYLE_NAME);
    }

    #[test]
    fn test_vector_kind_default() {
        let r = t_rule().with_kind(ParamKind::Vector);
        assert_eq!(r.style_name(PlotType::Map), VECTOR_DEFAULT_STYLE_NAME);
        assert_eq!(r.style_name(PlotType::CrossSection), VECTOR_DEFAULT_STYLE_NAME);
    }

    #[test]
    fn test_builders_set_each_plot_type() {
        let r = t_rule()
            .with_styles(["ct_t"])
            .with_xs_styles(["xs_t"])
            .with_diff_styles(["diff_t"]);
        assert_eq!(r.style_name(PlotType::Map), "ct_t");
        assert_eq!(r.style_name(PlotType::CrossSection), "xs_t");
        assert_eq!(r.style_name(PlotType::Diff), "diff_t");
    }

    #[test]
    fn test_xs_falls_back_to_styles() {
        let r = t_rule().with_styles(["sh_t", "ct_t"]);
        assert_eq!(r.style_name(PlotType::CrossSection), "sh_t");
    }

    #[test]
    fn test_only_first_name_used() {
        let r = t_rule()
            .with_styles(["first", "second"])
            .with_xs_styles(["xs_first", "xs_second"]);
        assert_eq!(r.style_name(PlotType::Map), "first");
        assert_eq!(r.style_name(PlotType::CrossSection), "xs_first");
    }

    #[test]
    fn test_empty_list_is_unset() {
        let r = t_rule().with_styles(Vec::<String>::new());
        assert_eq!(r.style_name(PlotType::Map), SCALAR_DEFAULT_STYLE_NAME);
    }

    #[test]
    fn test_score_is_best_alternative() {
        let r = StyleRule::new(vec![
            MatchCondition::new("z"),
            MatchCondition::new("t").with_level_type("pl"),
            MatchCondition::new("t"),
        ]);
        let field = ParamInfo::new("t").with_level_type("pl");
        assert_eq!(r.score(&field), 3);
        assert_eq!(r.score(&ParamInfo::new("q")), 0);
    }

    #[test]
    fn test_referenced_styles() {
        let r = t_rule().with_styles(["a"]).with_xs_styles(["b"]);
        let refs: Vec<&str> = r.referenced_styles().collect();
        assert_eq!(refs, ["a", "b", "a", "b", DIFF_DEFAULT_STYLE_NAME]);
    }

    #[test]
    fn test_record_accepts_single_names() {
        let record: RuleRecord = serde_yaml::from_str(
            "match:\n  - info_name: wind\nparam_type: vector\nstyles: arrow_black\n",
        )
        .unwrap();
        let r = StyleRule::from_record(record);
        assert_eq!(r.kind(), ParamKind::Vector);
        assert_eq!(r.style_name(PlotType::Map), "arrow_black");
        assert_eq!(r.style_name(PlotType::Diff), DIFF_DEFAULT_STYLE_NAME);
    }

    #[test]
    fn test_display() {
        let r = StyleRule::new(vec![MatchCondition::new("t").with_level_type("pl")])
            .with_styles(["ct_t"]);
        assert_eq!(r.to_string(), "[info_name=t,level_type=pl] styles=[\"ct_t\"]");
    }
}
