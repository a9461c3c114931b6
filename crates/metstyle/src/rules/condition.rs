//! Match conditions and specificity scoring.

use serde::{de, Deserialize, Deserializer};

use crate::field::ParamInfo;

/// Score contributed by a matching parameter name.
pub const NAME_SCORE: u32 = 1;
/// Score added when a level type filter is present and matches.
pub const LEVEL_TYPE_SCORE: u32 = 2;
/// Score added when a level list filter is present and matches.
pub const LEVELS_SCORE: u32 = 4;

/// One filter of a parameter rule.
///
/// Read from a `match` entry of the rules file:
///
/// ```yaml
/// - info_name: t
///   level_type: pl
///   levels: [850, 500]
/// ```
///
/// `levels` may also be a single value; it is stored as a one-element list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MatchCondition {
    /// Parameter short name; an empty name never matches
    #[serde(default)]
    pub info_name: String,
    /// Required level type, if any
    #[serde(default)]
    pub level_type: Option<String>,
    /// Accepted levels; empty accepts any level
    #[serde(default, deserialize_with = "one_or_many_levels")]
    pub levels: Vec<f64>,
}

impl MatchCondition {
    /// Creates a condition on the parameter name only.
    pub fn new(info_name: impl Into<String>) -> Self {
        Self {
            info_name: info_name.into(),
            ..Self::default()
        }
    }

    /// Adds a level type filter.
    pub fn with_level_type(mut self, level_type: impl Into<String>) -> Self {
        self.level_type = Some(level_type.into());
        self
    }

    /// Adds a level filter.
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = f64>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    /// Scores how precisely `field` satisfies this condition.
    ///
    /// | Filter | Absent | Present, matches | Present, differs |
    /// |--------|--------|------------------|------------------|
    /// | name | no match | [`NAME_SCORE`] | no match |
    /// | level type | +0 | +[`LEVEL_TYPE_SCORE`] | no match |
    /// | levels | +0 | +[`LEVELS_SCORE`] | no match |
    ///
    /// Returns 0 for no match. The weights are tiered so that a condition
    /// with more filters always outranks one with fewer.
    pub fn score(&self, field: &ParamInfo) -> u32 {
        if self.info_name.is_empty() || self.info_name != field.name {
            return 0;
        }
        let mut score = NAME_SCORE;

        if let Some(level_type) = &self.level_type {
            if field.level_type.as_deref() != Some(level_type.as_str()) {
                return 0;
            }
            score += LEVEL_TYPE_SCORE;
        }

        if !self.levels.is_empty() {
            match field.level {
                Some(level) if self.levels.contains(&level) => score += LEVELS_SCORE,
                _ => return 0,
            }
        }

        score
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelsRepr {
    One(LevelRepr),
    Many(Vec<LevelRepr>),
}

fn one_or_many_levels<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = match LevelsRepr::deserialize(deserializer)? {
        LevelsRepr::One(level) => vec![level],
        LevelsRepr::Many(levels) => levels,
    };
    repr.into_iter()
        .map(|level| match level {
            LevelRepr::Number(n) => Ok(n),
            LevelRepr::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid level '{}'", s))),
        })
        .collect()
}
