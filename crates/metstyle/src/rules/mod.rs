//! Rules that map field metadata to style names.
//!
//! - [`MatchCondition`]: one filter on name, level type and levels, with a score
//! - [`StyleRule`]: alternative conditions plus style names per [`PlotType`]
//!
//! A rule matches as well as its best condition. The [`StyleDb`](crate::StyleDb)
//! picks the highest-scoring rule, keeping the earliest on ties.

mod condition;
mod rule;

pub use condition::{MatchCondition, LEVELS_SCORE, LEVEL_TYPE_SCORE, NAME_SCORE};
pub(crate) use rule::RuleRecord;
pub use rule::{ParamKind, PlotType, StyleRule};
