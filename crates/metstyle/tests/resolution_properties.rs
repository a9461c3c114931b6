//! Property tests for rule precedence and copy-on-write styles.

use metstyle::{
    MatchCondition, ParamInfo, ParamKind, Params, Style, StyleDb, Value, Visdef,
    SCALAR_DEFAULT_STYLE_NAME, VECTOR_DEFAULT_STYLE_NAME,
};
use proptest::prelude::*;

const NAMES: &[&str] = &["t", "z", "msl", "q"];
const LEVEL_TYPES: &[&str] = &["pl", "ml", "sfc"];
const LEVELS: &[f64] = &[1000.0, 850.0, 500.0];

/// A rule generated as (name, optional level type, optional level).
type RuleSpec = (usize, Option<usize>, Option<usize>);

fn rule_spec() -> impl Strategy<Value = RuleSpec> {
    (
        0..NAMES.len(),
        proptest::option::of(0..LEVEL_TYPES.len()),
        proptest::option::of(0..LEVELS.len()),
    )
}

fn field() -> impl Strategy<Value = ParamInfo> {
    (0..NAMES.len(), 0..LEVEL_TYPES.len(), 0..LEVELS.len()).prop_map(|(n, t, l)| {
        ParamInfo::new(NAMES[n])
            .with_level_type(LEVEL_TYPES[t])
            .with_level(LEVELS[l])
    })
}

fn condition((name, level_type, level): RuleSpec) -> MatchCondition {
    let mut cond = MatchCondition::new(NAMES[name]);
    if let Some(t) = level_type {
        cond = cond.with_level_type(LEVEL_TYPES[t]);
    }
    if let Some(l) = level {
        cond = cond.with_levels([LEVELS[l]]);
    }
    cond
}

/// Builds a database where rule `i` resolves to style `rule_i`.
fn build_db(specs: &[RuleSpec]) -> StyleDb {
    let mut styles = String::new();
    let mut rules = String::new();
    for (i, (name, level_type, level)) in specs.iter().enumerate() {
        styles.push_str(&format!("rule_{i}:\n  mcont: {{}}\n"));
        rules.push_str(&format!("- match:\n    - info_name: {}\n", NAMES[*name]));
        if let Some(t) = level_type {
            rules.push_str(&format!("      level_type: {}\n", LEVEL_TYPES[*t]));
        }
        if let Some(l) = level {
            rules.push_str(&format!("      levels: {}\n", LEVELS[*l]));
        }
        rules.push_str(&format!("  styles: [rule_{i}]\n"));
    }
    StyleDb::from_yaml(&styles, Some(&rules)).unwrap()
}

fn overrides(key: &str, value: i64) -> Params {
    let mut params = Params::new();
    params.insert(key.to_string(), Value::from(value));
    params
}

proptest! {
    #[test]
    fn resolution_picks_first_highest_score(
        specs in proptest::collection::vec(rule_spec(), 1..8),
        field in field()
    ) {
        let db = build_db(&specs);
        let scores: Vec<u32> = specs.iter().map(|s| condition(*s).score(&field)).collect();
        let best = scores.iter().copied().max().unwrap_or(0);

        let resolved = db.resolve(&field, true, "map").map(Style::name);
        if best == 0 {
            prop_assert_eq!(resolved, Some(SCALAR_DEFAULT_STYLE_NAME));
        } else {
            let winner = scores.iter().position(|&s| s == best).unwrap();
            let expected = format!("rule_{winner}");
            prop_assert_eq!(resolved, Some(expected.as_str()));
        }
    }

    #[test]
    fn unmatched_fields_get_kind_default(field in field(), scalar in any::<bool>()) {
        let db = StyleDb::new();
        let expected = if scalar {
            SCALAR_DEFAULT_STYLE_NAME
        } else {
            VECTOR_DEFAULT_STYLE_NAME
        };
        prop_assert_eq!(db.resolve(&field, scalar, "map").map(Style::name), Some(expected));
    }

    #[test]
    fn specific_condition_beats_name_only(field in field()) {
        let specific = MatchCondition::new(field.name.clone())
            .with_level_type(field.level_type.clone().unwrap())
            .with_levels(field.level);
        let general = MatchCondition::new(field.name.clone());
        prop_assert!(specific.score(&field) > general.score(&field));
        prop_assert!(general.score(&field) > 0);
    }

    #[test]
    fn update_never_touches_base(a in any::<i64>(), b in any::<i64>(), n in 1usize..4) {
        let base = Style::new(
            "base",
            (0..n).map(|_| Visdef::new("mcont", overrides("contour_interval", 5))).collect(),
        );
        let snapshot = base.clone();

        let first = base.update(&[overrides("CONTOUR_INTERVAL", a)]);
        let second = base.update(&[overrides("contour_interval", b)]);

        prop_assert_eq!(&base, &snapshot);
        prop_assert_eq!(
            first.visdefs()[0].params().get("contour_interval"),
            Some(&Value::from(a))
        );
        prop_assert_eq!(
            second.visdefs()[0].params().get("contour_interval"),
            Some(&Value::from(b))
        );
    }

    #[test]
    fn cloned_visdef_is_independent(key in "[a-z_]{1,12}", value in any::<i64>()) {
        let original = Visdef::new("mwind", overrides("wind_thinning_factor", 2));
        let mut copy = original.clone();
        copy.params_mut().insert(key, Value::from(value));
        copy.params_mut().remove("wind_thinning_factor");

        prop_assert_eq!(original.params(), &overrides("wind_thinning_factor", 2));
    }
}

#[test]
fn vector_rule_kind_is_recorded() {
    let db = StyleDb::from_yaml(
        "arrows:\n  mwind: {}\n",
        Some("- match: [{info_name: wind}]\n  param_type: vector\n  styles: [arrows]\n"),
    )
    .unwrap();
    assert_eq!(db.rules()[0].kind(), ParamKind::Vector);
}
