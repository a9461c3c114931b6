//! Geographic areas known to the plotting backend by name.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Areas the backend can draw from `area_mode: name` alone.
pub const BUILTIN_AREAS: &[&str] = &[
    "ANTARCTIC",
    "ARCTIC",
    "AUSTRALASIA",
    "CENTRAL_AMERICA",
    "CENTRAL_EUROPE",
    "EAST_TROPIC",
    "EASTERN_ASIA",
    "EQUATORIAL_PACIFIC",
    "EURASIA",
    "EUROPE",
    "GLOBAL",
    "MIDDLE_EAST_AND_INDIA",
    "NORTH_AMERICA",
    "NORTH_ATLANTIC",
    "NORTH_EAST_EUROPE",
    "NORTH_POLE",
    "NORTH_WEST_EUROPE",
    "NORTHERN_AFRICA",
    "PACIFIC",
    "SOUTH_AMERICA",
    "SOUTH_ATLANTIC_AND_INDIAN_OCEAN",
    "SOUTH_EAST_ASIA_AND_INDONESIA",
    "SOUTH_EAST_EUROPE",
    "SOUTH_POLE",
    "SOUTH_WEST_EUROPE",
    "SOUTHERN_AFRICA",
    "SOUTHERN_ASIA",
    "WEST_TROPIC",
    "WESTERN_ASIA",
];

static BUILTIN_AREA_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BUILTIN_AREAS.iter().copied().collect());

/// Returns true if `name`, upper-cased, is a built-in area.
pub fn is_builtin_area(name: &str) -> bool {
    BUILTIN_AREA_SET.contains(name.to_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_area_case_insensitive() {
        assert!(is_builtin_area("GLOBAL"));
        assert!(is_builtin_area("north_atlantic"));
        assert!(is_builtin_area("Europe"));
    }

    #[test]
    fn test_unknown_area() {
        assert!(!is_builtin_area("base"));
        assert!(!is_builtin_area(""));
    }
}
