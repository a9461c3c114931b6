//! Field metadata used for style matching.

use std::fmt;

/// Metadata describing one field: what it is and where it sits vertically.
///
/// This is the only view of a field the style engine needs. Callers build it
/// from whatever decoder they use for the data itself.
///
/// # Example
///
/// ```rust
/// use metstyle::ParamInfo;
///
/// let wind = ParamInfo::new("wind")
///     .with_level_type("pl")
///     .with_level(500.0)
///     .vector();
///
/// assert!(!wind.scalar);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    /// Parameter short name (e.g. `"t"`, `"msl"`, `"wind"`)
    pub name: String,
    /// Vertical level type (e.g. `"pl"`, `"ml"`, `"sfc"`)
    pub level_type: Option<String>,
    /// Level value within the level type
    pub level: Option<f64>,
    /// Whether the field is a scalar; vector fields fall back to the wind default
    pub scalar: bool,
}

impl ParamInfo {
    /// Creates metadata for a scalar field with no level information.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level_type: None,
            level: None,
            scalar: true,
        }
    }

    /// Sets the level type.
    pub fn with_level_type(mut self, level_type: impl Into<String>) -> Self {
        self.level_type = Some(level_type.into());
        self
    }

    /// Sets the level value.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = Some(level);
        self
    }

    /// Marks the field as a vector field.
    pub fn vector(mut self) -> Self {
        self.scalar = false;
        self
    }
}

impl fmt::Display for ParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(level_type) = &self.level_type {
            write!(f, "@{}", level_type)?;
        }
        if let Some(level) = self.level {
            write!(f, "/{}", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_scalar_without_level() {
        let info = ParamInfo::new("msl");
        assert!(info.scalar);
        assert_eq!(info.level_type, None);
        assert_eq!(info.level, None);
    }

    #[test]
    fn test_display() {
        let info = ParamInfo::new("t").with_level_type("pl").with_level(850.0);
        assert_eq!(info.to_string(), "t@pl/850");
        assert_eq!(ParamInfo::new("msl").to_string(), "msl");
    }
}
