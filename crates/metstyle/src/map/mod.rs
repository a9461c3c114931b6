//! Map areas and map background styles.
//!
//! [`MapConfig`] owns a map [`StyleDb`] and the named areas from
//! `areas.yaml`, and combines the two into a [`GeoView`].
//!
//! An area file is a list of single-key mappings:
//!
//! ```yaml
//! - base:
//!     map_projection: cylindrical
//! - europe:
//!     area_mode: name
//!     area_name: europe
//! ```
//!
//! Areas load system first, then custom, then local, so a local definition
//! replaces a system one of the same name.

mod areas;
mod geoview;

use std::collections::HashMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::config::{parse_yaml, read_yaml, ConfigError, ConfigPaths, AREAS_FILE};
use crate::db::StyleDb;
use crate::style::decode::to_params;
use crate::style::Style;
use crate::visdef::{Params, RenderVerb};

pub use areas::{is_builtin_area, BUILTIN_AREAS};
pub use geoview::{GeoView, COASTLINES_PARAM};

/// Area used when none is requested.
pub const DEFAULT_AREA_NAME: &str = "base";
/// Map style used when none is requested.
pub const DEFAULT_MAP_STYLE_NAME: &str = "grey_light_base";
/// Plot type whose views have grid and labels switched off.
pub const STAMP_PLOT_TYPE: &str = "stamp";

/// Map styles plus named areas.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    style_db: StyleDb,
    areas: HashMap<String, Params>,
}

impl MapConfig {
    /// Creates a configuration from an existing map style database, with no
    /// areas.
    pub fn new(style_db: StyleDb) -> Self {
        Self {
            style_db,
            areas: HashMap::new(),
        }
    }

    /// Loads map styles and areas from all configured layers.
    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let mut config = Self::new(StyleDb::map_db(paths)?);
        for dir in paths.layers_for_areas() {
            let path = dir.join(AREAS_FILE);
            if let Some(conf) = read_yaml(&path)? {
                config.load_areas(&conf, &path)?;
            }
        }
        tracing::debug!(areas = config.areas.len(), "Map configuration ready");
        Ok(config)
    }

    /// Adds areas from in-memory YAML, replacing areas of the same name.
    pub fn add_areas_from_yaml(&mut self, text: &str) -> Result<(), ConfigError> {
        let origin = Path::new("<inline>");
        self.load_areas(&parse_yaml(text, origin)?, origin)
    }

    fn load_areas(&mut self, conf: &Value, path: &Path) -> Result<(), ConfigError> {
        // anything but a list (including an empty file) defines no areas
        let Value::Sequence(items) = conf else {
            return Ok(());
        };
        let malformed = |reason: String| ConfigError::MalformedArea {
            path: path.to_path_buf(),
            reason,
        };
        for item in items {
            let (name, params) = single_entry(item).map_err(malformed)?;
            let params = match params {
                Value::Mapping(m) => to_params(m).map_err(malformed)?,
                Value::Null => Params::new(),
                _ => return Err(malformed(format!("area '{name}' must be a mapping"))),
            };
            self.areas.insert(name.to_string(), params);
        }
        tracing::debug!(path = %path.display(), areas = items.len(), "Loaded areas");
        Ok(())
    }

    /// Returns the parameters of a configured area.
    pub fn area(&self, name: &str) -> Option<&Params> {
        self.areas.get(name)
    }

    /// Returns all configured area names, sorted.
    pub fn area_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.areas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the map style database.
    pub fn style_db(&self) -> &StyleDb {
        &self.style_db
    }

    /// Looks up an area and a map style.
    ///
    /// `area` defaults to [`DEFAULT_AREA_NAME`] and `style` to
    /// [`DEFAULT_MAP_STYLE_NAME`]. An area with no (or empty) configuration
    /// whose upper-cased name is in [`BUILTIN_AREAS`] becomes
    /// `{area_mode: name, area_name: <area>}`; other unknown areas give
    /// empty parameters.
    pub fn find(&self, area: Option<&str>, style: Option<&str>) -> (Params, Option<&Style>) {
        let area = area.unwrap_or(DEFAULT_AREA_NAME);
        let style = style.unwrap_or(DEFAULT_MAP_STYLE_NAME);

        let mut params = self.areas.get(area).cloned().unwrap_or_default();
        if params.is_empty() && is_builtin_area(area) {
            tracing::debug!(area, "Using built-in area");
            params.insert("area_mode".to_string(), Value::from("name"));
            params.insert("area_name".to_string(), Value::from(area));
        }
        (params, self.style_db.get_style(style))
    }

    /// Builds the view for an area and style.
    ///
    /// For the `"stamp"` plot type the style is copied with `map_grid` and
    /// `map_label` set to `off` in every `mcoast` directive; the registry's
    /// style is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use metstyle::{ConfigPaths, MapConfig};
    ///
    /// let maps = MapConfig::load(&ConfigPaths::bundled())?;
    /// let view = maps.view(Some("GLOBAL"), None, Some("stamp"));
    /// assert_eq!(view.params()["area_name"], "GLOBAL");
    /// # Ok::<(), metstyle::ConfigError>(())
    /// ```
    pub fn view(
        &self,
        area: Option<&str>,
        style: Option<&str>,
        plot_type: Option<&str>,
    ) -> GeoView {
        let (params, style) = self.find(area, style);
        let style = match (style, plot_type) {
            (Some(s), Some(STAMP_PLOT_TYPE)) => Some(stamp(s)),
            (s, _) => s.cloned(),
        };
        GeoView::new(params, style)
    }
}

fn stamp(style: &Style) -> Style {
    let mut params = Params::new();
    params.insert("map_grid".to_string(), Value::from("off"));
    params.insert("map_label".to_string(), Value::from("off"));

    let mut stamped = style.clone();
    for visdef in stamped.visdefs_mut() {
        if visdef.verb() == RenderVerb::Mcoast.as_str() {
            visdef.merge_lowercase(&params);
        }
    }
    stamped
}

fn single_entry(item: &Value) -> Result<(&str, &Value), String> {
    let map: &Mapping = item
        .as_mapping()
        .ok_or_else(|| "each area must be a 'name: params' mapping".to_string())?;
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((name, params)), None) => name
            .as_str()
            .map(|name| (name, params))
            .ok_or_else(|| "area names must be strings".to_string()),
        _ => Err(format!(
            "each area must have exactly one name, found {} keys",
            map.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP_STYLES: &str = r#"
grey_light_base:
  map_coastline_colour: grey
  map_grid: "on"
  map_label: "on"
black_coast:
  - mcoast: { map_coastline_colour: black }
"#;

    const AREAS: &str = r#"
- base:
    map_projection: cylindrical
    coastlines: should_be_dropped
- europe:
    area_mode: name
    area_name: europe
- empty:
"#;

    fn config() -> MapConfig {
        let mut config = MapConfig::new(StyleDb::from_yaml(MAP_STYLES, None).unwrap());
        config.add_areas_from_yaml(AREAS).unwrap();
        config
    }

    #[test]
    fn test_defaults() {
        let config = config();
        let (params, style) = config.find(None, None);
        assert_eq!(params.get("map_projection"), Some(&Value::from("cylindrical")));
        assert_eq!(style.map(Style::name), Some(DEFAULT_MAP_STYLE_NAME));
    }

    #[test]
    fn test_builtin_area_synthesized() {
        let config = config();
        let view = config.view(Some("GLOBAL"), None, None);
        let mut expected = Params::new();
        expected.insert("area_mode".into(), Value::from("name"));
        expected.insert("area_name".into(), Value::from("GLOBAL"));
        assert_eq!(view.params(), &expected);
    }

    #[test]
    fn test_builtin_area_keeps_given_case() {
        let config = config();
        let (params, _) = config.find(Some("north_atlantic"), None);
        assert_eq!(params.get("area_name"), Some(&Value::from("north_atlantic")));
    }

    #[test]
    fn test_configured_area_wins_over_builtin() {
        let config = config();
        let (params, _) = config.find(Some("europe"), None);
        assert_eq!(params.get("area_name"), Some(&Value::from("europe")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_unknown_area_is_empty() {
        let config = config();
        let (params, _) = config.find(Some("atlantis"), None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_null_area_is_empty_params() {
        let config = config();
        assert_eq!(config.area("empty"), Some(&Params::new()));
    }

    #[test]
    fn test_view_strips_coastlines() {
        let view = config().view(None, None, None);
        assert!(!view.params().contains_key("coastlines"));
        assert_eq!(view.style().map(Style::name), Some(DEFAULT_MAP_STYLE_NAME));
    }

    #[test]
    fn test_stamp_disables_grid_and_labels() {
        let config = config();
        let view = config.view(None, None, Some("stamp"));
        let params = view.style().unwrap().visdefs()[0].params();
        assert_eq!(params.get("map_grid"), Some(&Value::from("off")));
        assert_eq!(params.get("map_label"), Some(&Value::from("off")));

        // registry copy untouched
        let original = config.style_db().get_style(DEFAULT_MAP_STYLE_NAME).unwrap();
        assert_eq!(original.visdefs()[0].params().get("map_grid"), Some(&Value::from("on")));
    }

    #[test]
    fn test_stamp_covers_every_coastline_directive() {
        let mut config = MapConfig::new(
            StyleDb::from_yaml(
                "layered:\n  - mcoast: { map_grid: 'on' }\n  - mcoast: { map_label: 'on' }\n",
                None,
            )
            .unwrap(),
        );
        config.add_areas_from_yaml(AREAS).unwrap();

        let view = config.view(None, Some("layered"), Some("stamp"));
        let visdefs = view.style().unwrap().visdefs();
        assert_eq!(visdefs.len(), 2);
        for vd in visdefs {
            assert_eq!(vd.params().get("map_grid"), Some(&Value::from("off")));
            assert_eq!(vd.params().get("map_label"), Some(&Value::from("off")));
        }

        let original = config.style_db().get_style("layered").unwrap();
        assert_eq!(
            original.visdefs()[1].params().get("map_label"),
            Some(&Value::from("on"))
        );
    }

    #[test]
    fn test_stamp_skips_other_verbs() {
        let config = MapConfig::new(
            StyleDb::from_yaml(
                "annotated:\n  - mcoast: {}\n  - mtext: { text_colour: black }\n",
                None,
            )
            .unwrap(),
        );
        let view = config.view(None, Some("annotated"), Some("stamp"));
        let text = &view.style().unwrap().visdefs()[1];
        assert!(!text.params().contains_key("map_grid"));
    }

    #[test]
    fn test_unknown_style_is_none() {
        let view = config().view(None, Some("no_such_style"), Some("stamp"));
        assert!(view.style().is_none());
    }

    #[test]
    fn test_later_areas_replace_earlier() {
        let mut config = config();
        config
            .add_areas_from_yaml("- europe:\n    area_mode: corners\n")
            .unwrap();
        assert_eq!(
            config.area("europe").and_then(|p| p.get("area_mode")),
            Some(&Value::from("corners"))
        );
    }

    #[test]
    fn test_empty_area_file() {
        let mut config = MapConfig::default();
        config.add_areas_from_yaml("").unwrap();
        assert!(config.area_names().is_empty());
    }

    #[test]
    fn test_malformed_area() {
        let mut config = MapConfig::default();
        let err = config
            .add_areas_from_yaml("- a: {}\n  b: {}\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedArea { .. }));
    }
}
