//! Catalog endpoint and detail page layout for exoplanet.eu.

pub const CATALOG_API: &str = "exoplanet_eu";
pub const CATALOG_URL: &str = "http://exoplanet.eu/catalog/json/";

/// Key of the row array in the catalog response
pub const CATALOG_DATA_KEY: &str = "aaData";

// Detail page cells
pub const STAR_TYPE_SELECTOR: &str = "td#star_0_stars__spec_type_0";
pub const TEMPERATURE_SELECTOR: &str = "td#planet_temp_calculated_0";

/// Earth mass in kg
pub const EARTH_MASS_KG: f64 = 5.972e24;
/// Earth radius in m
pub const EARTH_RADIUS_M: f64 = 6.371e6;

// Default thresholds
pub const MAX_TEMPERATURE_K: f64 = 500.0;
pub const MAX_DENSITY_KG_M3: f64 = 3000.0;
pub const MAX_MASS_EARTH: f64 = 5.0;
pub const MAX_RADIUS_EARTH: f64 = 2.05;
pub const MIN_SEMI_MAJOR_AXIS_AU: f64 = 0.05;
pub const MAX_SEMI_MAJOR_AXIS_AU: f64 = 1.5;
pub const MAX_ECCENTRICITY: f64 = 0.21;
pub const STAR_CLASSES: &str = "GKMF";

pub const LOG_DIR: &str = "logs";
pub const PROGRESS_WIDTH: usize = 50;

/// Fixed form parameters of the bulk catalog query
pub fn catalog_query() -> Vec<(&'static str, &'static str)> {
    vec![
        ("sEcho", "1"),
        ("iDisplayStart", "0"),
        ("iDisplayLength", "999999"),
        ("sSearch", ""),
        ("iSortCol_0", "9"),
        ("sSortDir_0", "desc"),
        ("mass_unit", "mearth"),
        ("radius_unit", "rearth"),
        ("status_1", "True"),
        ("status_2", "True"),
        ("status_4", "True"),
    ]
}
