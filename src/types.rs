use crate::error::{Result, ScraperError};
use serde_json::Value;

/// Raw catalog row as returned by the bulk query
pub type RawPlanetRow = Value;

// Fixed cell positions of a catalog row
const MARKUP_CELL: usize = 0;
const MASS_CELL: usize = 1;
const RADIUS_CELL: usize = 2;
const UNUSED_CELL: usize = 3;
const AXIS_CELL: usize = 4;
const ECCENTRICITY_CELL: usize = 5;

/// Cells carried into report lines, in row order
const RENDERED_CELLS: [usize; 5] = [MASS_CELL, RADIUS_CELL, UNUSED_CELL, AXIS_CELL, ECCENTRICITY_CELL];

static NULL_CELL: Value = Value::Null;

/// One catalog entry, read from its fixed-position row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub markup: Option<String>,
    pub mass: Option<f64>,
    pub radius: Option<f64>,
    pub axis: Option<f64>,
    pub eccentricity: Option<f64>,
    /// Report text of `RENDERED_CELLS`, same order
    cells: [String; 5],
}

/// The four numeric fields the filters need, all present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    /// Earth masses
    pub mass: f64,
    /// Earth radii
    pub radius: f64,
    /// AU
    pub axis: f64,
    pub eccentricity: f64,
}

/// Label and detail page of a planet, taken from its link markup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetLink {
    pub label: String,
    pub url: String,
}

impl PlanetRecord {
    pub fn from_row(row: &RawPlanetRow) -> Result<Self> {
        let cells = row
            .as_array()
            .ok_or_else(|| ScraperError::MissingField("catalog row is not an array".into()))?;

        let cell = |index: usize| cells.get(index).unwrap_or(&NULL_CELL);

        Ok(Self {
            markup: cell(MARKUP_CELL).as_str().map(str::to_string),
            mass: numeric(cell(MASS_CELL)),
            radius: numeric(cell(RADIUS_CELL)),
            axis: numeric(cell(AXIS_CELL)),
            eccentricity: numeric(cell(ECCENTRICITY_CELL)),
            cells: RENDERED_CELLS.map(|index| cell_text(cell(index))),
        })
    }

    /// `None` when any required field is absent; such records are skipped.
    pub fn measurements(&self) -> Option<Measurements> {
        Some(Measurements {
            mass: self.mass?,
            radius: self.radius?,
            axis: self.axis?,
            eccentricity: self.eccentricity?,
        })
    }

    fn text(&self, index: usize) -> &str {
        RENDERED_CELLS
            .iter()
            .position(|&rendered| rendered == index)
            .map(|slot| self.cells[slot].as_str())
            .unwrap_or_default()
    }

    pub fn mass_text(&self) -> &str {
        self.text(MASS_CELL)
    }

    pub fn radius_text(&self) -> &str {
        self.text(RADIUS_CELL)
    }

    pub fn unused_text(&self) -> &str {
        self.text(UNUSED_CELL)
    }

    pub fn axis_text(&self) -> &str {
        self.text(AXIS_CELL)
    }

    pub fn eccentricity_text(&self) -> &str {
        self.text(ECCENTRICITY_CELL)
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Catalog text of a cell: numbers as sent, strings unquoted, null empty.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Core trait for the catalog data source
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Unique identifier for this catalog
    fn api_name(&self) -> &'static str;

    /// Base used to resolve relative detail page links
    fn base_url(&self) -> &str;

    /// Fetch every catalog row in one request
    async fn get_catalog(&self) -> Result<Vec<PlanetRecord>>;

    /// Fetch the HTML of one planet's detail page
    async fn get_detail_page(&self, url: &str) -> Result<String>;
}
