//! Two-stage habitability filter.
//!
//! Stage 1 is a pure numeric check on catalog fields. Stage 2 needs the star
//! type and calculated temperature from the planet's detail page.

use crate::config::Thresholds;
use crate::constants::{EARTH_MASS_KG, EARTH_RADIUS_M};
use crate::error::{Result, ScraperError};
use crate::parser::StarDetails;
use crate::types::Measurements;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Candidate,
    Reserve,
    Rejected,
}

/// Calculated temperature as read from a detail page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    /// Fewer than two characters, e.g. empty or `-`
    Unknown,
    Kelvin(f64),
    /// No space separator, or a non-numeric leading token
    Malformed,
}

impl Temperature {
    /// Parses the token before the first space, e.g. `"280 K"` -> 280.
    pub fn parse(raw: &str) -> Self {
        if raw.chars().count() < 2 {
            return Temperature::Unknown;
        }
        match raw.split_once(' ') {
            Some((value, _unit)) => value
                .parse::<f64>()
                .map(Temperature::Kelvin)
                .unwrap_or(Temperature::Malformed),
            None => Temperature::Malformed,
        }
    }
}

/// Bulk density in kg/m³.
///
/// The volume term is 4/3·r³ without π. Thresholds are calibrated against
/// this form, so it stays as is.
pub fn density(mass_earth: f64, radius_earth: f64) -> f64 {
    mass_earth * EARTH_MASS_KG / (4.0 / 3.0 * (radius_earth * EARTH_RADIUS_M).powi(3))
}

/// Stage 1. `false` means rejected with no detail page fetch.
pub fn passes_prefilter(m: &Measurements, thresholds: &Thresholds) -> bool {
    m.mass < thresholds.max_mass
        && m.radius < thresholds.max_radius
        // max_density works as a lower bound
        && density(m.mass, m.radius) > thresholds.max_density
        && thresholds.semi_major_axis.contains(m.axis)
        && m.eccentricity < thresholds.max_eccentricity
}

/// Exact cell text `""` or `"-"`; whitespace does not count as blank.
fn is_blank_star_type(star_type: &str) -> bool {
    matches!(star_type, "" | "-")
}

/// Stage 2 decision over the detail page fields.
///
/// A blank star type or an unknown temperature takes the reserve path before
/// the star class is looked at. A malformed temperature is only tolerated on
/// that path; for an accepted star class it is an error.
pub fn refine(details: &StarDetails, thresholds: &Thresholds) -> Result<Verdict> {
    let temperature = Temperature::parse(&details.temperature);
    let below_max = |kelvin: f64| kelvin < thresholds.max_temperature;

    if is_blank_star_type(&details.star_type) || temperature == Temperature::Unknown {
        return Ok(match temperature {
            Temperature::Unknown | Temperature::Malformed => Verdict::Reserve,
            Temperature::Kelvin(k) if below_max(k) => Verdict::Reserve,
            Temperature::Kelvin(_) => Verdict::Rejected,
        });
    }

    if !thresholds.accepts_star_class(&details.star_type) {
        return Ok(Verdict::Rejected);
    }

    match temperature {
        Temperature::Kelvin(k) if below_max(k) => Ok(Verdict::Candidate),
        Temperature::Kelvin(_) => Ok(Verdict::Rejected),
        Temperature::Unknown => Ok(Verdict::Reserve),
        Temperature::Malformed => Err(ScraperError::Temperature {
            raw: details.temperature.clone(),
        }),
    }
}
