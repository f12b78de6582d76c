use reqwest::Url;
use scraper::{Html, Selector};
use tracing::debug;

use crate::constants::{STAR_TYPE_SELECTOR, TEMPERATURE_SELECTOR};
use crate::error::{Result, ScraperError};
use crate::types::PlanetLink;

/// Text fields scraped from a planet's detail page
#[derive(Debug, Clone, PartialEq)]
pub struct StarDetails {
    pub star_type: String,
    pub temperature: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::MissingElement(format!("invalid selector {css}: {e:?}")))
}

/// Reads the label and detail page URL out of a catalog link cell.
///
/// Relative hrefs are resolved against `base_url`.
pub fn parse_link(markup: &str, base_url: &str) -> Result<PlanetLink> {
    let fragment = Html::parse_fragment(markup);
    let anchor_selector = selector("a")?;

    let anchor = fragment
        .select(&anchor_selector)
        .next()
        .ok_or_else(|| ScraperError::MissingField(format!("no link in catalog markup: {markup}")))?;
    let href = anchor
        .value()
        .attr("href")
        .ok_or_else(|| ScraperError::MissingField(format!("link without href: {markup}")))?;

    let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
        href: base_url.to_string(),
        message: e.to_string(),
    })?;
    let url = base.join(href).map_err(|e| ScraperError::InvalidUrl {
        href: href.to_string(),
        message: e.to_string(),
    })?;

    let label = fragment.root_element().text().collect::<String>().trim().to_string();

    Ok(PlanetLink {
        label,
        url: url.to_string(),
    })
}

/// Extracts the star spectral type and calculated temperature cells.
///
/// Both cells must exist; their text is kept as is and may be empty.
pub fn parse_star_details(html: &str) -> Result<StarDetails> {
    let document = Html::parse_document(html);
    let cell_text = |css: &str| -> Result<String> {
        let cell_selector = selector(css)?;
        document
            .select(&cell_selector)
            .next()
            .map(|cell| cell.text().collect::<String>())
            .ok_or_else(|| ScraperError::MissingElement(css.to_string()))
    };

    let details = StarDetails {
        star_type: cell_text(STAR_TYPE_SELECTOR)?,
        temperature: cell_text(TEMPERATURE_SELECTOR)?,
    };
    debug!(star_type = %details.star_type, temperature = %details.temperature, "Parsed detail page");
    Ok(details)
}
