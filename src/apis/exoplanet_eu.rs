use crate::constants::{catalog_query, CATALOG_API, CATALOG_DATA_KEY};
use crate::error::{Result, ScraperError};
use crate::types::{CatalogApi, PlanetRecord};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// exoplanet.eu catalog client. One `reqwest::Client` serves the bulk query
/// and every detail page of a run.
pub struct ExoplanetEuCatalog {
    client: reqwest::Client,
    url: String,
}

impl ExoplanetEuCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Reads the rows under `aaData` from a bulk query response body.
    pub fn parse_catalog(body: &str) -> Result<Vec<PlanetRecord>> {
        let response: Value = serde_json::from_str(body)?;
        let rows = response
            .get(CATALOG_DATA_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| ScraperError::MissingField(format!("{CATALOG_DATA_KEY} not found")))?;

        rows.iter().map(PlanetRecord::from_row).collect()
    }

    /// Sends `request` and returns the status together with the body of a
    /// successful response.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "Response received");

        ensure_success(status, url)?;
        Ok((status, response.text().await?))
    }
}

fn ensure_success(status: StatusCode, url: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(ScraperError::Status {
        url: url.to_string(),
        status: status.as_u16(),
    })
}

#[async_trait::async_trait]
impl CatalogApi for ExoplanetEuCatalog {
    fn api_name(&self) -> &'static str {
        CATALOG_API
    }

    fn base_url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn get_catalog(&self) -> Result<Vec<PlanetRecord>> {
        info!("Querying exoplanet catalog");

        let request = self.client.post(&self.url).form(&catalog_query());
        let (status, body) = self.send(request, &self.url).await?;
        println!("\n{:<40} {:>20}", "Request status:", status.to_string());
        info!(status = status.as_u16(), "Catalog responded");

        let records = Self::parse_catalog(&body)?;
        println!("{:<40} {:>20}\n", "Exoplanets received:", records.len());
        info!("Received {} catalog rows", records.len());

        Ok(records)
    }

    async fn get_detail_page(&self, url: &str) -> Result<String> {
        let (_, body) = self.send(self.client.get(url), url).await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CATALOG_URL;

    #[test]
    fn test_api_name() {
        let catalog = ExoplanetEuCatalog::new(CATALOG_URL);
        assert_eq!(catalog.api_name(), "exoplanet_eu");
        assert_eq!(catalog.base_url(), CATALOG_URL);
    }

    #[test]
    fn test_parse_catalog() {
        let body = r#"{
            "sEcho": 1,
            "iTotalRecords": 2,
            "aaData": [
                ["<a href=\"/planet/a/\">a</a>", 1.0, 1.0, null, 0.5, 0.1, "x"],
                ["<a href=\"/planet/b/\">b</a>", null, 3.2, 12, 0.7, 0.0]
            ]
        }"#;

        let records = ExoplanetEuCatalog::parse_catalog(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mass, Some(1.0));
        assert_eq!(records[1].mass, None);
        assert_eq!(records[1].unused_text(), "12");
    }

    #[test]
    fn test_parse_catalog_without_data_key() {
        let err = ExoplanetEuCatalog::parse_catalog(r#"{"sEcho": 1}"#).unwrap_err();
        assert!(matches!(err, ScraperError::MissingField(_)));
    }

    #[test]
    fn test_parse_catalog_malformed_json() {
        let err = ExoplanetEuCatalog::parse_catalog("<html>busy</html>").unwrap_err();
        assert!(matches!(err, ScraperError::Json(_)));
    }

    #[test]
    fn test_ensure_success() {
        assert!(ensure_success(StatusCode::OK, CATALOG_URL).is_ok());

        let err = ensure_success(StatusCode::SERVICE_UNAVAILABLE, CATALOG_URL).unwrap_err();
        match err {
            ScraperError::Status { url, status } => {
                assert_eq!(url, CATALOG_URL);
                assert_eq!(status, 503);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_catalog_query_parameters() {
        let query = catalog_query();
        assert!(query.contains(&("iDisplayLength", "999999")));
        assert!(query.contains(&("sSortDir_0", "desc")));
        assert!(query.contains(&("mass_unit", "mearth")));
        assert!(query.contains(&("radius_unit", "rearth")));
        assert_eq!(query.len(), 11);
    }
}
