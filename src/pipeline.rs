use crate::classifier::{self, Verdict};
use crate::config::Thresholds;
use crate::error::Result;
use crate::parser;
use crate::progress::ProgressBar;
use crate::report::Report;
use crate::types::{CatalogApi, PlanetRecord};
use metrics::counter;
use tracing::{debug, info, instrument};

/// Counters of a complete pipeline run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub total_records: usize,
    pub skipped_records: usize,
    pub prefilter_rejected: usize,
    pub detail_pages_fetched: usize,
    pub refine_rejected: usize,
    pub candidates: usize,
    pub reserves: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Draw the progress bar on stdout
    pub verbose: bool,
}

pub struct Pipeline;

impl Pipeline {
    /// Fetch the catalog and classify every row, in catalog order.
    #[instrument(skip_all, fields(api_name = %api.api_name()))]
    pub async fn run(
        api: &dyn CatalogApi,
        thresholds: &Thresholds,
        options: RunOptions,
    ) -> Result<(Report, RunSummary)> {
        let records = api.get_catalog().await?;
        Self::classify_all(api, &records, thresholds, options).await
    }

    /// Classify already fetched records. Detail pages are fetched one at a time.
    pub async fn classify_all(
        api: &dyn CatalogApi,
        records: &[PlanetRecord],
        thresholds: &Thresholds,
        options: RunOptions,
    ) -> Result<(Report, RunSummary)> {
        let api_name = api.api_name();
        let mut report = Report::new();
        let mut summary = RunSummary {
            total_records: records.len(),
            ..RunSummary::default()
        };
        let mut progress = ProgressBar::new(records.len(), options.verbose);
        counter!("exo_records_total", "api" => api_name).increment(records.len() as u64);

        for record in records {
            progress.tick();

            let Some(measurements) = record.measurements() else {
                summary.skipped_records += 1;
                continue;
            };

            if !classifier::passes_prefilter(&measurements, thresholds) {
                summary.prefilter_rejected += 1;
                continue;
            }

            let markup = record.markup.as_deref().unwrap_or_default();
            let link = parser::parse_link(markup, api.base_url())?;
            debug!(planet = %link.label, url = %link.url, "Fetching detail page");

            let html = api.get_detail_page(&link.url).await?;
            summary.detail_pages_fetched += 1;
            counter!("exo_detail_fetches_total", "api" => api_name).increment(1);

            let details = parser::parse_star_details(&html)?;
            let verdict = classifier::refine(&details, thresholds)?;
            debug!(planet = %link.label, ?verdict, "Classified");

            if verdict == Verdict::Rejected {
                summary.refine_rejected += 1;
            }
            report.push(verdict, record, &link, &details.temperature);
        }
        progress.finish();

        summary.candidates = report.candidates.count;
        summary.reserves = report.reserves.count;

        counter!("exo_records_skipped_total", "api" => api_name).increment(summary.skipped_records as u64);
        counter!("exo_records_rejected_total", "api" => api_name)
            .increment((summary.prefilter_rejected + summary.refine_rejected) as u64);
        counter!("exo_candidates_total", "api" => api_name).increment(summary.candidates as u64);
        counter!("exo_reserves_total", "api" => api_name).increment(summary.reserves as u64);

        info!(
            total = summary.total_records,
            skipped = summary.skipped_records,
            prefilter_rejected = summary.prefilter_rejected,
            refine_rejected = summary.refine_rejected,
            candidates = summary.candidates,
            reserves = summary.reserves,
            "✅ Classification finished"
        );

        Ok((report, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const BASE: &str = "http://catalog.test/catalog/json/";

    struct FakeCatalog {
        rows: Vec<serde_json::Value>,
        pages: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn new(rows: Vec<serde_json::Value>) -> Self {
            Self {
                rows,
                pages: HashMap::new(),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn page(mut self, slug: &str, star_type: &str, temperature: &str) -> Self {
            let html = format!(
                "<table><tr><td id=\"star_0_stars__spec_type_0\">{star_type}</td>\
                 <td id=\"planet_temp_calculated_0\">{temperature}</td></tr></table>"
            );
            self.pages.insert(format!("http://catalog.test/planet/{slug}/"), html);
            self
        }
    }

    #[async_trait::async_trait]
    impl CatalogApi for FakeCatalog {
        fn api_name(&self) -> &'static str {
            "fake"
        }

        fn base_url(&self) -> &str {
            BASE
        }

        async fn get_catalog(&self) -> Result<Vec<PlanetRecord>> {
            self.rows.iter().map(PlanetRecord::from_row).collect()
        }

        async fn get_detail_page(&self, url: &str) -> Result<String> {
            self.fetched.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| ScraperError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn row(slug: &str, mass: f64) -> serde_json::Value {
        json!([format!("<a href=\"/planet/{slug}/\">{slug}</a>"), mass, 1.0, null, 0.5, 0.1])
    }

    #[tokio::test]
    async fn test_prefilter_rejects_without_fetch() {
        let catalog = FakeCatalog::new(vec![row("heavy", 6.0)]);
        let (report, summary) = Pipeline::run(&catalog, &Thresholds::default(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.prefilter_rejected, 1);
        assert_eq!(summary.detail_pages_fetched, 0);
        assert!(catalog.fetched.lock().unwrap().is_empty());
        assert_eq!(report, Report::new());
    }

    #[tokio::test]
    async fn test_incomplete_records_are_skipped() {
        let incomplete = json!(["<a href=\"/planet/x/\">x</a>", 1.0, null, null, 0.5, 0.1]);
        let catalog = FakeCatalog::new(vec![incomplete]);
        let (report, summary) = Pipeline::run(&catalog, &Thresholds::default(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.skipped_records, 1);
        assert!(catalog.fetched.lock().unwrap().is_empty());
        assert_eq!(report.candidates.count + report.reserves.count, 0);
    }

    #[tokio::test]
    async fn test_candidates_and_reserves_in_catalog_order() {
        let catalog = FakeCatalog::new(vec![
            row("a", 1.0),
            row("b", 2.0),
            row("c", 6.0),
            row("d", 3.0),
            row("e", 1.5),
        ])
        .page("a", "G", "280 K")
        .page("b", "", "-")
        .page("d", "K", "260 K")
        .page("e", "X", "100 K");

        let (report, summary) = Pipeline::run(&catalog, &Thresholds::default(), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(report.candidates.entries, vec!["1|a|1.0|1.0||0.5|0.1|280 K", "2|d|3.0|1.0||0.5|0.1|260 K"]);
        assert_eq!(report.reserves.entries, vec!["1|b|2.0|1.0||0.5|0.1|-"]);
        assert_eq!(summary.detail_pages_fetched, 4);
        assert_eq!(summary.refine_rejected, 1);
        assert_eq!(summary.prefilter_rejected, 1);
    }

    #[tokio::test]
    async fn test_missing_detail_cell_aborts_run() {
        let mut catalog = FakeCatalog::new(vec![row("a", 1.0)]);
        catalog
            .pages
            .insert("http://catalog.test/planet/a/".into(), "<p>gone</p>".into());

        let err = Pipeline::run(&catalog, &Thresholds::default(), RunOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::MissingElement(_)));
    }
}
