use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classifier::Verdict;
use crate::constants::LOG_DIR;
use crate::error::Result;
use crate::types::{PlanetLink, PlanetRecord};

/// Ordered report lines plus their count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bucket {
    pub count: usize,
    pub entries: Vec<String>,
}

impl Bucket {
    /// Appends a line numbered with the next ordinal, starting at 1.
    fn push(&mut self, record: &PlanetRecord, label: &str, temperature: &str) {
        self.count += 1;
        let line = [
            self.count.to_string().as_str(),
            label,
            record.mass_text(),
            record.radius_text(),
            record.unused_text(),
            record.axis_text(),
            record.eccentricity_text(),
            temperature,
        ]
        .join("|");
        self.entries.push(line);
    }
}

/// Candidates and reserves of one run, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub candidates: Bucket,
    pub reserves: Bucket,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a Stage 2 survivor. Rejected verdicts leave the report unchanged.
    pub fn push(&mut self, verdict: Verdict, record: &PlanetRecord, link: &PlanetLink, temperature: &str) {
        match verdict {
            Verdict::Candidate => self.candidates.push(record, &link.label, temperature),
            Verdict::Reserve => self.reserves.push(record, &link.label, temperature),
            Verdict::Rejected => {}
        }
    }

    pub fn render(&self) -> String {
        format!(
            "<Candidates: {}>\n\n{}\n\n<Reserves: {}>\n\n{}",
            self.candidates.count,
            self.candidates.entries.join("\n"),
            self.reserves.count,
            self.reserves.entries.join("\n"),
        )
    }

    /// Writes the report, replacing any existing file and creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render())?;
        info!(
            path = %path.display(),
            candidates = self.candidates.count,
            reserves = self.reserves.count,
            "Report written"
        );
        Ok(())
    }
}

/// `logs/log_<YYYY-MM-DD>.txt`
pub fn default_report_path(date: NaiveDate) -> PathBuf {
    Path::new(LOG_DIR).join(format!("log_{}.txt", date.format("%Y-%m-%d")))
}
