use std::io::{self, Write};

use crate::constants::PROGRESS_WIDTH;

/// ASCII progress bar, e.g. `[=====>............] - 10 / 100`.
pub fn render_bar(processed: usize, total: usize) -> String {
    let fraction = if total == 0 {
        PROGRESS_WIDTH
    } else {
        (processed * PROGRESS_WIDTH / total).min(PROGRESS_WIDTH)
    };
    let head = if processed < total { ">" } else { "" };
    let tail = (PROGRESS_WIDTH - 1).saturating_sub(fraction);

    format!(
        "[{}{}{}] - {} / {}",
        "=".repeat(fraction),
        head,
        ".".repeat(tail),
        processed,
        total
    )
}

/// Redraws the bar in place on stdout when enabled.
pub struct ProgressBar {
    total: usize,
    processed: usize,
    enabled: bool,
}

impl ProgressBar {
    pub fn new(total: usize, enabled: bool) -> Self {
        Self {
            total,
            processed: 0,
            enabled,
        }
    }

    pub fn tick(&mut self) {
        self.processed += 1;
        if self.enabled {
            print!("\r{}", render_bar(self.processed, self.total));
            let _ = io::stdout().flush();
        }
    }

    pub fn finish(&self) {
        if self.enabled {
            println!();
        }
    }
}
