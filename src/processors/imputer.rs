use chrono::{Duration, NaiveDate};

use crate::models::TimeSeries;
use crate::utils::constants::DEFAULT_IMPUTE_WINDOW;

/// Report of a bulk gap-filling pass over a series.
#[derive(Debug, Clone)]
pub struct GapFillReport {
    /// The series with every imputable gap replaced by its fill value.
    pub series: TimeSeries,
    pub filled: usize,
    /// Gap dates whose symmetric window held no observed values.
    pub unfilled: Vec<NaiveDate>,
}

/// Fills a single missing observation from its temporal neighborhood.
///
/// For `i` in `1..=window`, the dates `target - i*unit` and
/// `target + i*unit` are probed. A date absent from the index is treated
/// the same as a present-but-missing value: skipped, never an error. The
/// fill value is the rounded mean of whatever was found, or nothing when
/// the whole window is empty.
pub struct GapImputer {
    window: usize,
    unit: Duration,
}

impl GapImputer {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_IMPUTE_WINDOW,
            unit: Duration::days(1),
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit = unit;
        self
    }

    pub fn impute(&self, series: &TimeSeries, target: NaiveDate) -> Option<f64> {
        let mut found = Vec::with_capacity(2 * self.window);

        for i in 1..=self.window as i32 {
            let offset = self.unit * i;
            if let Some(value) = series.value(target - offset) {
                found.push(value);
            }
            if let Some(value) = series.value(target + offset) {
                found.push(value);
            }
        }

        if found.is_empty() {
            return None;
        }

        let mean = found.iter().sum::<f64>() / found.len() as f64;
        Some(mean.round())
    }

    /// Impute every gap inside the series span. Fill values are computed
    /// against the original observations only, so the result does not
    /// depend on gap ordering.
    pub fn fill_gaps(&self, series: &TimeSeries) -> GapFillReport {
        let mut filled_series = series.clone();
        let mut filled = 0usize;
        let mut unfilled = Vec::new();

        for gap in series.gaps() {
            match self.impute(series, gap) {
                Some(value) => {
                    filled_series.insert(gap, Some(value));
                    filled += 1;
                }
                None => unfilled.push(gap),
            }
        }

        GapFillReport {
            series: filled_series,
            filled,
            unfilled,
        }
    }
}

impl Default for GapImputer {
    fn default() -> Self {
        Self::new()
    }
}
