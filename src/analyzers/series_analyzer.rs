use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{ProcessingError, Result};
use crate::models::{CheckoutRecord, TimeSeries};

/// Rolling-statistics window, in observations at daily granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingWindow {
    Days(usize),
    Weekly,
    Monthly,
    Biannual,
    Yearly,
}

impl RollingWindow {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "W" => Ok(RollingWindow::Weekly),
            "M" => Ok(RollingWindow::Monthly),
            "B" => Ok(RollingWindow::Biannual),
            "Y" => Ok(RollingWindow::Yearly),
            other => other
                .parse::<usize>()
                .map(RollingWindow::Days)
                .map_err(|_| {
                    ProcessingError::Config(format!(
                        "Unknown rolling period '{}' (expected W, M, B, Y or a day count)",
                        other
                    ))
                }),
        }
    }

    pub fn days(&self) -> usize {
        match self {
            RollingWindow::Days(n) => *n,
            RollingWindow::Weekly => 7,
            RollingWindow::Monthly => 30,
            RollingWindow::Biannual => 180,
            RollingWindow::Yearly => 365,
        }
    }
}

/// Trailing rolling mean and sample standard deviation, keyed by the
/// window-end date. The first `window - 1` positions are missing, as is
/// the deviation for a single-observation window.
#[derive(Debug, Clone)]
pub struct RollingStats {
    pub mean: TimeSeries,
    pub std: TimeSeries,
    pub window: usize,
}

/// Classical additive decomposition: observation = trend + seasonal +
/// residual wherever the centered trend is defined.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub trend: TimeSeries,
    pub seasonal: TimeSeries,
    pub residual: TimeSeries,
    pub period: usize,
}

#[derive(Debug, Clone)]
pub struct SeriesStatistics {
    pub observations: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl SeriesStatistics {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Series Statistics ===\n");
        summary.push_str(&format!("Observations: {}\n", self.observations));
        summary.push_str(&format!(
            "Date Range: {} to {}\n",
            self.date_range.0, self.date_range.1
        ));
        summary.push_str(&format!(
            "Min: {:.1}  Max: {:.1}  Mean: {:.2}\n",
            self.min, self.max, self.mean
        ));
        summary
    }
}

pub struct SeriesAnalyzer;

impl SeriesAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Number of checkouts per calendar date.
    pub fn daily_counts(&self, records: &[CheckoutRecord]) -> TimeSeries {
        let mut counts: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            *counts.entry(record.date).or_insert(0.0) += 1.0;
        }
        counts.into_iter().collect()
    }

    pub fn statistics(&self, series: &TimeSeries) -> Result<SeriesStatistics> {
        let observed: Vec<(NaiveDate, f64)> = series.observed().collect();
        if observed.is_empty() {
            return Err(ProcessingError::MissingData(
                "series has no observed values".to_string(),
            ));
        }

        let values: Vec<f64> = observed.iter().map(|(_, v)| *v).collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Ok(SeriesStatistics {
            observations: observed.len(),
            date_range: (observed[0].0, observed[observed.len() - 1].0),
            min,
            max,
            mean,
        })
    }

    /// Trailing rolling mean/std over `window` observations.
    pub fn rolling(&self, series: &TimeSeries, window: RollingWindow) -> Result<RollingStats> {
        let window = window.days();
        if window == 0 {
            return Err(ProcessingError::Config(
                "rolling window must be at least 1".to_string(),
            ));
        }

        let observed: Vec<(NaiveDate, f64)> = series.observed().collect();
        let mut mean_series = TimeSeries::new();
        let mut std_series = TimeSeries::new();

        for (i, (date, _)) in observed.iter().enumerate() {
            if i + 1 < window {
                mean_series.insert(*date, None);
                std_series.insert(*date, None);
                continue;
            }

            let slice: Vec<f64> = observed[i + 1 - window..=i].iter().map(|(_, v)| *v).collect();
            let mean = slice.iter().sum::<f64>() / window as f64;
            mean_series.insert(*date, Some(mean));

            // sample deviation; undefined for a single observation
            let std = if window > 1 {
                let variance = slice
                    .iter()
                    .map(|v| (v - mean).powi(2))
                    .sum::<f64>()
                    / (window - 1) as f64;
                Some(variance.sqrt())
            } else {
                None
            };
            std_series.insert(*date, std);
        }

        Ok(RollingStats {
            mean: mean_series,
            std: std_series,
            window,
        })
    }

    /// Additive seasonal decomposition with a centered moving-average trend
    /// and per-phase mean seasonal component (normalized to zero mean).
    /// Needs at least two full periods of observations.
    pub fn decompose(&self, series: &TimeSeries, period: usize) -> Result<Decomposition> {
        if period < 2 {
            return Err(ProcessingError::Config(
                "decomposition period must be at least 2".to_string(),
            ));
        }

        let observed: Vec<(NaiveDate, f64)> = series.observed().collect();
        if observed.len() < 2 * period {
            return Err(ProcessingError::MissingData(format!(
                "decomposition needs at least {} observations for period {}, found {}",
                2 * period,
                period,
                observed.len()
            )));
        }

        let values: Vec<f64> = observed.iter().map(|(_, v)| *v).collect();
        let trend_values = centered_moving_average(&values, period);

        // Per-phase means of the detrended series.
        let mut phase_sums = vec![0.0f64; period];
        let mut phase_counts = vec![0usize; period];
        for (i, trend) in trend_values.iter().enumerate() {
            if let Some(trend) = trend {
                phase_sums[i % period] += values[i] - trend;
                phase_counts[i % period] += 1;
            }
        }

        let mut phase_means: Vec<f64> = phase_sums
            .iter()
            .zip(&phase_counts)
            .map(|(sum, count)| if *count > 0 { sum / *count as f64 } else { 0.0 })
            .collect();

        // Normalize so the seasonal component sums to zero over one period.
        let offset = phase_means.iter().sum::<f64>() / period as f64;
        for mean in &mut phase_means {
            *mean -= offset;
        }

        let mut trend = TimeSeries::new();
        let mut seasonal = TimeSeries::new();
        let mut residual = TimeSeries::new();
        for (i, (date, value)) in observed.iter().enumerate() {
            let seasonal_value = phase_means[i % period];
            trend.insert(*date, trend_values[i]);
            seasonal.insert(*date, Some(seasonal_value));
            residual.insert(
                *date,
                trend_values[i].map(|t| value - t - seasonal_value),
            );
        }

        Ok(Decomposition {
            trend,
            seasonal,
            residual,
            period,
        })
    }
}

impl Default for SeriesAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Centered moving average of length `period`; for an even period the
/// window spans `period + 1` points with half weight on the extremes.
/// Edge positions where the window does not fit are `None`.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let half = period / 2;
    let mut result = vec![None; values.len()];

    for i in 0..values.len() {
        if i < half || i + half >= values.len() {
            continue;
        }

        let window_mean = if period % 2 == 1 {
            values[i - half..=i + half].iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = values[i - half + 1..i + half].iter().sum();
            (0.5 * values[i - half] + inner + 0.5 * values[i + half]) / period as f64
        };
        result[i] = Some(window_mean);
    }

    result
}
