use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A value-per-date series. Keys are unique and ordered; a present key may
/// still hold a missing observation (`None`), which is distinct from the
/// date being absent from the index entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: BTreeMap<NaiveDate, Option<f64>>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        Self {
            points: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, value: Option<f64>) {
        self.points.insert(date, value);
    }

    /// Whether the date exists in the index at all (even with a missing value).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.points.contains_key(&date)
    }

    /// The observation at `date`: `None` if the date is absent from the
    /// index, `Some(None)` if present but missing-valued.
    pub fn get(&self, date: NaiveDate) -> Option<Option<f64>> {
        self.points.get(&date).copied()
    }

    /// The value at `date` if the date is present and non-missing.
    pub fn value(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.points.iter().map(|(d, v)| (*d, *v))
    }

    /// Ordered (date, value) pairs with missing observations skipped.
    pub fn observed(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().filter_map(|(d, v)| v.map(|v| (*d, v)))
    }

    /// Dates inside the series span (inclusive) that are absent from the
    /// index or hold a missing value.
    pub fn gaps(&self) -> Vec<NaiveDate> {
        let (Some(first), Some(last)) = (self.first_date(), self.last_date()) else {
            return Vec::new();
        };

        let mut gaps = Vec::new();
        let mut date = first;
        while date <= last {
            if self.value(date).is_none() {
                gaps.push(date);
            }
            date += chrono::Duration::days(1);
        }
        gaps
    }
}

impl FromIterator<(NaiveDate, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(|(d, v)| (d, Some(v))).collect(),
        }
    }
}
