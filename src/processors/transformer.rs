use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::error::Result;
use crate::models::{CategoryField, CheckoutRecord, DataDictionary, RawCheckout};
use crate::processors::relabeler::relabel_in_place;
use crate::utils::constants::{
    ELECTRONIC_FORMAT_GROUPS, EQUIPMENT_FORMAT_GROUP, EQUIPMENT_TITLES, EXPORT_DATE_FORMAT,
    KIT_FORMAT_SUBGROUP, MISC_CATEGORY_GROUPS, OTHER_LABEL,
};

/// Result of a transform run. The inner join drops rows whose collection
/// code is absent from the prepared dictionary; that loss is counted here
/// rather than happening silently.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub records: Vec<CheckoutRecord>,
    pub dropped_unmatched: usize,
}

impl TransformOutcome {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Transform Report ===\n");
        summary.push_str(&format!("Enriched records: {}\n", self.records.len()));
        summary.push_str(&format!(
            "Dropped (no dictionary match): {}\n",
            self.dropped_unmatched
        ));
        summary
    }
}

/// Joins raw checkout rows against the prepared data dictionary and applies
/// the category-lumping passes.
pub struct RecordTransformer {
    date_format: String,
}

impl RecordTransformer {
    pub fn new() -> Self {
        Self {
            date_format: EXPORT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, date_format: &str) -> Self {
        self.date_format = date_format.to_string();
        self
    }

    /// Enrich `raw` rows through an inner join on the collection code, then
    /// run the four relabeling passes in order. Passes 1 and 3 both write
    /// `format_group`, so pass 3 reads pass 1's output; the sequence is not
    /// reorderable.
    pub fn transform(
        &self,
        raw: &[RawCheckout],
        dictionary: &DataDictionary,
    ) -> Result<TransformOutcome> {
        let mut records = Vec::with_capacity(raw.len());
        let mut dropped_unmatched = 0usize;

        for row in raw {
            let Some(entry) = dictionary.get(&row.collection) else {
                dropped_unmatched += 1;
                continue;
            };

            let date = self.parse_date(&row.date)?;
            records.push(CheckoutRecord::new(
                date,
                row.title.clone(),
                row.subjects.clone(),
                entry.format_group.clone(),
                entry.format_subgroup.clone(),
                entry.category_group.clone(),
                entry.age_group.clone(),
            ));
        }

        if dropped_unmatched > 0 {
            warn!(
                dropped = dropped_unmatched,
                "rows dropped by dictionary join (collection code unmatched)"
            );
        }

        self.apply_lumping_passes(&mut records);

        Ok(TransformOutcome {
            records,
            dropped_unmatched,
        })
    }

    /// Prepare the dictionary from `dictionary_path` and transform against it.
    pub fn transform_from_file(
        &self,
        raw: &[RawCheckout],
        dictionary_path: &std::path::Path,
    ) -> Result<TransformOutcome> {
        let dictionary = crate::readers::DictionaryReader::new().read_dictionary(dictionary_path)?;
        self.transform(raw, &dictionary)
    }

    /// Parse with the strict configured format, truncating any time-of-day
    /// component to a calendar date.
    fn parse_date(&self, value: &str) -> Result<NaiveDate> {
        match NaiveDateTime::parse_from_str(value, &self.date_format) {
            Ok(datetime) => Ok(datetime.date()),
            // A date-only format string has no time fields for the datetime
            // parse to fill; retry as a bare date before giving up.
            Err(datetime_err) => NaiveDate::parse_from_str(value, &self.date_format)
                .map_err(|_| datetime_err.into()),
        }
    }

    fn apply_lumping_passes(&self, records: &mut [CheckoutRecord]) {
        // 1. Device titles were catalogued under book collections; lump
        //    them into their own format group.
        relabel_in_place(
            records,
            CategoryField::Title,
            CategoryField::FormatGroup,
            &EQUIPMENT_TITLES,
            EQUIPMENT_FORMAT_GROUP,
        );

        // 2. Same titles, subgroup level.
        relabel_in_place(
            records,
            CategoryField::Title,
            CategoryField::FormatSubgroup,
            &EQUIPMENT_TITLES,
            KIT_FORMAT_SUBGROUP,
        );

        // 3. Reads format_group as already rewritten by pass 1.
        relabel_in_place(
            records,
            CategoryField::FormatGroup,
            CategoryField::FormatGroup,
            &ELECTRONIC_FORMAT_GROUPS,
            OTHER_LABEL,
        );

        // 4. Low-volume category groups fold into Other.
        relabel_in_place(
            records,
            CategoryField::CategoryGroup,
            CategoryField::CategoryGroup,
            &MISC_CATEGORY_GROUPS,
            OTHER_LABEL,
        );
    }
}

impl Default for RecordTransformer {
    fn default() -> Self {
        Self::new()
    }
}
