use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{ProcessingError, Result};
use crate::models::RawCheckout;
use crate::utils::constants::{
    API_COLLECTION_FIELD, API_DATE_FIELD, API_SUBJECTS_FIELD, API_TITLE_FIELD,
    DEFAULT_BUFFER_SIZE, EXPORT_COLLECTION_COLUMN, EXPORT_DATE_COLUMN, EXPORT_SUBJECTS_COLUMN,
    EXPORT_TITLE_COLUMN,
};

/// Explicit source-column names for the four fields the pipeline consumes.
///
/// The raw exports carry more columns than we use; addressing the ones we
/// need by name (and failing when a name is absent) replaces the positional
/// `usecols`/rename convention that silently mislabels on column drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub collection: String,
    pub title: String,
    pub subjects: String,
    pub date: String,
}

impl ColumnMap {
    /// Column names used by the flat CSV exports.
    pub fn export_default() -> Self {
        Self {
            collection: EXPORT_COLLECTION_COLUMN.to_string(),
            title: EXPORT_TITLE_COLUMN.to_string(),
            subjects: EXPORT_SUBJECTS_COLUMN.to_string(),
            date: EXPORT_DATE_COLUMN.to_string(),
        }
    }

    /// Field names used by Socrata API payloads.
    pub fn api_default() -> Self {
        Self {
            collection: API_COLLECTION_FIELD.to_string(),
            title: API_TITLE_FIELD.to_string(),
            subjects: API_SUBJECTS_FIELD.to_string(),
            date: API_DATE_FIELD.to_string(),
        }
    }

    fn names(&self) -> [&str; 4] {
        [&self.collection, &self.title, &self.subjects, &self.date]
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::export_default()
    }
}

/// Reads raw checkout rows from a CSV export.
///
/// The full physical-items export runs to ~100M rows, so a memory-mapped
/// read path is available alongside buffered I/O.
pub struct CheckoutReader {
    column_map: ColumnMap,
    use_mmap: bool,
}

impl CheckoutReader {
    pub fn new() -> Self {
        Self {
            column_map: ColumnMap::export_default(),
            use_mmap: false,
        }
    }

    pub fn with_column_map(mut self, column_map: ColumnMap) -> Self {
        self.column_map = column_map;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn read_checkouts(&self, path: &Path) -> Result<Vec<RawCheckout>> {
        let file = File::open(path)?;
        if self.use_mmap {
            let mmap = unsafe { Mmap::map(&file)? };
            self.read_from(path, csv::Reader::from_reader(&mmap[..]))
        } else {
            let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
            self.read_from(path, csv::Reader::from_reader(reader))
        }
    }

    fn read_from<R: std::io::Read>(
        &self,
        path: &Path,
        mut reader: csv::Reader<R>,
    ) -> Result<Vec<RawCheckout>> {
        let headers = reader.headers()?.clone();
        let indices = self.resolve_columns(path, &headers)?;

        let mut checkouts = Vec::new();
        for row in reader.records() {
            let row = row?;
            checkouts.push(self.parse_row(&row, indices)?);
        }
        Ok(checkouts)
    }

    /// Locate each mapped column in the header, failing with the full
    /// expected/found picture when any is absent.
    fn resolve_columns(
        &self,
        path: &Path,
        headers: &csv::StringRecord,
    ) -> Result<[usize; 4]> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let mut indices = [0usize; 4];
        for (slot, name) in indices.iter_mut().zip(self.column_map.names()) {
            *slot = position(name).ok_or_else(|| ProcessingError::SchemaMismatch {
                path: path.to_path_buf(),
                expected: self.column_map.names().join(", "),
                found: headers.iter().collect::<Vec<_>>().join(", "),
            })?;
        }
        Ok(indices)
    }

    fn parse_row(&self, row: &csv::StringRecord, indices: [usize; 4]) -> Result<RawCheckout> {
        let field = |idx: usize| -> Result<&str> {
            row.get(idx).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Checkout row has {} fields, column {} is out of range",
                    row.len(),
                    idx
                ))
            })
        };

        let [collection_idx, title_idx, subjects_idx, date_idx] = indices;
        let subjects = field(subjects_idx)?.trim();

        Ok(RawCheckout::new(
            field(collection_idx)?.trim().to_string(),
            field(title_idx)?.trim().to_string(),
            (!subjects.is_empty()).then(|| subjects.to_string()),
            field(date_idx)?.trim().to_string(),
        ))
    }
}

impl Default for CheckoutReader {
    fn default() -> Self {
        Self::new()
    }
}
