use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ProcessingError, Result};
use crate::models::{DataDictionary, DictionaryEntry};
use crate::utils::constants::{DICTIONARY_SOURCE_COLUMNS, ITEM_COLLECTION_CODE_TYPE};

/// Loads and prepares the collection data dictionary.
///
/// The source export carries eight columns whose order has historically been
/// relied on positionally; mislabeling them silently corrupts every
/// downstream join, so the header is validated name-by-name before any row
/// is read. Only `ItemCollection` rows survive, and the description,
/// code-type and category-subgroup columns are dropped.
pub struct DictionaryReader;

impl DictionaryReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_dictionary(&self, path: &Path) -> Result<DataDictionary> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();
        self.validate_header(path, &headers)?;

        let code_idx = 0;
        let code_type_idx = 2;
        let format_group_idx = 3;
        let format_subgroup_idx = 4;
        let category_group_idx = 5;
        let age_group_idx = 7;

        let mut dictionary = DataDictionary::new();
        for row in reader.records() {
            let row = row?;

            if row.get(code_type_idx) != Some(ITEM_COLLECTION_CODE_TYPE) {
                continue;
            }

            let field = |idx: usize| -> Result<String> {
                row.get(idx)
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| {
                        ProcessingError::InvalidFormat(format!(
                            "Dictionary row has {} fields, expected {}",
                            row.len(),
                            DICTIONARY_SOURCE_COLUMNS.len()
                        ))
                    })
            };

            dictionary.insert(DictionaryEntry::new(
                field(code_idx)?,
                field(format_group_idx)?,
                field(format_subgroup_idx)?,
                field(category_group_idx)?,
                field(age_group_idx)?,
            ))?;
        }

        Ok(dictionary)
    }

    /// Fail loudly on any column-count or column-name drift.
    fn validate_header(&self, path: &Path, headers: &csv::StringRecord) -> Result<()> {
        let found: Vec<&str> = headers.iter().map(|h| h.trim()).collect();
        if found != DICTIONARY_SOURCE_COLUMNS {
            return Err(ProcessingError::SchemaMismatch {
                path: path.to_path_buf(),
                expected: DICTIONARY_SOURCE_COLUMNS.join(", "),
                found: found.join(", "),
            });
        }
        Ok(())
    }
}

impl Default for DictionaryReader {
    fn default() -> Self {
        Self::new()
    }
}
