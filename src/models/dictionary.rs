use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// One prepared data-dictionary row: a collection code and the categorical
/// metadata it resolves to. `description`, `code_type` and
/// `category_subgroup` are dropped at load time; they have no consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DictionaryEntry {
    #[validate(length(min = 1))]
    pub code: String,

    #[validate(length(min = 1))]
    pub format_group: String,

    #[validate(length(min = 1))]
    pub format_subgroup: String,

    #[validate(length(min = 1))]
    pub category_group: String,

    #[validate(length(min = 1))]
    pub age_group: String,
}

impl DictionaryEntry {
    pub fn new(
        code: String,
        format_group: String,
        format_subgroup: String,
        category_group: String,
        age_group: String,
    ) -> Self {
        Self {
            code,
            format_group,
            format_subgroup,
            category_group,
            age_group,
        }
    }
}

/// The categorical columns carried by a dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryField {
    FormatGroup,
    FormatSubgroup,
    CategoryGroup,
    AgeGroup,
}

/// Prepared data dictionary: entries keyed by collection code.
///
/// The code is unique after filtering to `ItemCollection` rows; a duplicate
/// would make the record join ambiguous, so insertion rejects it.
#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    entries: HashMap<String, DictionaryEntry>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, entry: DictionaryEntry) -> Result<()> {
        entry.validate()?;
        if self.entries.contains_key(&entry.code) {
            return Err(ProcessingError::DuplicateCode { code: entry.code });
        }
        self.entries.insert(entry.code.clone(), entry);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&DictionaryEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.values()
    }

    /// The finite label domain of one categorical field across all entries.
    pub fn label_domain(&self, field: DictionaryField) -> BTreeSet<&str> {
        self.entries
            .values()
            .map(|e| match field {
                DictionaryField::FormatGroup => e.format_group.as_str(),
                DictionaryField::FormatSubgroup => e.format_subgroup.as_str(),
                DictionaryField::CategoryGroup => e.category_group.as_str(),
                DictionaryField::AgeGroup => e.age_group.as_str(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, format_group: &str) -> DictionaryEntry {
        DictionaryEntry::new(
            code.to_string(),
            format_group.to_string(),
            "Fiction".to_string(),
            "Fiction".to_string(),
            "Adult".to_string(),
        )
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut dict = DataDictionary::new();
        dict.insert(entry("nafic", "Book")).unwrap();
        dict.insert(entry("cafic", "Audiobook")).unwrap();

        assert_eq!(dict.len(), 2);
        assert!(dict.contains("nafic"));
        assert_eq!(dict.get("cafic").unwrap().format_group, "Audiobook");
        assert!(dict.get("unknown").is_none());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut dict = DataDictionary::new();
        dict.insert(entry("nafic", "Book")).unwrap();

        let err = dict.insert(entry("nafic", "Book")).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::DuplicateCode { code } if code == "nafic"
        ));
    }

    #[test]
    fn test_label_domain() {
        let mut dict = DataDictionary::new();
        dict.insert(entry("a", "Book")).unwrap();
        dict.insert(entry("b", "Electronic")).unwrap();
        dict.insert(entry("c", "Book")).unwrap();

        let domain = dict.label_domain(DictionaryField::FormatGroup);
        assert_eq!(domain.into_iter().collect::<Vec<_>>(), vec!["Book", "Electronic"]);
    }

    #[test]
    fn test_blank_entry_rejected() {
        let mut dict = DataDictionary::new();
        let err = dict.insert(entry("", "Book"));
        assert!(err.is_err());
    }
}
