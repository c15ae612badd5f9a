use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One checkout event as it arrives from a CSV export or the open-data API,
/// before date parsing and dictionary enrichment. The `date` field is the
/// raw timestamp string; the transformer parses it with a strict format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCheckout {
    pub collection: String,
    pub title: String,
    pub subjects: Option<String>,
    pub date: String,
}

impl RawCheckout {
    pub fn new(collection: String, title: String, subjects: Option<String>, date: String) -> Self {
        Self {
            collection,
            title,
            subjects,
            date,
        }
    }
}

/// A checkout record after joining against the data dictionary: the
/// collection code is resolved into the four categorical columns and the
/// timestamp is truncated to a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CheckoutRecord {
    pub date: NaiveDate,

    #[validate(length(min = 1))]
    pub title: String,

    pub subjects: Option<String>,

    #[validate(length(min = 1))]
    pub format_group: String,

    #[validate(length(min = 1))]
    pub format_subgroup: String,

    #[validate(length(min = 1))]
    pub category_group: String,

    #[validate(length(min = 1))]
    pub age_group: String,
}

impl CheckoutRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        title: String,
        subjects: Option<String>,
        format_group: String,
        format_subgroup: String,
        category_group: String,
        age_group: String,
    ) -> Self {
        Self {
            date,
            title,
            subjects,
            format_group,
            format_subgroup,
            category_group,
            age_group,
        }
    }

    pub fn is_equipment(&self) -> bool {
        self.format_group == crate::utils::constants::EQUIPMENT_FORMAT_GROUP
    }

    pub fn field(&self, field: CategoryField) -> &str {
        match field {
            CategoryField::Title => &self.title,
            CategoryField::FormatGroup => &self.format_group,
            CategoryField::FormatSubgroup => &self.format_subgroup,
            CategoryField::CategoryGroup => &self.category_group,
            CategoryField::AgeGroup => &self.age_group,
        }
    }

    pub fn set_field(&mut self, field: CategoryField, value: String) {
        match field {
            CategoryField::Title => self.title = value,
            CategoryField::FormatGroup => self.format_group = value,
            CategoryField::FormatSubgroup => self.format_subgroup = value,
            CategoryField::CategoryGroup => self.category_group = value,
            CategoryField::AgeGroup => self.age_group = value,
        }
    }
}

/// The columns a relabeling pass can search against or substitute into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Title,
    FormatGroup,
    FormatSubgroup,
    CategoryGroup,
    AgeGroup,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CheckoutRecord {
        CheckoutRecord::new(
            NaiveDate::from_ymd_opt(2020, 9, 14).unwrap(),
            "The Left Hand of Darkness".to_string(),
            Some("Science fiction".to_string()),
            "Book".to_string(),
            "Fiction".to_string(),
            "Fiction".to_string(),
            "Adult".to_string(),
        )
    }

    #[test]
    fn test_record_validation() {
        let record = sample_record();
        assert!(record.validate().is_ok());
        assert!(!record.is_equipment());

        let mut blank = record.clone();
        blank.format_group = String::new();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_field_accessors() {
        let mut record = sample_record();
        assert_eq!(record.field(CategoryField::FormatGroup), "Book");
        assert_eq!(record.field(CategoryField::Title), "The Left Hand of Darkness");

        record.set_field(CategoryField::FormatGroup, "Equipment".to_string());
        assert_eq!(record.field(CategoryField::FormatGroup), "Equipment");
        assert!(record.is_equipment());
    }
}
