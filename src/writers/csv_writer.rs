use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::models::{CheckoutRecord, RawCheckout};

/// Plain single-file CSV export, used by `fetch` (raw rows) and `reload`
/// (reassembled enriched rows).
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_records(&self, records: &[CheckoutRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_raw(&self, rows: &[RawCheckout], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_write_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/records.csv");

        let record = CheckoutRecord::new(
            NaiveDate::from_ymd_opt(2020, 9, 14).unwrap(),
            "Parable of the Sower".to_string(),
            Some("Science fiction".to_string()),
            "Book".to_string(),
            "Fiction".to_string(),
            "Fiction".to_string(),
            "Adult".to_string(),
        );

        CsvWriter::new().write_records(&[record], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("date,title,subjects,"));
        assert!(contents.contains("Parable of the Sower"));
    }
}
