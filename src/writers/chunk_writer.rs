use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{ProcessingError, Result};
use crate::models::CheckoutRecord;
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, GZIP_CHUNK_EXT, PLAIN_CHUNK_EXT};
use crate::utils::filename::chunk_artifact_path;
use crate::utils::progress::{StatusReporter, Verbosity};

/// Encoding of a chunk artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkCompression {
    Gzip,
    None,
}

impl ChunkCompression {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "gzip" => Ok(ChunkCompression::Gzip),
            "none" => Ok(ChunkCompression::None),
            _ => Err(ProcessingError::Config(format!(
                "Unsupported compression: {}",
                name
            ))),
        }
    }

    /// Infer the encoding from an artifact path, `.gz` meaning gzip.
    pub fn infer_from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => ChunkCompression::Gzip,
            _ => ChunkCompression::None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ChunkCompression::Gzip => GZIP_CHUNK_EXT,
            ChunkCompression::None => PLAIN_CHUNK_EXT,
        }
    }
}

/// Splits an enriched table into contiguous row windows and writes each
/// window as a numbered artifact: `{base_name}_{1..k}.{ext}`, 1-based.
///
/// Re-running with the same inputs overwrites the same artifacts with the
/// same bytes. There is no resumability marker: after a partial failure the
/// caller re-runs the whole persistence pass.
pub struct ChunkWriter {
    chunk_size: usize,
    compression: ChunkCompression,
    status: StatusReporter,
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression: ChunkCompression::Gzip,
            status: StatusReporter::new(Verbosity::Silent),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_compression(mut self, compression: ChunkCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.status = StatusReporter::new(verbosity);
        self
    }

    /// Write `records` as chunk artifacts under `dir` and return the
    /// artifact paths in index order. The last window may be shorter than
    /// `chunk_size`.
    pub fn write_chunks(
        &self,
        records: &[CheckoutRecord],
        dir: &Path,
        base_name: &str,
    ) -> Result<Vec<PathBuf>> {
        if self.chunk_size == 0 {
            return Err(ProcessingError::Config(
                "chunk size must be at least 1".to_string(),
            ));
        }

        std::fs::create_dir_all(dir)?;

        let total = (records.len() + self.chunk_size - 1) / self.chunk_size;
        self.status.update("Trying to save...");

        let mut paths = Vec::with_capacity(total);
        for (index, window) in records.chunks(self.chunk_size).enumerate() {
            let index = index + 1;
            let path = chunk_artifact_path(dir, base_name, index, self.compression);
            self.write_artifact(window, &path)?;
            self.status
                .update_per_file(&format!("File {} out of {} saved successfully", index, total));
            paths.push(path);
        }

        self.status.update("Save successful!");
        Ok(paths)
    }

    fn write_artifact(&self, window: &[CheckoutRecord], path: &Path) -> Result<()> {
        // Serialize in memory first so the gzip trailer is written with an
        // explicit finish rather than a drop that swallows errors.
        let mut raw = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut raw);
            for record in window {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        let file = File::create(path)?;
        match self.compression {
            ChunkCompression::Gzip => {
                let mut encoder = GzEncoder::new(file, Compression::default());
                encoder.write_all(&raw)?;
                encoder.finish()?;
            }
            ChunkCompression::None => {
                let mut writer = BufWriter::new(file);
                writer.write_all(&raw)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ChunkWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn records(n: usize) -> Vec<CheckoutRecord> {
        (0..n)
            .map(|i| {
                CheckoutRecord::new(
                    NaiveDate::from_ymd_opt(2020, 9, 1).unwrap() + chrono::Duration::days(i as i64),
                    format!("Title {}", i),
                    None,
                    "Book".to_string(),
                    "Fiction".to_string(),
                    "Fiction".to_string(),
                    "Adult".to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_chunk_naming_and_count() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ChunkWriter::new().with_chunk_size(10);

        let paths = writer
            .write_chunks(&records(25), temp_dir.path(), "seattle_lib")
            .unwrap();

        assert_eq!(paths.len(), 3);
        assert_eq!(
            paths[0],
            temp_dir.path().join("seattle_lib_1.csv.gz")
        );
        assert_eq!(
            paths[2],
            temp_dir.path().join("seattle_lib_3.csv.gz")
        );
        for path in &paths {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_idempotent_rewrite() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ChunkWriter::new().with_chunk_size(10);
        let data = records(25);

        let first = writer
            .write_chunks(&data, temp_dir.path(), "seattle_lib")
            .unwrap();
        let bytes_first: Vec<Vec<u8>> = first
            .iter()
            .map(|p| std::fs::read(p).unwrap())
            .collect();

        let second = writer
            .write_chunks(&data, temp_dir.path(), "seattle_lib")
            .unwrap();
        let bytes_second: Vec<Vec<u8>> = second
            .iter()
            .map(|p| std::fs::read(p).unwrap())
            .collect();

        assert_eq!(first, second);
        assert_eq!(bytes_first, bytes_second);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ChunkWriter::new().with_chunk_size(0);

        assert!(writer
            .write_chunks(&records(5), temp_dir.path(), "seattle_lib")
            .is_err());
    }

    #[test]
    fn test_compression_names() {
        assert_eq!(
            ChunkCompression::from_name("GZIP").unwrap(),
            ChunkCompression::Gzip
        );
        assert_eq!(
            ChunkCompression::from_name("none").unwrap(),
            ChunkCompression::None
        );
        assert!(ChunkCompression::from_name("snappy").is_err());

        assert_eq!(
            ChunkCompression::infer_from_path(Path::new("x/seattle_lib_1.csv.gz")),
            ChunkCompression::Gzip
        );
        assert_eq!(
            ChunkCompression::infer_from_path(Path::new("x/seattle_lib_1.csv")),
            ChunkCompression::None
        );
    }
}
