use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::{ProcessingError, Result};
use crate::models::CheckoutRecord;
use crate::utils::constants::GZIP_CHUNK_EXT;
use crate::utils::progress::{StatusReporter, Verbosity};
use crate::writers::ChunkCompression;

/// Reassembles a table from its numbered chunk artifacts.
///
/// Artifacts are read strictly in index order (1 first, then 2..=n) and
/// concatenated; row identity in the result is positional. Reconstruction
/// is all-or-nothing: a missing or unreadable artifact aborts the load.
pub struct ChunkReader {
    extension: String,
    compression: Option<ChunkCompression>,
    status: StatusReporter,
}

impl ChunkReader {
    pub fn new() -> Self {
        Self {
            extension: GZIP_CHUNK_EXT.to_string(),
            compression: None,
            status: StatusReporter::new(Verbosity::Silent),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Force an encoding; the default infers it from the artifact extension.
    pub fn with_compression(mut self, compression: ChunkCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.status = StatusReporter::new(verbosity);
        self
    }

    /// Load artifacts `1..=count` from `dir` and concatenate them in order.
    pub fn load_chunks(
        &self,
        dir: &Path,
        base_name: &str,
        count: usize,
    ) -> Result<Vec<CheckoutRecord>> {
        self.status.update("Begin load...");

        let mut records = Vec::new();
        for index in 1..=count {
            let path = self.artifact_path(dir, base_name, index);
            if !path.exists() {
                return Err(ProcessingError::ChunkMissing { path });
            }

            let chunk = self.read_artifact(&path)?;
            self.status
                .update_per_file(&format!("File {} loaded successfully.", index));

            records.extend(chunk);
            self.status.update_per_file(&format!(
                "Concatenation successful. Table consists of files 1-{}.",
                index
            ));
        }

        self.status.update("Load complete!");
        Ok(records)
    }

    fn artifact_path(&self, dir: &Path, base_name: &str, index: usize) -> PathBuf {
        dir.join(format!("{}_{}.{}", base_name, index, self.extension))
    }

    fn read_artifact(&self, path: &Path) -> Result<Vec<CheckoutRecord>> {
        let file = File::open(path)?;
        let compression = self
            .compression
            .unwrap_or_else(|| ChunkCompression::infer_from_path(path));

        let source: Box<dyn Read> = match compression {
            ChunkCompression::Gzip => Box::new(GzDecoder::new(file)),
            ChunkCompression::None => Box::new(file),
        };

        let mut reader = csv::Reader::from_reader(BufReader::new(source));
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}

impl Default for ChunkReader {
    fn default() -> Self {
        Self::new()
    }
}
