use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

use crate::writers::chunk_writer::ChunkCompression;

/// Build the path of chunk artifact `index` (1-based) under `dir`:
/// `{base_name}_{index}.{ext}` with the extension chosen by compression.
pub fn chunk_artifact_path(
    dir: &Path,
    base_name: &str,
    index: usize,
    compression: ChunkCompression,
) -> PathBuf {
    dir.join(format!("{}_{}.{}", base_name, index, compression.extension()))
}

/// Generate default raw-fetch filename with format: spl-checkouts-{YYMMDD}.csv
pub fn generate_default_fetch_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("spl-checkouts-{:02}{:02}{:02}.csv", year, month, day);
    PathBuf::from("output").join(filename)
}
