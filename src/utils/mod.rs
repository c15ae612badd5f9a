pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{chunk_artifact_path, generate_default_fetch_filename};
pub use progress::{ProgressReporter, StatusReporter, Verbosity};
