pub mod chunk_writer;
pub mod csv_writer;

pub use chunk_writer::{ChunkCompression, ChunkWriter};
pub use csv_writer::CsvWriter;
