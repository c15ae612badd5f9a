pub mod checkout_reader;
pub mod chunk_reader;
pub mod dictionary_reader;

pub use checkout_reader::{CheckoutReader, ColumnMap};
pub use chunk_reader::ChunkReader;
pub use dictionary_reader::DictionaryReader;
