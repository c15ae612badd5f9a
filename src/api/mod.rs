pub mod client;

pub use client::{QueryOptions, SocrataClient};
