pub mod checkout;
pub mod dictionary;
pub mod series;

pub use checkout::{CategoryField, CheckoutRecord, RawCheckout};
pub use dictionary::{DataDictionary, DictionaryEntry, DictionaryField};
pub use series::TimeSeries;
