pub mod imputer;
pub mod relabeler;
pub mod transformer;

pub use imputer::{GapFillReport, GapImputer};
pub use relabeler::{relabel, relabel_in_place};
pub use transformer::{RecordTransformer, TransformOutcome};
