pub mod series_analyzer;

pub use series_analyzer::{
    Decomposition, RollingStats, RollingWindow, SeriesAnalyzer, SeriesStatistics,
};
