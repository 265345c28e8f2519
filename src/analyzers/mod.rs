pub mod observation_analyzer;

pub use observation_analyzer::{ObservationAnalyzer, ObservationStatistics, VariableCoverage};
