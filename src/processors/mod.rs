pub mod aggregator;
pub mod pipeline;
pub mod projector;
pub mod trend_estimator;

pub use aggregator::{AggregateTable, Aggregator};
pub use pipeline::{AnalysisPipeline, Baseline, ClimateReport};
pub use projector::{ProjectionPolicy, ScenarioProjector};
pub use trend_estimator::TrendEstimator;
