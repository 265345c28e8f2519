pub mod aggregate;
pub mod observation;
pub mod projection;
pub mod scenario;
pub mod trend;

pub use aggregate::{AggregateStats, Granularity, PeriodAggregate, PeriodKey};
pub use observation::{ClimateVariable, DailyObservation, Statistic, VariableKind};
pub use projection::{HorizonRegime, Projection};
pub use scenario::{AnchoredDelta, ScenarioDefinition};
pub use trend::{FitQuality, TrendModel};
