use chrono::NaiveDate;

use crate::error::{ProjectionError, Result};
use crate::models::{AggregateStats, ClimateVariable, DailyObservation};

/// Per-variable coverage of a daily record.
#[derive(Debug, Clone)]
pub struct VariableCoverage {
    pub variable: ClimateVariable,
    pub n_valid: usize,
    pub coverage_pct: f64,
    /// Undefined when the variable has no valid value at all.
    pub stats: Option<AggregateStats>,
}

#[derive(Debug, Clone)]
pub struct ObservationStatistics {
    pub total_days: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub coverage: Vec<VariableCoverage>,
}

/// Summarizes a raw daily record before analysis: date span and how complete
/// each variable is. Used by the `info` and `validate` commands.
pub struct ObservationAnalyzer;

impl ObservationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, observations: &[DailyObservation]) -> Result<ObservationStatistics> {
        if observations.is_empty() {
            return Err(ProjectionError::MissingData(
                "no observations to analyze".to_string(),
            ));
        }

        let mut min_date = observations[0].date;
        let mut max_date = observations[0].date;
        for obs in observations {
            if obs.date < min_date {
                min_date = obs.date;
            }
            if obs.date > max_date {
                max_date = obs.date;
            }
        }

        let total_days = observations.len();
        let mut coverage = Vec::with_capacity(ClimateVariable::ALL.len());
        for variable in ClimateVariable::ALL {
            let values: Vec<f64> = observations
                .iter()
                .filter_map(|o| o.value(variable))
                .collect();

            coverage.push(VariableCoverage {
                variable,
                n_valid: values.len(),
                coverage_pct: (values.len() as f64 / total_days as f64) * 100.0,
                stats: AggregateStats::from_values(&values),
            });
        }

        Ok(ObservationStatistics {
            total_days,
            date_range: (min_date, max_date),
            coverage,
        })
    }
}

impl Default for ObservationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationStatistics {
    pub fn summary(&self) -> String {
        let years = self
            .date_range
            .1
            .signed_duration_since(self.date_range.0)
            .num_days()
            / 365;

        let mut lines = vec![format!(
            "Daily Record: {} days, {} to {} ({} years)",
            self.total_days, self.date_range.0, self.date_range.1, years
        )];

        for cov in &self.coverage {
            let detail = match &cov.stats {
                Some(s) => format!(
                    "{:.1} to {:.1} {unit}, mean {:.1} {unit}",
                    s.min,
                    s.max,
                    s.mean,
                    unit = cov.variable.unit()
                ),
                None => "no valid measurements".to_string(),
            };
            lines.push(format!(
                "  {:<5} {:>7} valid ({:>5.1}%): {}",
                cov.variable.column_name(),
                cov.n_valid,
                cov.coverage_pct,
                detail
            ));
        }

        lines.join("\n")
    }
}
