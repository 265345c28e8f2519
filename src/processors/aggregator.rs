use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{
    AggregateStats, ClimateVariable, DailyObservation, Granularity, PeriodAggregate, PeriodKey,
};

/// Resampled view of a daily record at one granularity.
///
/// Entries are sorted by (variable, period) and cover every (period,
/// variable) pair the input touched, including pairs where every daily value
/// was missing: those carry `stats: None` so consumers can see the gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateTable {
    pub granularity: Granularity,
    pub entries: Vec<PeriodAggregate>,
}

impl AggregateTable {
    /// Aggregates for one variable, in period order.
    pub fn series(&self, variable: ClimateVariable) -> Vec<&PeriodAggregate> {
        self.entries
            .iter()
            .filter(|a| a.variable == variable)
            .collect()
    }

    pub fn get(&self, period: PeriodKey, variable: ClimateVariable) -> Option<&PeriodAggregate> {
        self.entries
            .iter()
            .find(|a| a.period == period && a.variable == variable)
    }
}

/// Resamples a daily series into per-period summary statistics.
///
/// Pure function of its input: tolerates gaps, assumes nothing about
/// days-per-period, and holds no state between calls.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(
        &self,
        observations: &[DailyObservation],
        granularity: Granularity,
    ) -> AggregateTable {
        let mut periods: BTreeSet<PeriodKey> = BTreeSet::new();
        let mut values: BTreeMap<(ClimateVariable, PeriodKey), Vec<f64>> = BTreeMap::new();

        for obs in observations {
            let period = PeriodKey::from_date(obs.date, granularity);
            periods.insert(period);

            for variable in ClimateVariable::ALL {
                if let Some(v) = obs.value(variable) {
                    values.entry((variable, period)).or_default().push(v);
                }
            }
        }

        let mut entries = Vec::with_capacity(periods.len() * ClimateVariable::ALL.len());
        for variable in ClimateVariable::ALL {
            for &period in &periods {
                let vals = values
                    .get(&(variable, period))
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);

                entries.push(PeriodAggregate {
                    period,
                    variable,
                    stats: AggregateStats::from_values(vals),
                    n_valid: vals.len(),
                });
            }
        }

        AggregateTable {
            granularity,
            entries,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
