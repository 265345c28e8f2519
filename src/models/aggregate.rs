use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ClimateVariable, Statistic};

/// Resampling granularity for period aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Monthly,
    Yearly,
}

/// Calendar period a daily observation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodKey {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    pub fn from_date(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Yearly => PeriodKey::Year(date.year()),
            Granularity::Monthly => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            PeriodKey::Year(y) => *y,
            PeriodKey::Month { year, .. } => *year,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PeriodKey::Year(y) => format!("{y}"),
            PeriodKey::Month { year, month } => format!("{year}-{month:02}"),
        }
    }
}

/// Summary statistics over the valid (non-missing) values of one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub mean: f64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl AggregateStats {
    /// Returns `None` for an empty slice: a period with no valid values has
    /// no statistics, not zeroed ones.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sum: f64 = values.iter().sum();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        Some(Self {
            mean: sum / values.len() as f64,
            sum,
            min,
            max,
            count: values.len(),
        })
    }

    pub fn statistic(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Mean => self.mean,
            Statistic::Sum => self.sum,
        }
    }
}

/// Aggregate of one variable over one period.
///
/// `stats` is `None` when the period contained no valid observation for the
/// variable. Such aggregates are kept in the output so consumers can detect
/// the gap instead of silently biasing a trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    pub period: PeriodKey,
    pub variable: ClimateVariable,
    pub stats: Option<AggregateStats>,
    pub n_valid: usize,
}

impl PeriodAggregate {
    pub fn is_defined(&self) -> bool {
        self.stats.is_some()
    }

    /// Value of the variable's trend statistic, if the aggregate is defined.
    pub fn trend_value(&self) -> Option<f64> {
        self.stats
            .as_ref()
            .map(|s| s.statistic(self.variable.yearly_statistic()))
    }
}
