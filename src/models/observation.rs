use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The closed set of climate variables tracked for a station.
///
/// Keeping this as an enum (rather than free-form strings) lets the
/// scenario projector handle each class of variable with a checked branch,
/// in particular the low-confidence rule for wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateVariable {
    TempAvg,
    TempMin,
    TempMax,
    Precipitation,
    WindSpeed,
}

/// Scenario-adjustment class of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// Adjustments are additive deltas in °C.
    Temperature,
    /// Adjustments are percentage multipliers on the trend base.
    Precipitation,
    /// Percentage multipliers, flagged low-confidence in every projection.
    Wind,
}

/// Which yearly statistic feeds the trend fit for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    Mean,
    Sum,
}

impl ClimateVariable {
    pub const ALL: [ClimateVariable; 5] = [
        ClimateVariable::TempAvg,
        ClimateVariable::TempMin,
        ClimateVariable::TempMax,
        ClimateVariable::Precipitation,
        ClimateVariable::WindSpeed,
    ];

    /// Meteostat-style column name.
    pub fn column_name(&self) -> &'static str {
        match self {
            ClimateVariable::TempAvg => "tavg",
            ClimateVariable::TempMin => "tmin",
            ClimateVariable::TempMax => "tmax",
            ClimateVariable::Precipitation => "prcp",
            ClimateVariable::WindSpeed => "wspd",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.kind() {
            VariableKind::Temperature => "°C",
            VariableKind::Precipitation => "mm",
            VariableKind::Wind => "km/h",
        }
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            ClimateVariable::TempAvg | ClimateVariable::TempMin | ClimateVariable::TempMax => {
                VariableKind::Temperature
            }
            ClimateVariable::Precipitation => VariableKind::Precipitation,
            ClimateVariable::WindSpeed => VariableKind::Wind,
        }
    }

    /// Temperatures and wind are averaged over a year; precipitation is
    /// accumulated.
    pub fn yearly_statistic(&self) -> Statistic {
        match self.kind() {
            VariableKind::Precipitation => Statistic::Sum,
            _ => Statistic::Mean,
        }
    }
}

impl fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One day of station observations. Any variable may be missing; a missing
/// value is `None` and must never be coerced to zero downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub temp_avg: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl DailyObservation {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            temp_avg: None,
            temp_min: None,
            temp_max: None,
            precipitation: None,
            wind_speed: None,
        }
    }

    pub fn value(&self, variable: ClimateVariable) -> Option<f64> {
        match variable {
            ClimateVariable::TempAvg => self.temp_avg,
            ClimateVariable::TempMin => self.temp_min,
            ClimateVariable::TempMax => self.temp_max,
            ClimateVariable::Precipitation => self.precipitation,
            ClimateVariable::WindSpeed => self.wind_speed,
        }
    }

    pub fn set_value(&mut self, variable: ClimateVariable, value: Option<f64>) {
        let slot = match variable {
            ClimateVariable::TempAvg => &mut self.temp_avg,
            ClimateVariable::TempMin => &mut self.temp_min,
            ClimateVariable::TempMax => &mut self.temp_max,
            ClimateVariable::Precipitation => &mut self.precipitation,
            ClimateVariable::WindSpeed => &mut self.wind_speed,
        };
        *slot = value;
    }

    pub fn has_any_data(&self) -> bool {
        ClimateVariable::ALL.iter().any(|v| self.value(*v).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_kinds() {
        assert_eq!(ClimateVariable::TempMin.kind(), VariableKind::Temperature);
        assert_eq!(
            ClimateVariable::Precipitation.kind(),
            VariableKind::Precipitation
        );
        assert_eq!(ClimateVariable::WindSpeed.kind(), VariableKind::Wind);
    }

    #[test]
    fn test_yearly_statistic_selection() {
        assert_eq!(
            ClimateVariable::Precipitation.yearly_statistic(),
            Statistic::Sum
        );
        assert_eq!(ClimateVariable::TempAvg.yearly_statistic(), Statistic::Mean);
        assert_eq!(
            ClimateVariable::WindSpeed.yearly_statistic(),
            Statistic::Mean
        );
    }

    #[test]
    fn test_observation_accessors() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let mut obs = DailyObservation::empty(date);
        assert!(!obs.has_any_data());

        obs.set_value(ClimateVariable::TempAvg, Some(18.2));
        assert_eq!(obs.value(ClimateVariable::TempAvg), Some(18.2));
        assert_eq!(obs.value(ClimateVariable::Precipitation), None);
        assert!(obs.has_any_data());
    }
}
