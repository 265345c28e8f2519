use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::error::{ProjectionError, Result};
use crate::models::{ClimateVariable, DailyObservation, VariableKind};
use crate::utils::constants::{
    MAX_VALID_PRECIP, MAX_VALID_TEMP, MAX_VALID_WIND, MIN_VALID_PRECIP, MIN_VALID_TEMP,
    MIN_VALID_WIND,
};

/// One CSV row in Meteostat daily export layout. Empty cells are missing
/// values, not zeros.
#[derive(Debug, Deserialize)]
struct RawDailyRow {
    date: String,
    #[serde(default)]
    tavg: Option<f64>,
    #[serde(default)]
    tmin: Option<f64>,
    #[serde(default)]
    tmax: Option<f64>,
    #[serde(default)]
    prcp: Option<f64>,
    #[serde(default, alias = "wind")]
    wspd: Option<f64>,
}

/// ObservationSource boundary: reads an already-fetched daily station record
/// from CSV. Gap tolerant; rows may be sparse and out of order.
pub struct CsvObservationReader {
    strict: bool,
}

impl CsvObservationReader {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// In strict mode a physically implausible value fails the read; in the
    /// default lenient mode it is dropped and logged as if missing.
    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }

    pub fn read_file(&self, path: &Path) -> Result<Vec<DailyObservation>> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    /// Read and restrict to a caller-specified date range (inclusive).
    pub fn read_range(
        &self,
        path: &Path,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyObservation>> {
        if start > end {
            return Err(ProjectionError::InvalidRange(format!(
                "start date {start} is after end date {end}"
            )));
        }

        let mut observations = self.read_file(path)?;
        observations.retain(|o| o.date >= start && o.date <= end);
        Ok(observations)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<DailyObservation>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut observations = Vec::new();
        for row in csv_reader.deserialize::<RawDailyRow>() {
            let row = row?;
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")?;

            let mut obs = DailyObservation::empty(date);
            obs.temp_avg = self.screen(ClimateVariable::TempAvg, date, row.tavg)?;
            obs.temp_min = self.screen(ClimateVariable::TempMin, date, row.tmin)?;
            obs.temp_max = self.screen(ClimateVariable::TempMax, date, row.tmax)?;
            obs.precipitation = self.screen(ClimateVariable::Precipitation, date, row.prcp)?;
            obs.wind_speed = self.screen(ClimateVariable::WindSpeed, date, row.wspd)?;
            observations.push(obs);
        }

        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }

    fn screen(
        &self,
        variable: ClimateVariable,
        date: NaiveDate,
        value: Option<f64>,
    ) -> Result<Option<f64>> {
        let Some(v) = value else {
            return Ok(None);
        };

        let (lo, hi) = match variable.kind() {
            VariableKind::Temperature => (MIN_VALID_TEMP, MAX_VALID_TEMP),
            VariableKind::Precipitation => (MIN_VALID_PRECIP, MAX_VALID_PRECIP),
            VariableKind::Wind => (MIN_VALID_WIND, MAX_VALID_WIND),
        };

        if !v.is_finite() || v < lo || v > hi {
            if self.strict {
                return Err(ProjectionError::InvalidFormat(format!(
                    "{variable} value {v} on {date} is outside the plausible range [{lo}, {hi}]"
                )));
            }
            warn!(%variable, %date, value = v, "dropping implausible value");
            return Ok(None);
        }

        Ok(Some(v))
    }
}

impl Default for CsvObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
