use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProjectionError, Result};
use crate::models::ScenarioDefinition;
use crate::utils::constants::{
    DEFAULT_HORIZONS, DEFAULT_MIN_TREND_YEARS, FAR_ANCHOR_YEAR, NEAR_ANCHOR_YEAR,
};

/// The station whose record is being analysed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationInfo {
    pub id: String,
    pub name: String,
}

impl Default for StationInfo {
    fn default() -> Self {
        Self {
            id: "11723".to_string(),
            name: "Brno-Turany".to_string(),
        }
    }
}

/// Externally supplied analysis parameters. The core contains no hard-coded
/// policy values beyond the regime *rule* itself; everything here can be
/// overridden from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    pub station: StationInfo,

    /// Analysis date range (inclusive). Dates are quoted ISO strings in TOML.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Horizons as year offsets past the reference year.
    #[validate(length(min = 1, message = "at least one horizon is required"))]
    pub horizons: Vec<i32>,

    #[validate(length(min = 1, message = "at least one scenario is required"))]
    pub scenarios: Vec<ScenarioDefinition>,

    /// Minimum number of defined yearly aggregates required for a trend fit.
    #[validate(range(min = 2, message = "a trend needs at least two years"))]
    pub min_trend_years: usize,

    /// "Current" year projections are measured from. Defaults to the end of
    /// the observed record.
    pub reference_year: Option<i32>,

    /// Anchor years of the scenario guidance.
    pub near_anchor_year: i32,
    pub far_anchor_year: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            station: StationInfo::default(),
            start_date: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            end_date: Local::now().date_naive(),
            horizons: DEFAULT_HORIZONS.to_vec(),
            scenarios: ScenarioDefinition::ar6_defaults(),
            min_trend_years: DEFAULT_MIN_TREND_YEARS,
            reference_year: None,
            near_anchor_year: NEAR_ANCHOR_YEAR,
            far_anchor_year: FAR_ANCHOR_YEAR,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file, with defaults for any field the
    /// file omits.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;
        let cfg: AnalysisConfig = settings.try_deserialize()?;
        Ok(cfg)
    }

    pub fn effective_reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| self.end_date.year())
    }

    /// Reject a malformed request before any aggregation work begins.
    pub fn validate_request(&self) -> Result<()> {
        self.validate()?;

        if self.start_date > self.end_date {
            return Err(ProjectionError::InvalidRange(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }

        if let Some(&bad) = self.horizons.iter().find(|&&h| h <= 0) {
            return Err(ProjectionError::InvalidHorizon(bad));
        }

        if self.near_anchor_year >= self.far_anchor_year {
            return Err(ProjectionError::InvalidRange(format!(
                "near anchor year {} must precede far anchor year {}",
                self.near_anchor_year, self.far_anchor_year
            )));
        }

        let reference_year = self.effective_reference_year();
        if reference_year >= self.near_anchor_year {
            return Err(ProjectionError::InvalidRange(format!(
                "reference year {} must precede the near anchor year {}",
                reference_year, self.near_anchor_year
            )));
        }

        Ok(())
    }
}
