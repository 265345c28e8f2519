use serde::{Deserialize, Serialize};

use crate::models::{ClimateVariable, Granularity};

/// Goodness-of-fit indicators for a trend regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Coefficient of determination in [0, 1].
    pub r_squared: f64,
    /// Number of yearly points used in the fit.
    pub n_years: usize,
    /// Yearly aggregates excluded because they were undefined.
    pub n_excluded: usize,
}

/// Least-squares linear trend of a yearly aggregate against year.
///
/// The intercept is referenced to `reference_year` rather than year zero so
/// that evaluation at distant target years does not amplify rounding in the
/// intercept term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub variable: ClimateVariable,
    pub granularity: Granularity,
    pub slope_per_year: f64,
    pub intercept: f64,
    pub reference_year: i32,
    pub fit_quality: FitQuality,
}

impl TrendModel {
    /// Trend value extrapolated (or interpolated) to a calendar year.
    pub fn value_at(&self, year: i32) -> f64 {
        self.intercept + self.slope_per_year * f64::from(year - self.reference_year)
    }
}
