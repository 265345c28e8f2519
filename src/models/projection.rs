use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ClimateVariable;

/// Projection regime, a pure function of the target year.
///
/// Published pathway guidance provides anchor values at 2100 and 2300;
/// beyond 2300 the adjustment is frozen at its 2300 value while the linear
/// trend base keeps moving. The freeze is a deliberate modeling choice to
/// avoid non-physical extrapolation, not a scientific claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonRegime {
    /// reference_year < target ≤ near anchor (2100): adjustment ramps up to
    /// the near-anchor value.
    NearTerm,
    /// near anchor < target ≤ far anchor (2300): adjustment interpolated
    /// between the two anchors, a distinct segment from the near-term ramp.
    Extended,
    /// target > far anchor: adjustment frozen at the 2300 value.
    Far,
}

impl HorizonRegime {
    pub fn classify(target_year: i32, near_anchor_year: i32, far_anchor_year: i32) -> Self {
        if target_year <= near_anchor_year {
            HorizonRegime::NearTerm
        } else if target_year <= far_anchor_year {
            HorizonRegime::Extended
        } else {
            HorizonRegime::Far
        }
    }
}

impl fmt::Display for HorizonRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HorizonRegime::NearTerm => "near-term",
            HorizonRegime::Extended => "extended",
            HorizonRegime::Far => "far",
        };
        f.write_str(label)
    }
}

/// One projected value for a (variable, scenario, horizon) combination.
/// Created fresh per combination and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub variable: ClimateVariable,
    pub scenario: String,
    pub target_year: i32,
    pub horizon_years: i32,
    /// Linear trend extrapolated to the target year, before adjustment.
    pub base_value: f64,
    /// Scenario adjustment applied: additive °C for temperature, percent
    /// for precipitation and wind.
    pub adjustment: f64,
    pub projected_value: f64,
    pub regime: HorizonRegime,
    /// Human-readable derivation note, including the low-confidence caveat
    /// for wind variables.
    pub method_note: String,
}
