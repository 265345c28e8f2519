use serde::{Deserialize, Serialize};

use crate::models::VariableKind;

/// Scenario adjustment anchored at the two years for which published
/// guidance provides values (2100 and 2300 by default).
///
/// For temperature variables the values are additive deltas in °C; for
/// precipitation and wind they are percentage changes applied to the trend
/// base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchoredDelta {
    /// Adjustment at the near anchor year (2100).
    pub near: f64,
    /// Adjustment at the far anchor year (2300). Frozen beyond it.
    pub far: f64,
}

/// Immutable per-pathway reference data, loaded once and shared read-only
/// across all projections.
///
/// A `None` entry means the pathway publishes no guidance for that class of
/// variable; projecting such a variable fails rather than silently skipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub temperature: Option<AnchoredDelta>,
    pub precipitation: Option<AnchoredDelta>,
    pub wind: Option<AnchoredDelta>,
}

impl ScenarioDefinition {
    /// Build a definition from AR6-style headline numbers: the 2100 deltas
    /// plus the documented extension multiplier that scales the temperature
    /// delta out to 2300. Precipitation and wind guidance is held constant
    /// past 2100, so their far anchor equals the near anchor.
    pub fn from_ar6(
        name: &str,
        temp_2100: f64,
        precip_pct_2100: f64,
        wind_pct_2100: f64,
        extension_multiplier_2300: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            temperature: Some(AnchoredDelta {
                near: temp_2100,
                far: temp_2100 * extension_multiplier_2300,
            }),
            precipitation: Some(AnchoredDelta {
                near: precip_pct_2100,
                far: precip_pct_2100,
            }),
            wind: Some(AnchoredDelta {
                near: wind_pct_2100,
                far: wind_pct_2100,
            }),
        }
    }

    /// The three SSP pathways used by the Brno analysis, with AR6 Europe
    /// factsheet deltas and the chapter-4 extension multipliers.
    pub fn ar6_defaults() -> Vec<ScenarioDefinition> {
        vec![
            ScenarioDefinition::from_ar6("SSP1-2.6", 1.5, 2.0, 0.0, 1.1),
            ScenarioDefinition::from_ar6("SSP2-4.5", 2.7, 4.0, 0.0, 1.6),
            ScenarioDefinition::from_ar6("SSP5-8.5", 4.4, 7.0, 0.0, 2.5),
        ]
    }

    pub fn delta_for(&self, kind: VariableKind) -> Option<AnchoredDelta> {
        match kind {
            VariableKind::Temperature => self.temperature,
            VariableKind::Precipitation => self.precipitation,
            VariableKind::Wind => self.wind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ar6_construction() {
        let ssp245 = ScenarioDefinition::from_ar6("SSP2-4.5", 2.7, 4.0, 0.0, 1.6);

        let temp = ssp245.delta_for(VariableKind::Temperature).unwrap();
        assert!((temp.near - 2.7).abs() < 1e-12);
        assert!((temp.far - 4.32).abs() < 1e-12);

        // Precipitation guidance holds past 2100.
        let precip = ssp245.delta_for(VariableKind::Precipitation).unwrap();
        assert_eq!(precip.near, precip.far);
    }

    #[test]
    fn test_defaults_cover_three_pathways() {
        let defaults = ScenarioDefinition::ar6_defaults();
        let names: Vec<&str> = defaults.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SSP1-2.6", "SSP2-4.5", "SSP5-8.5"]);
    }

    #[test]
    fn test_missing_entry_is_none() {
        let scenario = ScenarioDefinition {
            name: "custom".to_string(),
            temperature: Some(AnchoredDelta {
                near: 1.0,
                far: 1.5,
            }),
            precipitation: None,
            wind: None,
        };
        assert!(scenario.delta_for(VariableKind::Precipitation).is_none());
    }
}
