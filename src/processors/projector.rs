use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::models::{
    AnchoredDelta, HorizonRegime, Projection, ScenarioDefinition, TrendModel, VariableKind,
};
use crate::utils::constants::WIND_CONFIDENCE_NOTE;

/// Year parameters of the regime rule. Values come from configuration; only
/// the piecewise *behavior* (ramp, interpolate, freeze) is intrinsic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionPolicy {
    /// "Current" year projections are measured from, normally the end of
    /// the observed record.
    pub reference_year: i32,
    /// Year of the published end-of-century guidance (2100).
    pub near_anchor_year: i32,
    /// Last year with published extension guidance (2300); the adjustment
    /// is frozen past it.
    pub far_anchor_year: i32,
}

/// Extends a fitted trend to a target year under one emission pathway.
///
/// Pure function of its inputs: every projection is computed independently,
/// so arbitrary (variable, scenario, horizon) combinations can run in
/// parallel against the same read-only scenario definitions.
pub struct ScenarioProjector {
    policy: ProjectionPolicy,
}

impl ScenarioProjector {
    pub fn new(policy: ProjectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ProjectionPolicy {
        self.policy
    }

    pub fn project(
        &self,
        trend: &TrendModel,
        scenario: &ScenarioDefinition,
        target_year: i32,
    ) -> Result<Projection> {
        let horizon_years = target_year - self.policy.reference_year;
        if horizon_years <= 0 {
            return Err(ProjectionError::InvalidHorizon(horizon_years));
        }

        let kind = trend.variable.kind();
        let anchors =
            scenario
                .delta_for(kind)
                .ok_or_else(|| ProjectionError::UnsupportedVariable {
                    variable: trend.variable,
                    scenario: scenario.name.clone(),
                })?;

        let regime = HorizonRegime::classify(
            target_year,
            self.policy.near_anchor_year,
            self.policy.far_anchor_year,
        );
        let adjustment = self.adjustment_at(regime, target_year, anchors);

        let base_value = trend.value_at(target_year);
        let projected_value = match kind {
            VariableKind::Temperature => base_value + adjustment,
            VariableKind::Precipitation | VariableKind::Wind => {
                base_value * (1.0 + adjustment / 100.0)
            }
        };

        Ok(Projection {
            variable: trend.variable,
            scenario: scenario.name.clone(),
            target_year,
            horizon_years,
            base_value,
            adjustment,
            projected_value,
            regime,
            method_note: self.method_note(regime, kind, &scenario.name),
        })
    }

    /// Scenario adjustment for a target year within a regime.
    ///
    /// Continuity holds at both regime boundaries: the near-term ramp
    /// reaches exactly `anchors.near` at the near anchor year, the extended
    /// segment reaches exactly `anchors.far` at the far anchor year, and the
    /// far regime returns that same frozen value for every later year.
    fn adjustment_at(&self, regime: HorizonRegime, target_year: i32, anchors: AnchoredDelta) -> f64 {
        match regime {
            HorizonRegime::NearTerm => {
                let span = f64::from(self.policy.near_anchor_year - self.policy.reference_year);
                let frac = f64::from(target_year - self.policy.reference_year) / span;
                anchors.near * frac.clamp(0.0, 1.0)
            }
            HorizonRegime::Extended => {
                let span = f64::from(self.policy.far_anchor_year - self.policy.near_anchor_year);
                let frac = f64::from(target_year - self.policy.near_anchor_year) / span;
                anchors.near + frac * (anchors.far - anchors.near)
            }
            HorizonRegime::Far => anchors.far,
        }
    }

    fn method_note(&self, regime: HorizonRegime, kind: VariableKind, scenario: &str) -> String {
        let mut note = match regime {
            HorizonRegime::NearTerm => format!(
                "linear trend with {scenario} adjustment ramped toward the {} anchor (near-term regime)",
                self.policy.near_anchor_year
            ),
            HorizonRegime::Extended => format!(
                "linear trend with {scenario} adjustment interpolated between the {} and {} anchors (extended regime)",
                self.policy.near_anchor_year, self.policy.far_anchor_year
            ),
            HorizonRegime::Far => format!(
                "linear trend with {scenario} adjustment frozen at its {} value (far regime, illustrative)",
                self.policy.far_anchor_year
            ),
        };

        if kind == VariableKind::Wind {
            note.push_str("; ");
            note.push_str(WIND_CONFIDENCE_NOTE);
        }

        note
    }
}
