use chrono::Local;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AnalysisConfig, StationInfo};
use crate::error::Result;
use crate::models::{
    ClimateVariable, DailyObservation, Granularity, Projection, ScenarioDefinition, TrendModel,
};
use crate::processors::{
    AggregateTable, Aggregator, ProjectionPolicy, ScenarioProjector, TrendEstimator,
};
use crate::utils::constants::{BASELINE_WINDOW_YEARS, REPORT_CAVEATS};
use crate::utils::progress::ProgressReporter;

/// Recent-climatology reference value reported alongside each trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub variable: ClimateVariable,
    pub window_years: usize,
    pub n_years: usize,
    pub value: f64,
}

/// Everything a downstream renderer needs to tabulate summaries and
/// projections without re-deriving any numeric value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateReport {
    pub station: StationInfo,
    pub generated_on: chrono::NaiveDate,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reference_year: i32,
    pub monthly: AggregateTable,
    pub yearly: AggregateTable,
    pub baselines: Vec<Baseline>,
    pub trends: Vec<TrendModel>,
    /// The scenario tables used, embedded so the report is self-describing.
    pub scenarios: Vec<ScenarioDefinition>,
    pub projections: Vec<Projection>,
    /// Fixed uncertainty caveats; part of the output contract.
    pub caveats: Vec<String>,
}

/// Orchestrates aggregation, trend fitting and scenario projection.
///
/// Variables whose trend cannot be fitted (too few years, degenerate input)
/// or that a scenario has no guidance for are logged and omitted; malformed
/// requests are rejected before any aggregation work begins. All other
/// errors propagate.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate_request()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(
        &self,
        observations: &[DailyObservation],
        progress: Option<&ProgressReporter>,
    ) -> Result<ClimateReport> {
        let in_range: Vec<DailyObservation> = observations
            .iter()
            .filter(|o| o.date >= self.config.start_date && o.date <= self.config.end_date)
            .cloned()
            .collect();
        debug!(
            total = observations.len(),
            in_range = in_range.len(),
            "filtered observations to analysis range"
        );

        if let Some(p) = progress {
            p.set_message("Aggregating daily record...");
        }
        let aggregator = Aggregator::new();
        let monthly = aggregator.aggregate(&in_range, Granularity::Monthly);
        let yearly = aggregator.aggregate(&in_range, Granularity::Yearly);

        if let Some(p) = progress {
            p.set_message("Fitting yearly trends...");
        }
        let reference_year = self.config.effective_reference_year();
        let estimator = TrendEstimator::new(self.config.min_trend_years, reference_year);

        let mut trends = Vec::new();
        for variable in ClimateVariable::ALL {
            let series = yearly.series(variable);
            match estimator.fit(variable, &series) {
                Ok(trend) => trends.push(trend),
                Err(e) if e.is_recoverable() => {
                    warn!(%variable, error = %e, "omitting variable from trend output");
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(p) = progress {
            p.set_message("Projecting scenarios...");
        }
        let projector = ScenarioProjector::new(ProjectionPolicy {
            reference_year,
            near_anchor_year: self.config.near_anchor_year,
            far_anchor_year: self.config.far_anchor_year,
        });

        // Independent (variable, scenario, horizon) triples; scenario tables
        // are shared read-only, so the fan-out needs no coordination.
        let tasks: Vec<(&TrendModel, &ScenarioDefinition, i32)> = trends
            .iter()
            .flat_map(|trend| {
                self.config.scenarios.iter().flat_map(move |scenario| {
                    self.config
                        .horizons
                        .iter()
                        .map(move |&h| (trend, scenario, reference_year + h))
                })
            })
            .collect();

        let results: Vec<Result<Projection>> = tasks
            .par_iter()
            .map(|(trend, scenario, target_year)| projector.project(trend, scenario, *target_year))
            .collect();

        let mut projections = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(projection) => projections.push(projection),
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "omitting projection");
                }
                Err(e) => return Err(e),
            }
        }
        projections.sort_by(|a, b| {
            (a.variable, &a.scenario, a.target_year).cmp(&(b.variable, &b.scenario, b.target_year))
        });

        let baselines = self.baselines(&yearly);

        if let Some(p) = progress {
            p.finish_with_message("Analysis complete");
        }

        Ok(ClimateReport {
            station: self.config.station.clone(),
            generated_on: Local::now().date_naive(),
            start_date: self.config.start_date,
            end_date: self.config.end_date,
            reference_year,
            monthly,
            yearly,
            baselines,
            trends,
            scenarios: self.config.scenarios.clone(),
            projections,
            caveats: REPORT_CAVEATS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Mean of the last `BASELINE_WINDOW_YEARS` defined yearly values per
    /// variable, mirroring the 30-year climatology of the source analysis.
    fn baselines(&self, yearly: &AggregateTable) -> Vec<Baseline> {
        let mut baselines = Vec::new();
        for variable in ClimateVariable::ALL {
            let values: Vec<f64> = yearly
                .series(variable)
                .iter()
                .filter_map(|a| a.trend_value())
                .collect();
            if values.is_empty() {
                continue;
            }

            let window: Vec<f64> = values
                .iter()
                .rev()
                .take(BASELINE_WINDOW_YEARS)
                .copied()
                .collect();
            baselines.push(Baseline {
                variable,
                window_years: BASELINE_WINDOW_YEARS,
                n_years: window.len(),
                value: window.iter().sum::<f64>() / window.len() as f64,
            });
        }
        baselines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HorizonRegime;
    use chrono::{Datelike, NaiveDate};

    /// Fifty years of synthetic daily data ending in 2024: mean temperature
    /// rises 0.03 °C/year toward 9.5 °C at 2024, rain and wind are steady.
    fn synthetic_observations() -> Vec<DailyObservation> {
        let start = NaiveDate::from_ymd_opt(1975, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let mut out = Vec::new();
        let mut date = start;
        while date <= end {
            let tavg = 9.5 + 0.03 * f64::from(date.year() - 2024);
            out.push(DailyObservation {
                date,
                temp_avg: Some(tavg),
                temp_min: Some(tavg - 5.0),
                temp_max: Some(tavg + 5.0),
                precipitation: Some(1.5),
                wind_speed: Some(11.0),
            });
            date = date.succ_opt().unwrap();
        }
        out
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            start_date: NaiveDate::from_ymd_opt(1975, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_ssp245_horizons() {
        let pipeline = AnalysisPipeline::new(config()).unwrap();
        let report = pipeline.run(&synthetic_observations(), None).unwrap();

        assert_eq!(report.reference_year, 2024);
        assert_eq!(report.trends.len(), 5);
        // 5 variables x 3 scenarios x 3 horizons
        assert_eq!(report.projections.len(), 45);
        assert!(!report.caveats.is_empty());

        let temp_ssp245: Vec<&Projection> = report
            .projections
            .iter()
            .filter(|p| p.variable == ClimateVariable::TempAvg && p.scenario == "SSP2-4.5")
            .collect();
        assert_eq!(temp_ssp245.len(), 3);

        // Sorted by target year and strictly increasing under a warming
        // trend with a positive adjustment.
        assert_eq!(temp_ssp245[0].target_year, 2034);
        assert_eq!(temp_ssp245[1].target_year, 2124);
        assert_eq!(temp_ssp245[2].target_year, 3024);
        assert!(temp_ssp245[0].projected_value < temp_ssp245[1].projected_value);
        assert!(temp_ssp245[1].projected_value < temp_ssp245[2].projected_value);

        // One projection per regime, each with a distinct method note.
        assert_eq!(temp_ssp245[0].regime, HorizonRegime::NearTerm);
        assert_eq!(temp_ssp245[1].regime, HorizonRegime::Extended);
        assert_eq!(temp_ssp245[2].regime, HorizonRegime::Far);
        assert_ne!(temp_ssp245[0].method_note, temp_ssp245[1].method_note);
        assert_ne!(temp_ssp245[1].method_note, temp_ssp245[2].method_note);
    }

    #[test]
    fn test_trend_recovery_from_daily_series() {
        let pipeline = AnalysisPipeline::new(config()).unwrap();
        let report = pipeline.run(&synthetic_observations(), None).unwrap();

        let temp_trend = report
            .trends
            .iter()
            .find(|t| t.variable == ClimateVariable::TempAvg)
            .unwrap();
        assert!((temp_trend.slope_per_year - 0.03).abs() < 1e-9);
        assert!((temp_trend.intercept - 9.5).abs() < 1e-9);
        assert!(temp_trend.fit_quality.r_squared > 0.999);
    }

    #[test]
    fn test_baselines_use_recent_window() {
        let pipeline = AnalysisPipeline::new(config()).unwrap();
        let report = pipeline.run(&synthetic_observations(), None).unwrap();

        let temp_baseline = report
            .baselines
            .iter()
            .find(|b| b.variable == ClimateVariable::TempAvg)
            .unwrap();
        assert_eq!(temp_baseline.n_years, 30);
        // Mean of 9.5 - 0.03*k for k = 0..=29.
        let expected = 9.5 - 0.03 * 29.0 / 2.0;
        assert!((temp_baseline.value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_short_record_omits_unfittable_variables() {
        let observations: Vec<DailyObservation> = synthetic_observations()
            .into_iter()
            .filter(|o| o.date.year() >= 2020)
            .collect();
        let cfg = AnalysisConfig {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ..config()
        };

        let report = AnalysisPipeline::new(cfg)
            .unwrap()
            .run(&observations, None)
            .unwrap();
        // Five valid years < the ten-year minimum: no trends, no
        // projections, but aggregates are still reported.
        assert!(report.trends.is_empty());
        assert!(report.projections.is_empty());
        assert!(!report.yearly.entries.is_empty());
    }

    #[test]
    fn test_invalid_request_rejected_before_work() {
        let cfg = AnalysisConfig {
            horizons: vec![-5],
            ..config()
        };
        assert!(AnalysisPipeline::new(cfg).is_err());
    }
}
