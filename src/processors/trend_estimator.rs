use crate::error::{ProjectionError, Result};
use crate::models::{ClimateVariable, FitQuality, Granularity, PeriodAggregate, TrendModel};

/// Fits an ordinary least-squares line of yearly aggregate value against
/// year. The regression runs in years-since-reference coordinates so the
/// intercept is directly the trend value at the reference year.
pub struct TrendEstimator {
    min_years: usize,
    reference_year: i32,
}

impl TrendEstimator {
    pub fn new(min_years: usize, reference_year: i32) -> Self {
        Self {
            min_years,
            reference_year,
        }
    }

    /// Fit a trend for one variable from its yearly aggregates.
    ///
    /// Undefined aggregates are excluded from the fit and counted in
    /// `fit_quality.n_excluded`. Fewer than `min_years` usable points fails
    /// with `InsufficientData`; a degenerate year axis fails with
    /// `DegenerateFit`. The caller must not extrapolate on either failure.
    pub fn fit(&self, variable: ClimateVariable, yearly: &[&PeriodAggregate]) -> Result<TrendModel> {
        let mut points: Vec<(f64, f64)> = Vec::with_capacity(yearly.len());
        for aggregate in yearly {
            debug_assert_eq!(aggregate.variable, variable);
            if let Some(value) = aggregate.trend_value() {
                let x = f64::from(aggregate.period.year() - self.reference_year);
                points.push((x, value));
            }
        }
        let n_excluded = yearly.len() - points.len();

        if points.len() < self.min_years {
            return Err(ProjectionError::InsufficientData {
                variable,
                available: points.len(),
                required: self.min_years,
            });
        }

        let n = points.len() as f64;
        let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
        let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        let sxy: f64 = points
            .iter()
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();

        if sxx <= f64::EPSILON {
            return Err(ProjectionError::DegenerateFit {
                variable,
                reason: "zero variance in the year axis".to_string(),
            });
        }

        let slope = sxy / sxx;
        // Intercept at x = 0, i.e. at the reference year.
        let intercept = mean_y - slope * mean_x;

        let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
            .sum();
        // A constant series fits its own line exactly.
        let r_squared = if ss_tot <= f64::EPSILON {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(TrendModel {
            variable,
            granularity: Granularity::Yearly,
            slope_per_year: slope,
            intercept,
            reference_year: self.reference_year,
            fit_quality: FitQuality {
                r_squared,
                n_years: points.len(),
                n_excluded,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateStats, PeriodKey};

    fn yearly_aggregate(year: i32, value: f64) -> PeriodAggregate {
        PeriodAggregate {
            period: PeriodKey::Year(year),
            variable: ClimateVariable::TempAvg,
            stats: AggregateStats::from_values(&[value]),
            n_valid: 1,
        }
    }

    fn undefined_aggregate(year: i32) -> PeriodAggregate {
        PeriodAggregate {
            period: PeriodKey::Year(year),
            variable: ClimateVariable::TempAvg,
            stats: None,
            n_valid: 0,
        }
    }

    #[test]
    fn test_recovers_synthetic_linear_series() {
        // value = 2*(year - 1990) + 5 over 30 years.
        let aggregates: Vec<PeriodAggregate> = (1990..2020)
            .map(|year| yearly_aggregate(year, 2.0 * f64::from(year - 1990) + 5.0))
            .collect();
        let refs: Vec<&PeriodAggregate> = aggregates.iter().collect();

        let estimator = TrendEstimator::new(10, 1990);
        let trend = estimator.fit(ClimateVariable::TempAvg, &refs).unwrap();

        assert!((trend.slope_per_year - 2.0).abs() < 1e-9);
        assert!((trend.intercept - 5.0).abs() < 1e-9);
        assert!((trend.fit_quality.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(trend.fit_quality.n_years, 30);
        assert_eq!(trend.fit_quality.n_excluded, 0);
    }

    #[test]
    fn test_undefined_years_are_excluded_and_counted() {
        let mut aggregates: Vec<PeriodAggregate> = (2000..2015)
            .map(|year| yearly_aggregate(year, 0.1 * f64::from(year - 2000)))
            .collect();
        aggregates.push(undefined_aggregate(2015));
        aggregates.push(undefined_aggregate(2016));
        let refs: Vec<&PeriodAggregate> = aggregates.iter().collect();

        let trend = TrendEstimator::new(10, 2016)
            .fit(ClimateVariable::TempAvg, &refs)
            .unwrap();
        assert_eq!(trend.fit_quality.n_years, 15);
        assert_eq!(trend.fit_quality.n_excluded, 2);
    }

    #[test]
    fn test_too_few_years_fails() {
        let aggregates: Vec<PeriodAggregate> = (2010..2015)
            .map(|year| yearly_aggregate(year, 1.0))
            .collect();
        let refs: Vec<&PeriodAggregate> = aggregates.iter().collect();

        let err = TrendEstimator::new(10, 2014)
            .fit(ClimateVariable::TempAvg, &refs)
            .unwrap_err();
        match err {
            ProjectionError::InsufficientData {
                variable,
                available,
                required,
            } => {
                assert_eq!(variable, ClimateVariable::TempAvg);
                assert_eq!(available, 5);
                assert_eq!(required, 10);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_single_repeated_year_is_degenerate() {
        let aggregates: Vec<PeriodAggregate> =
            (0..12).map(|i| yearly_aggregate(2000, f64::from(i))).collect();
        let refs: Vec<&PeriodAggregate> = aggregates.iter().collect();

        let err = TrendEstimator::new(10, 2000)
            .fit(ClimateVariable::TempAvg, &refs)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::DegenerateFit { .. }));
    }

    #[test]
    fn test_constant_series_has_zero_slope_and_unit_fit() {
        let aggregates: Vec<PeriodAggregate> = (2000..2020)
            .map(|year| yearly_aggregate(year, 7.5))
            .collect();
        let refs: Vec<&PeriodAggregate> = aggregates.iter().collect();

        let trend = TrendEstimator::new(10, 2019)
            .fit(ClimateVariable::TempAvg, &refs)
            .unwrap();
        assert!(trend.slope_per_year.abs() < 1e-12);
        assert!((trend.intercept - 7.5).abs() < 1e-9);
        assert_eq!(trend.fit_quality.r_squared, 1.0);
    }
}
