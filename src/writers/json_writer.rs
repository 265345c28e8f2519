use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::Projection;
use crate::processors::ClimateReport;

/// Serializes the analysis output for the downstream report assembler.
///
/// The JSON bundle carries aggregates, trends, projections and caveats so a
/// renderer can tabulate everything without re-deriving a single number; the
/// CSV table is a flat convenience view of the projections alone.
pub struct ReportWriter {
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct ProjectionRow<'a> {
    scenario: &'a str,
    variable: &'a str,
    target_year: i32,
    horizon_years: i32,
    regime: String,
    base_value: f64,
    adjustment: f64,
    projected_value: f64,
    method_note: &'a str,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn write_report(&self, report: &ClimateReport, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(path)?);
        if self.pretty {
            serde_json::to_writer_pretty(writer, report)?;
        } else {
            serde_json::to_writer(writer, report)?;
        }
        Ok(())
    }

    pub fn read_report(&self, path: &Path) -> Result<ClimateReport> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_projections_csv(&self, projections: &[Projection], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        for p in projections {
            writer.serialize(ProjectionRow {
                scenario: &p.scenario,
                variable: p.variable.column_name(),
                target_year: p.target_year,
                horizon_years: p.horizon_years,
                regime: p.regime.to_string(),
                base_value: p.base_value,
                adjustment: p.adjustment,
                projected_value: p.projected_value,
                method_note: &p.method_note,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::models::{ClimateVariable, HorizonRegime};
    use crate::processors::AnalysisPipeline;
    use chrono::{Datelike, NaiveDate};
    use tempfile::TempDir;

    fn small_report() -> ClimateReport {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        let mut observations = Vec::new();
        let mut date = start;
        while date <= end {
            let mut obs = crate::models::DailyObservation::empty(date);
            obs.temp_avg = Some(10.0 + 0.05 * f64::from(date.year() - 2000));
            observations.push(obs);
            date = date.succ_opt().unwrap();
        }

        let cfg = AnalysisConfig {
            start_date: start,
            end_date: end,
            ..Default::default()
        };
        AnalysisPipeline::new(cfg)
            .unwrap()
            .run(&observations, None)
            .unwrap()
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let report = small_report();
        let writer = ReportWriter::new();
        writer.write_report(&report, &path).unwrap();

        let loaded = writer.read_report(&path).unwrap();
        assert_eq!(loaded.reference_year, report.reference_year);
        assert_eq!(loaded.projections, report.projections);
        assert_eq!(loaded.caveats, report.caveats);
    }

    #[test]
    fn test_projections_csv_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projections.csv");

        let report = small_report();
        ReportWriter::new()
            .write_projections_csv(&report.projections, &path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "scenario,variable,target_year,horizon_years,regime,base_value,adjustment,projected_value,method_note"
        );
        // One row per projection, plus the header.
        assert_eq!(contents.lines().count(), report.projections.len() + 1);
    }

    #[test]
    fn test_report_regimes_present() {
        let report = small_report();
        let temp: Vec<_> = report
            .projections
            .iter()
            .filter(|p| p.variable == ClimateVariable::TempAvg && p.scenario == "SSP1-2.6")
            .collect();
        let regimes: Vec<HorizonRegime> = temp.iter().map(|p| p.regime).collect();
        assert_eq!(
            regimes,
            vec![
                HorizonRegime::NearTerm,
                HorizonRegime::Extended,
                HorizonRegime::Far
            ]
        );
    }
}
