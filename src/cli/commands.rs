use tracing_subscriber::EnvFilter;

use crate::analyzers::ObservationAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::AnalysisConfig;
use crate::error::{ProjectionError, Result};
use crate::processors::{AnalysisPipeline, ClimateReport};
use crate::readers::CsvObservationReader;
use crate::utils::filename::generate_default_report_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;

pub async fn run(cli: Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            output,
            csv_output,
            strict,
            max_workers,
        } => {
            let cfg = match config {
                Some(path) => AnalysisConfig::load(&path)?,
                None => AnalysisConfig::default(),
            };

            println!("Analyzing daily record: {}", input.display());
            println!(
                "Station: {} ({}), range {} to {}",
                cfg.station.name, cfg.station.id, cfg.start_date, cfg.end_date
            );

            let reader = CsvObservationReader::with_strict(strict);
            let observations = reader.read_range(&input, cfg.start_date, cfg.end_date)?;
            println!("Read {} daily observations", observations.len());

            let pipeline = AnalysisPipeline::new(cfg)?;
            let progress = ProgressReporter::new_spinner("Analyzing...", false);

            let report: ClimateReport = tokio::task::spawn_blocking(move || {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(max_workers)
                    .build()
                    .map_err(|e| ProjectionError::Config(e.to_string()))?;
                pool.install(|| pipeline.run(&observations, Some(&progress)))
            })
            .await??;

            println!("\nFitted trends:");
            for trend in &report.trends {
                println!(
                    "  {:<5} {:+.4} {}/year (R² = {:.3}, {} years, {} excluded)",
                    trend.variable.column_name(),
                    trend.slope_per_year,
                    trend.variable.unit(),
                    trend.fit_quality.r_squared,
                    trend.fit_quality.n_years,
                    trend.fit_quality.n_excluded
                );
            }
            println!(
                "Projected {} (variable, scenario, horizon) combinations",
                report.projections.len()
            );

            let output_path = output.unwrap_or_else(generate_default_report_filename);
            let writer = ReportWriter::new();
            writer.write_report(&report, &output_path)?;
            println!("Report written to {}", output_path.display());

            if let Some(csv_path) = csv_output {
                writer.write_projections_csv(&report.projections, &csv_path)?;
                println!("Projection table written to {}", csv_path.display());
            }
        }

        Commands::Validate { input, strict } => {
            println!("Validating daily record: {}", input.display());

            let reader = CsvObservationReader::with_strict(strict);
            let observations = reader.read_file(&input)?;

            let analyzer = ObservationAnalyzer::new();
            let stats = analyzer.analyze(&observations)?;
            println!("\n{}", stats.summary());
            println!("\n✅ Record parsed cleanly");
        }

        Commands::Info { file, sample } => {
            println!("Report: {}", file.display());

            let report = ReportWriter::new().read_report(&file)?;
            println!(
                "Station: {} ({}), {} to {}, reference year {}",
                report.station.name,
                report.station.id,
                report.start_date,
                report.end_date,
                report.reference_year
            );
            println!(
                "Contents: {} monthly aggregates, {} yearly aggregates, {} trends, {} projections",
                report.monthly.entries.len(),
                report.yearly.entries.len(),
                report.trends.len(),
                report.projections.len()
            );

            if sample > 0 {
                println!("\nSample projections (showing up to {}):", sample);
                for (i, p) in report.projections.iter().take(sample).enumerate() {
                    println!(
                        "{}. {} / {} @ {}: {:.2} {} ({})",
                        i + 1,
                        p.scenario,
                        p.variable.column_name(),
                        p.target_year,
                        p.projected_value,
                        p.variable.unit(),
                        p.regime
                    );
                }
            }

            println!("\nCaveats:");
            for caveat in &report.caveats {
                println!("  - {caveat}");
            }
        }
    }

    Ok(())
}
