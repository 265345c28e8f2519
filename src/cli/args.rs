use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-projector")]
#[command(about = "Climate station trend analysis and scenario projections")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a daily record, fit trends and project scenarios
    Analyze {
        #[arg(short, long, help = "Daily observations CSV (Meteostat layout)")]
        input: PathBuf,

        #[arg(short, long, help = "Analysis configuration TOML file")]
        config: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output report path [default: output/climate-report-{YYMMDD}.json]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Also write a flat projection table CSV")]
        csv_output: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Fail on implausible values")]
        strict: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Parse a daily record and report coverage without analysing it
    Validate {
        #[arg(short, long, help = "Daily observations CSV")]
        input: PathBuf,

        #[arg(long, default_value = "false", help = "Fail on implausible values")]
        strict: bool,
    },

    /// Display information about a previously written report
    Info {
        #[arg(short, long, help = "Report JSON file")]
        file: PathBuf,

        #[arg(short, long, default_value = "10", help = "Projections to list")]
        sample: usize,
    },
}
