use clap::Parser;
use climate_projector::cli::{run, Cli};
use climate_projector::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
