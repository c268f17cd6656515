use clap::Parser;
use eyre::{ensure, Result};
use permit_signer::{cli::Cli, types::Output};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    // stdout carries the JSON result only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let output = command.run()?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Output::Verify(result) = &output {
        ensure!(result.valid, "permit does not verify");
    }
    Ok(())
}
