use clap::Parser;
use tracing::info;

use dualrev::cli::{Cli, CliCommand};
use dualrev::config::Config;
use dualrev::error::Result;
use dualrev::git::compute_diff;
use dualrev::pipeline::{Pipeline, RunOutcome};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli)?;

    match cli.command {
        Some(CliCommand::Diff) => {
            let diff = compute_diff(&config.cwd, config.staged)?;
            print!("{diff}");
        }
        Some(CliCommand::Compare { ref a, ref b }) => {
            let raw_a = std::fs::read_to_string(a)?;
            let raw_b = std::fs::read_to_string(b)?;
            let outcome = Pipeline::new(config).compare(&raw_a, &raw_b)?;
            println!("{}", outcome.report);
        }
        None => match Pipeline::new(config).run().await? {
            RunOutcome::DryRun { diff_bytes } => {
                println!(
                    "# Dual Review Report (dry-run)\n\nDiff bytes: {diff_bytes}\n\n\
                     This is a dry-run. No reviewer was invoked."
                );
            }
            RunOutcome::Reviewed(outcome) => {
                println!("{}", outcome.report);
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    info!("dualrev starting");

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
