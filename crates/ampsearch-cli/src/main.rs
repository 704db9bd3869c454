//! ampsearch CLI Entry Point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ampsearch_cli::{commands, Cli, Commands};
use ampsearch_engine::schedule::SchedulingMode;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fixed(args) => {
            print!("{}", commands::execute(&args, SchedulingMode::Fixed)?);
        }
        Commands::Adaptive(args) => {
            print!("{}", commands::execute(&args, SchedulingMode::Adaptive)?);
        }
        Commands::Version => {
            println!("ampsearch {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
