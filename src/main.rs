use clap::Parser;
use dr_fair_value::cli::{Cli, Commands};
use dr_fair_value::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = dr_fair_value::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Quote(args) => {
            args.execute(&config).await?;
        }
        Commands::Calc(args) => {
            tracing::info!(symbol = %args.symbol, "Calculating DR fair value");
            args.execute(&config).await?;
        }
        Commands::List(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
