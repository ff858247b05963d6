//! Currency conversion CLI
//!
//! Command-line interface for the currency conversion API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use fx_client::FxClient;
use fx_types::CurrencyCode;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency conversion API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the currency conversion API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Print raw JSON instead of a summary line
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert (0.01 to 1000000000)
        amount: f64,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. EUR
        to: String,
    },
    /// List supported currencies
    Supported,
    /// Check API health
    Health,
}

/// Rejects unknown codes locally so typos don't cost a round trip.
fn parse_currency(s: &str) -> Result<CurrencyCode> {
    CurrencyCode::parse(s).map_err(|e| {
        anyhow::anyhow!("{}. Supported: {}", e, CurrencyCode::all_codes().join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Convert { amount, from, to } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;
            let outcome = client.convert(amount, from.code(), to.code()).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome.response)?);
            } else {
                let r = &outcome.response;
                println!(
                    "{} {} = {} {} (rate {}, {}, as of {})",
                    r.original.amount,
                    r.original.currency,
                    r.converted.amount,
                    r.converted.currency,
                    r.exchange_rate,
                    outcome.cache_status.as_deref().unwrap_or("unknown"),
                    r.timestamp
                );
            }
        }

        Commands::Supported => {
            let supported = client.supported().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&supported)?);
            } else {
                for code in &supported.supported_currencies {
                    println!("{}  {} ({})", code, code.name(), code.symbol());
                }
                println!("{} currencies", supported.total_count);
            }
        }

        Commands::Health => match client.health().await {
            Ok(health) if health.status == "healthy" => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&health)?);
                } else {
                    println!(
                        "✓ {} v{} is healthy (cache ttl {}s)",
                        health.service, health.version, health.cache.ttl
                    );
                }
            }
            Ok(health) => {
                println!("✗ API reported status {}", health.status);
                std::process::exit(1);
            }
            Err(e) => {
                println!("✗ API is not healthy: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
