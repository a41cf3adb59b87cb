use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use url::Url;

use alcancia::attribution::{display_name, AttributionStore};
use alcancia::config::{Config, DatabaseBackend};
use alcancia::donation::{resolve_amount, DonationError, DonationService, Navigator};
use alcancia::storage::{KeyValueStore, MemoryStore, SqliteStore};

#[derive(Parser)]
#[command(name = "alcancia")]
#[command(about = "Volunteer attribution and donation links for digital collection boxes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the referrer from a landing query string (e.g. "vol=juan_perez")
    Visit {
        /// Raw query string of the visited campaign link
        query: String,
    },
    /// Show the currently stored referrer
    Status,
    /// Clear the stored referrer
    Clear,
    /// Build the provider redirect URL for a donation
    Donate {
        /// Amount in pesos (smallest currency unit)
        #[arg(long)]
        amount: Option<String>,
        /// Control label to extract the amount from, e.g. "Donar $5.000"
        #[arg(long)]
        label: Option<String>,
        /// Print the prepared donation as JSON instead of the summary line
        #[arg(long)]
        json: bool,
    },
}

/// Prints the redirect URL instead of leaving a page; the terminal analog
/// of navigating away.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &Url) -> Result<()> {
        println!("{url}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let storage: Arc<dyn KeyValueStore> = match config.database.backend {
        DatabaseBackend::Sqlite => {
            info!("Using SQLite storage: {}", config.database.url);
            Arc::new(SqliteStore::new(&config.database.url, 5).await?)
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory storage (state is lost on exit)");
            Arc::new(MemoryStore::new())
        }
    };
    storage.init().await?;

    let attribution = Arc::new(AttributionStore::new(
        Arc::clone(&storage),
        config.campaign.storage_key.clone(),
    ));

    match cli.command {
        Commands::Visit { query } => {
            match attribution.record_referrer_from_query(&query).await? {
                Some(referrer) => println!(
                    "🤝 Estás apoyando la campaña de {}",
                    display_name(&referrer)
                ),
                None => println!("Sin voluntario asociado"),
            }
        }
        Commands::Status => match attribution.current_referrer().await? {
            Some(referrer) => println!("{} ({})", referrer, display_name(&referrer)),
            None => println!("{}", config.campaign.sentinel),
        },
        Commands::Clear => {
            attribution.clear_referrer().await?;
            println!("✓ Voluntario limpiado");
        }
        Commands::Donate {
            amount,
            label,
            json,
        } => {
            let amount = match resolve_amount(amount.as_deref(), label.as_deref().unwrap_or("")) {
                Ok(amount) => amount,
                Err(DonationError::UnresolvableAmount) => {
                    eprintln!(
                        "Error: no se pudo determinar el monto. Usa --amount o --label \"Donar $5.000\"."
                    );
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };

            let service = DonationService::new(
                Arc::clone(&attribution),
                config.provider.clone(),
                config.campaign.clone(),
                config.site.clone(),
            );
            let request = service.initiate(amount, &PrintNavigator).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                eprintln!(
                    "✓ Donación de ${} preparada (id {})",
                    request.amount, request.transaction_id
                );
            }
        }
    }

    Ok(())
}
