mod parcel;
mod prospects;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "comps-cli")]
#[command(about = "Rank leasing prospects and look up NYC parcels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank nearby businesses by expansion potential
    Prospects {
        /// Latitude of the search center
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the search center
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Category to rank; every configured category when omitted
        #[arg(long)]
        category: Option<String>,
    },
    /// List the configured prospect categories
    Categories,
    /// Resolve a street address to its borough-block-lot
    Locate {
        #[arg(long)]
        house: String,

        #[arg(long)]
        street: String,

        /// Borough name, county name, or code 1-5
        #[arg(long)]
        borough: String,
    },
    /// Summarise the public records filed against a lot
    Parcel {
        /// 10-digit BBL, e.g. 1008350041
        #[arg(long)]
        bbl: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = comps_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Prospects { lat, lon, category }) => {
            prospects::run_prospects(&config, lat, lon, category.as_deref()).await?;
        }
        Some(Commands::Categories) => prospects::run_categories(&config),
        Some(Commands::Locate {
            house,
            street,
            borough,
        }) => parcel::run_locate(&config, &house, &street, &borough).await?,
        Some(Commands::Parcel { bbl }) => parcel::run_parcel(&config, &bbl).await?,
        None => println!("comps-cli: run with --help to list commands"),
    }

    Ok(())
}
