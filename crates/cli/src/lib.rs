use anyhow::Error;
use clap::{Parser, Subcommand};
use fehler::throws;
use skinforge_client::Config;

mod command;

#[derive(Parser)]
#[clap(version, propagate_version = true)]
struct Cli {
    /// Path to Skinforge.toml, discovered in the parent directories when omitted
    #[clap(long, global = true)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the edition marker a purchase of the next print has to reference
    ResolveMarker {
        /// Master edition mint
        #[clap(long)]
        mint: String,
        /// Current supply, read from the cluster when omitted
        #[clap(long)]
        supply: Option<u64>,
    },
    /// Create a collection NFT owned by the configured wallet
    CreateCollection {
        #[clap(long)]
        name: String,
        #[clap(long)]
        symbol: String,
    },
    /// Mint a master edition inside a collection
    CreateNft {
        /// Collection mint
        #[clap(long)]
        collection: String,
        #[clap(long)]
        name: String,
        #[clap(long)]
        symbol: String,
        /// Metadata URI, e.g. printed by `upload-skin`
        #[clap(long)]
        uri: String,
        #[clap(long, default_value_t = 1)]
        max_supply: u64,
    },
    /// Upload the textures of a skin and its metadata document
    UploadSkin {
        /// Directory with `*_p.png`, `*_a.png`, `*_r.png`, `*_n.png`, `*_m.png` and `*_ao.png`
        #[clap(long)]
        dir: String,
        #[clap(long)]
        name: String,
        #[clap(long)]
        symbol: String,
    },
    /// Upload a skin, create its collection and mint the master edition
    PublishSkin {
        #[clap(long)]
        dir: String,
        #[clap(long)]
        name: String,
        #[clap(long)]
        symbol: String,
        #[clap(long)]
        collection_name: String,
        #[clap(long)]
        collection_symbol: String,
        #[clap(long, default_value_t = 1)]
        max_supply: u64,
    },
    /// Buy the next print edition of a master edition
    BuyNft {
        /// Master edition mint
        #[clap(long)]
        mint: String,
        /// Simulate the transaction before sending it
        #[clap(long)]
        simulate: bool,
        /// Total attempts, each one re-reading the supply
        #[clap(long)]
        attempts: Option<u32>,
    },
}

#[throws]
pub async fn start() {
    solana_logger::setup_with_default("info");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => Config::read(path)?,
        None => Config::new()?,
    };

    match cli.command {
        Command::ResolveMarker { mint, supply } => {
            command::resolve_marker(&config, mint, supply).await?
        }
        Command::CreateCollection { name, symbol } => {
            command::create_collection(&config, name, symbol).await?
        }
        Command::CreateNft {
            collection,
            name,
            symbol,
            uri,
            max_supply,
        } => command::create_nft(&config, collection, name, symbol, uri, max_supply).await?,
        Command::UploadSkin { dir, name, symbol } => {
            command::upload_skin(&config, dir, name, symbol).await?
        }
        Command::PublishSkin {
            dir,
            name,
            symbol,
            collection_name,
            collection_symbol,
            max_supply,
        } => {
            command::publish_skin(
                &config,
                dir,
                name,
                symbol,
                collection_name,
                collection_symbol,
                max_supply,
            )
            .await?
        }
        Command::BuyNft {
            mint,
            simulate,
            attempts,
        } => command::buy_nft(&config, mint, simulate, attempts).await?,
    }
}
