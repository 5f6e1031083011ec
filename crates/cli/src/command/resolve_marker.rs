use anyhow::Error;
use console::style;
use fehler::throws;
use skinforge_client::{edition::parse_pubkey, resolve_edition_marker, Config, Ledger};

use super::connect;

#[throws]
pub async fn resolve_marker(config: &Config, mint: String, supply: Option<u64>) {
    let master = parse_pubkey(&mint)?;
    let supply = match supply {
        Some(supply) => supply,
        None => connect(config)?.master_edition(&master).await?.supply,
    };
    let marker = resolve_edition_marker(master, supply)?;

    println!("{} {}", style("Supply:").bold(), supply);
    println!("{} {}", style("Edition marker:").bold(), marker.address);
    println!("{} {}", style("Index:").bold(), marker.index);
    println!("{} {}", style("Bump:").bold(), marker.bump);
}
