use anyhow::Error;
use console::style;
use fehler::throws;
use skinforge_client::{edition::parse_pubkey, explorer_link, publish, Config};

use super::{connect, print_signature};

#[throws]
pub async fn create_nft(
    config: &Config,
    collection: String,
    name: String,
    symbol: String,
    uri: String,
    max_supply: u64,
) {
    let collection = parse_pubkey(&collection)?;
    let client = connect(config)?;
    let minted = publish::create_nft(
        &client,
        config.program_id()?,
        collection,
        &name,
        &symbol,
        &uri,
        max_supply,
        config.purchase.skip_preflight,
    )
    .await?;

    println!(
        "{} {}",
        style("Master edition:").bold().green(),
        explorer_link("address", &minted.mint.to_string(), client.cluster())
    );
    print_signature(&client, &minted.signature);
}
