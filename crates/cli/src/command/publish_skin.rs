use anyhow::Error;
use console::style;
use fehler::throws;
use skinforge_client::{
    explorer_link,
    publish::{self, Listing, SkinAssets},
    Config,
};

use super::{connect, print_signature, uploader};

#[throws]
pub async fn publish_skin(
    config: &Config,
    dir: String,
    name: String,
    symbol: String,
    collection_name: String,
    collection_symbol: String,
    max_supply: u64,
) {
    let assets = SkinAssets::discover(&dir).await?;
    let client = connect(config)?;
    let published = publish::publish_skin(
        &client,
        &uploader(config),
        config.program_id()?,
        &assets,
        &Listing { name, symbol },
        &Listing {
            name: collection_name,
            symbol: collection_symbol,
        },
        max_supply,
        config.purchase.skip_preflight,
    )
    .await?;

    println!("{} {}", style("Metadata URI:").bold(), published.metadata_uri);
    println!(
        "{} {}",
        style("Collection:").bold(),
        explorer_link(
            "address",
            &published.collection.mint.to_string(),
            client.cluster()
        )
    );
    print_signature(&client, &published.collection.signature);
    println!(
        "{} {}",
        style("Master edition:").bold().green(),
        explorer_link("address", &published.nft.mint.to_string(), client.cluster())
    );
    print_signature(&client, &published.nft.signature);
}
