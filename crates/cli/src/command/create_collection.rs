use anyhow::Error;
use console::style;
use fehler::throws;
use skinforge_client::{explorer_link, publish, Config};

use super::{connect, print_signature};

#[throws]
pub async fn create_collection(config: &Config, name: String, symbol: String) {
    let client = connect(config)?;
    let minted = publish::create_collection(
        &client,
        config.program_id()?,
        &name,
        &symbol,
        config.purchase.skip_preflight,
    )
    .await?;

    println!(
        "{} {}",
        style("Collection:").bold().green(),
        explorer_link("address", &minted.mint.to_string(), client.cluster())
    );
    print_signature(&client, &minted.signature);
}
