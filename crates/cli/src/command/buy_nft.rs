use anyhow::{bail, Error};
use console::style;
use fehler::throws;
use skinforge_client::{explorer_link, purchase, Config};

use super::{connect, print_signature};

#[throws]
pub async fn buy_nft(config: &Config, mint: String, simulate: bool, attempts: Option<u32>) {
    let mut options = config.purchase.clone();
    options.simulate |= simulate;
    if let Some(attempts) = attempts {
        if attempts == 0 {
            bail!("--attempts must be at least 1");
        }
        options.max_attempts = attempts;
    }

    let client = connect(config)?;
    let receipt = purchase::buy_nft(&client, config.program_id()?, mint.as_str(), &options).await?;

    println!(
        "{} {} ({} attempt(s))",
        style("Edition:").bold().green(),
        receipt.edition,
        receipt.attempts
    );
    println!(
        "{} {}",
        style("Print mint:").bold(),
        explorer_link("address", &receipt.new_mint.to_string(), client.cluster())
    );
    println!(
        "{} {} (index {})",
        style("Edition marker:").bold(),
        receipt.marker.address,
        receipt.marker.index
    );
    print_signature(&client, &receipt.signature);
}
