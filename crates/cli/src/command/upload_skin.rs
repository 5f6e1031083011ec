use anyhow::Error;
use console::style;
use fehler::throws;
use skinforge_client::{publish, publish::SkinAssets, Config};

use super::uploader;

#[throws]
pub async fn upload_skin(config: &Config, dir: String, name: String, symbol: String) {
    let assets = SkinAssets::discover(&dir).await?;
    let uri = publish::upload_skin(&uploader(config), &assets, &name, &symbol).await?;
    println!("{} {}", style("Metadata URI:").bold().green(), uri);
}
