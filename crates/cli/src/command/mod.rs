mod buy_nft;
pub use buy_nft::buy_nft;

mod create_collection;
pub use create_collection::create_collection;

mod create_nft;
pub use create_nft::create_nft;

mod publish_skin;
pub use publish_skin::publish_skin;

mod resolve_marker;
pub use resolve_marker::resolve_marker;

mod upload_skin;
pub use upload_skin::upload_skin;

use anyhow::Error;
use console::style;
use fehler::throws;
use skinforge_client::{explorer_link, Client, Config, DirectoryUploader, Signature};

#[throws]
fn connect(config: &Config) -> Client {
    Client::new(config.payer()?, config.cluster()?, config.commitment())
}

fn uploader(config: &Config) -> DirectoryUploader {
    DirectoryUploader::new(&config.upload.directory, &config.upload.base_uri)
}

fn print_signature(client: &Client, signature: &Signature) {
    println!(
        "{} {}",
        style("Transaction:").bold(),
        explorer_link("tx", &signature.to_string(), client.cluster())
    );
}
