use anyhow::Error;
use fehler::throws;

#[throws]
#[tokio::main]
async fn main() {
    skinforge_cli::start().await?
}
