use std::path::Path;

use anchor_client::solana_sdk::signature::read_keypair_file;
use fehler::{throw, throws};
use thiserror::Error;

use crate::Keypair;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("environment variable {0} is not set")]
    MissingVariable(String),
    #[error("environment variable {0} does not hold a JSON byte array")]
    NotAByteArray(String, #[source] serde_json::Error),
    #[error("invalid keypair bytes: {0}")]
    InvalidBytes(String),
    #[error("cannot read keypair file {path}: {reason}")]
    File { path: String, reason: String },
}

/// Reads a keypair stored in `var` as a JSON array of 64 bytes, the format written by
/// `solana-keygen`.
#[throws(KeyError)]
pub fn keypair_from_env(var: &str) -> Keypair {
    let Ok(raw) = std::env::var(var) else {
        throw!(KeyError::MissingVariable(var.to_owned()));
    };
    let bytes: Vec<u8> = serde_json::from_str(raw.trim())
        .map_err(|e| KeyError::NotAByteArray(var.to_owned(), e))?;
    keypair_from_bytes(&bytes)?
}

#[throws(KeyError)]
pub fn keypair_from_file(path: impl AsRef<Path>) -> Keypair {
    let path = path.as_ref();
    read_keypair_file(path).map_err(|e| KeyError::File {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?
}

#[throws(KeyError)]
pub fn keypair_from_bytes(bytes: &[u8]) -> Keypair {
    Keypair::from_bytes(bytes).map_err(|e| KeyError::InvalidBytes(e.to_string()))?
}

/// Fresh keypair for a new mint account.
pub fn random_keypair() -> Keypair {
    Keypair::new()
}
