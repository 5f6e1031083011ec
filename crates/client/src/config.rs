use std::{
    env, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use anchor_client::{
    solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel},
    Cluster,
};
use fehler::{throw, throws};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{constants::CONFIG_FILE, edition::parse_pubkey, keys, program_client, Keypair, Pubkey};

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid Skinforge.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown cluster '{0}'")]
    Cluster(String),
    #[error("invalid program id: {0}")]
    ProgramId(#[from] crate::edition::Error),
    #[error("either wallet.keypair_env or wallet.keypair_path must be set")]
    NoWallet,
    #[error(transparent)]
    Key(#[from] keys::KeyError),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClusterConfig {
    /// Moniker (`localnet`, `devnet`, `testnet`, `mainnet`) or an RPC URL.
    pub url: String,
    pub commitment: CommitmentLevel,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            url: "devnet".to_owned(),
            commitment: CommitmentLevel::Confirmed,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WalletConfig {
    pub keypair_env: Option<String>,
    pub keypair_path: Option<PathBuf>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            keypair_env: Some("WS_1".to_owned()),
            keypair_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProgramConfig {
    pub id: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            id: program_client::PROGRAM_ID.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PurchaseConfig {
    pub simulate: bool,
    pub skip_preflight: bool,
    /// Total attempts per purchase. Each attempt re-reads the supply.
    pub max_attempts: u32,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            simulate: false,
            skip_preflight: true,
            max_attempts: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    pub directory: PathBuf,
    pub base_uri: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".skinforge/uploads"),
            base_uri: "file://.skinforge/uploads".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub wallet: WalletConfig,
    pub program: ProgramConfig,
    pub purchase: PurchaseConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Loads `Skinforge.toml` from the current directory or the closest parent that has one.
    /// Falls back to defaults when there is none.
    #[throws]
    pub fn new() -> Self {
        match discover(CONFIG_FILE)? {
            Some(root) => Self::read(Path::new(&root).join(CONFIG_FILE))?,
            None => {
                debug!("{CONFIG_FILE} not found, using defaults");
                Self::default()
            }
        }
    }

    #[throws]
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        debug!("reading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()?
    }

    #[throws]
    pub fn cluster(&self) -> Cluster {
        Cluster::from_str(&self.cluster.url)
            .map_err(|_| Error::Cluster(self.cluster.url.clone()))?
    }

    pub fn commitment(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.cluster.commitment,
        }
    }

    #[throws]
    pub fn program_id(&self) -> Pubkey {
        parse_pubkey(&self.program.id)?
    }

    /// Loads the signing key. An explicit keypair file wins over the environment variable.
    #[throws]
    pub fn payer(&self) -> Keypair {
        match (&self.wallet.keypair_path, &self.wallet.keypair_env) {
            (Some(path), _) => keys::keypair_from_file(path)?,
            (None, Some(var)) => keys::keypair_from_env(var)?,
            (None, None) => throw!(Error::NoWallet),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    #[throws(Self::Err)]
    fn from_str(s: &str) -> Self {
        toml::from_str(s)?
    }
}

/// Climbs each parent directory until `target` is found.
#[throws]
pub fn discover(target: &str) -> Option<String> {
    let current_dir = env::current_dir().map_err(|source| Error::Io {
        path: ".".to_owned(),
        source,
    })?;
    let mut dir = Some(current_dir.as_path());
    while let Some(cwd) = dir {
        if cwd.join(target).is_file() {
            return Some(cwd.to_string_lossy().into_owned());
        }
        dir = cwd.parent();
    }
    None
}
