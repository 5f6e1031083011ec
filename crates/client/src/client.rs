use anchor_client::{
    solana_client::{
        client_error::ClientError as RpcError, nonblocking::rpc_client::RpcClient,
        rpc_config::RpcSendTransactionConfig,
    },
    solana_sdk::{
        commitment_config::CommitmentConfig, signer::SignerError, transaction::Transaction,
        transaction::TransactionError,
    },
    Cluster,
};
use borsh::BorshDeserialize;
use fehler::{throw, throws};
use log::{debug, info, warn};
use thiserror::Error;

use crate::{edition::master_edition_address, Instruction, Keypair, Pubkey, Signature, Signer};

/// `Key::MasterEditionV1` in the Token Metadata account header.
pub const MASTER_EDITION_V1: u8 = 2;
/// `Key::MasterEditionV2` in the Token Metadata account header.
pub const MASTER_EDITION_V2: u8 = 6;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Rpc(#[source] Box<RpcError>),
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("account {address} is not a master edition (key {key})")]
    UnexpectedAccountKey { address: Pubkey, key: u8 },
    #[error("cannot decode account {address}: {reason}")]
    Decode { address: Pubkey, reason: String },
    #[error("cannot sign transaction: {0}")]
    Signing(#[from] SignerError),
    #[error("transaction simulation failed: {err}")]
    SimulationFailed {
        err: TransactionError,
        logs: Vec<String>,
    },
}

impl From<RpcError> for Error {
    fn from(error: RpcError) -> Self {
        Self::Rpc(Box::new(error))
    }
}

impl Error {
    /// Failures reported by the node or the programs, as opposed to bad local input.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::SimulationFailed { .. })
    }

    /// The cluster evaluated the transaction and refused it, so it cannot land later.
    pub fn is_rejection(&self) -> bool {
        self.transaction_error().is_some()
    }

    pub fn transaction_error(&self) -> Option<TransactionError> {
        match self {
            Self::Rpc(e) => e.get_transaction_error(),
            Self::SimulationFailed { err, .. } => Some(err.clone()),
            _ => None,
        }
    }
}

/// Header of a Token Metadata master edition account.
#[derive(BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterEdition {
    pub key: u8,
    /// Number of prints minted so far.
    pub supply: u64,
    pub max_supply: Option<u64>,
}

impl MasterEdition {
    /// Decodes the account header. The account is padded, trailing bytes are ignored.
    #[throws]
    pub fn decode(address: Pubkey, data: &[u8]) -> Self {
        let edition = Self::deserialize(&mut &data[..]).map_err(|e| Error::Decode {
            address,
            reason: e.to_string(),
        })?;
        if edition.key != MASTER_EDITION_V2 && edition.key != MASTER_EDITION_V1 {
            throw!(Error::UnexpectedAccountKey {
                address,
                key: edition.key
            });
        }
        edition
    }

    /// The maximum supply, if every print allowed by it has been minted.
    pub fn sold_out_at(&self) -> Option<u64> {
        self.max_supply.filter(|&max| self.supply >= max)
    }
}

/// What the purchase and publishing flows need from the chain.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    fn payer(&self) -> &Keypair;

    async fn master_edition(&self, mint: &Pubkey) -> Result<MasterEdition, Error>;

    /// Runs the transaction without committing it. Fails with
    /// [`Error::SimulationFailed`] when the programs reject it.
    async fn simulate(&self, instructions: &[Instruction], signers: &[&Keypair])
        -> Result<Vec<String>, Error>;

    async fn submit(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
        skip_preflight: bool,
    ) -> Result<Signature, Error>;
}

/// Talks to a cluster on behalf of `payer`.
pub struct Client {
    payer: Keypair,
    cluster: Cluster,
    rpc: RpcClient,
}

impl Client {
    pub fn new(payer: Keypair, cluster: Cluster, commitment: CommitmentConfig) -> Self {
        let rpc = RpcClient::new_with_commitment(cluster.url().to_owned(), commitment);
        Self {
            payer,
            cluster,
            rpc,
        }
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    #[throws]
    pub async fn get_account_data(&self, address: &Pubkey) -> Vec<u8> {
        let account = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?
            .value;
        match account {
            Some(account) => account.data,
            None => throw!(Error::AccountNotFound(*address)),
        }
    }

    #[throws]
    async fn sign(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Transaction {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(instructions, Some(&self.payer.pubkey()));
        let mut all_signers = vec![&self.payer];
        all_signers.extend(
            signers
                .iter()
                .copied()
                .filter(|signer| signer.pubkey() != self.payer.pubkey()),
        );
        transaction.try_sign(&all_signers, blockhash)?;
        transaction
    }
}

impl Ledger for Client {
    fn payer(&self) -> &Keypair {
        &self.payer
    }

    async fn master_edition(&self, mint: &Pubkey) -> Result<MasterEdition, Error> {
        let address = master_edition_address(mint);
        let data = self.get_account_data(&address).await?;
        let edition = MasterEdition::decode(address, &data)?;
        debug!(
            "master edition {address}: supply {} of {:?}",
            edition.supply, edition.max_supply
        );
        Ok(edition)
    }

    async fn simulate(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Vec<String>, Error> {
        let transaction = self.sign(instructions, signers).await?;
        let result = self.rpc.simulate_transaction(&transaction).await?.value;
        let logs = result.logs.unwrap_or_default();
        for line in &logs {
            debug!("simulation: {line}");
        }
        match result.err {
            Some(err) => {
                warn!("simulation failed: {err}");
                Err(Error::SimulationFailed { err, logs })
            }
            None => Ok(logs),
        }
    }

    async fn submit(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
        skip_preflight: bool,
    ) -> Result<Signature, Error> {
        let transaction = self.sign(instructions, signers).await?;
        let signature = self
            .rpc
            .send_and_confirm_transaction_with_spinner_and_config(
                &transaction,
                self.rpc.commitment(),
                RpcSendTransactionConfig {
                    skip_preflight,
                    ..Default::default()
                },
            )
            .await?;
        info!(
            "confirmed {}",
            explorer_link("tx", &signature.to_string(), &self.cluster)
        );
        Ok(signature)
    }
}

/// Solana Explorer link for a transaction or an address on `cluster`.
pub fn explorer_link(kind: &str, id: &str, cluster: &Cluster) -> String {
    let base = format!("https://explorer.solana.com/{kind}/{id}");
    match cluster {
        Cluster::Mainnet => base,
        Cluster::Devnet => format!("{base}?cluster=devnet"),
        Cluster::Testnet => format!("{base}?cluster=testnet"),
        other => format!("{base}?cluster=custom&customUrl={}", other.url()),
    }
}
