//! Skinforge is a set of client tools for the skin NFT program: publishing weapon skins as
//! master editions and buying numbered print editions of them.
//!
//! The heavy lifting happens on-chain in the `nft` [Anchor](https://book.anchor-lang.com/)
//! program and the Metaplex Token Metadata program. This crate derives the accounts those
//! programs expect, builds their instructions and drives the submission flows.

pub use anchor_client::{
    self,
    anchor_lang::{self, InstructionData, ToAccountMetas},
    solana_sdk::{
        self,
        instruction::Instruction,
        pubkey::Pubkey,
        signature::Signature,
        signer::{keypair::Keypair, Signer},
    },
    Cluster,
};

pub use tokio;

pub mod config;
pub use config::Config;

pub mod client;
pub use client::{explorer_link, Client, Ledger, MasterEdition};

pub mod edition;
pub use edition::{resolve_edition_marker, EditionMarker};

mod keys;
pub use keys::*;

pub mod metadata;
pub use metadata::{SkinMetadata, TextureSet};

pub mod program_client;

pub mod purchase;
pub use purchase::{buy_nft, plan_purchase, PurchasePlan, PurchaseReceipt};

pub mod publish;

pub mod uploader;
pub use uploader::{DirectoryUploader, GenericFile, Uploader};

pub mod error_reporter;
pub use error_reporter::*;

pub mod constants {
    use crate::Pubkey;

    pub const CONFIG_FILE: &str = "Skinforge.toml";

    /// Number of print editions tracked by one edition marker account.
    ///
    /// Fixed by the on-chain layout of the marker bitmap (31 bytes of flags).
    pub const EDITION_MARKER_BIT_SIZE: u64 = 248;

    pub const METADATA_SEED: &[u8] = b"metadata";
    pub const EDITION_SEED: &[u8] = b"edition";
    pub const AUTHORITY_SEED: &[u8] = b"authority";

    /// Tag the game client looks for before it accepts a token as a skin.
    pub const SKIN_IDENTIFIER: &str = "fps+bq";

    pub const MAX_NAME_LENGTH: usize = 32;
    pub const MAX_SYMBOL_LENGTH: usize = 10;
    pub const MAX_URI_LENGTH: usize = 200;

    /// `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`
    pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
        11u8, 112u8, 101u8, 177u8, 227u8, 209u8, 124u8, 69u8, 56u8, 157u8, 82u8, 127u8, 107u8,
        4u8, 195u8, 205u8, 88u8, 184u8, 108u8, 115u8, 26u8, 160u8, 253u8, 181u8, 73u8, 182u8,
        209u8, 188u8, 3u8, 248u8, 41u8, 70u8,
    ]);
}
