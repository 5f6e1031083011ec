//! Addresses of Token Metadata accounts involved in printing editions.
//!
//! Every print of a master edition is recorded as one bit in an edition marker account.
//! A marker covers [`EDITION_MARKER_BIT_SIZE`] consecutive prints, so the marker a purchase
//! has to reference only depends on the master mint and its current supply.

use std::str::FromStr;

use fehler::{throw, throws};
use log::debug;
use thiserror::Error;

use crate::constants::{
    AUTHORITY_SEED, EDITION_MARKER_BIT_SIZE, EDITION_SEED, METADATA_SEED,
    TOKEN_METADATA_PROGRAM_ID,
};
use crate::Pubkey;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("'{0}' is not a valid 32 byte account address")]
    InvalidIdentifier(String),
    #[error("no off-curve edition marker address exists for mint {master} and marker {index}")]
    DerivationExhausted { master: Pubkey, index: u64 },
}

/// The edition marker account covering the next print of a master edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditionMarker {
    pub address: Pubkey,
    pub bump: u8,
    /// Which group of 248 prints the marker tracks.
    pub index: u64,
}

/// Anything that names a master mint: a parsed [`Pubkey`] or its base58 text.
pub trait MasterId {
    fn to_pubkey(&self) -> Result<Pubkey, Error>;
}

impl MasterId for Pubkey {
    fn to_pubkey(&self) -> Result<Pubkey, Error> {
        Ok(*self)
    }
}

impl MasterId for &Pubkey {
    fn to_pubkey(&self) -> Result<Pubkey, Error> {
        Ok(**self)
    }
}

impl MasterId for &str {
    fn to_pubkey(&self) -> Result<Pubkey, Error> {
        parse_pubkey(self)
    }
}

impl MasterId for String {
    fn to_pubkey(&self) -> Result<Pubkey, Error> {
        parse_pubkey(self)
    }
}

/// Parses a base58 address, rejecting anything that does not decode to exactly 32 bytes.
#[throws]
pub fn parse_pubkey(text: &str) -> Pubkey {
    match Pubkey::from_str(text) {
        Ok(pubkey) => pubkey,
        Err(_) => throw!(Error::InvalidIdentifier(text.to_owned())),
    }
}

pub fn edition_marker_index(supply: u64) -> u64 {
    supply / EDITION_MARKER_BIT_SIZE
}

/// Seed the Token Metadata program expects for a marker index: its decimal representation.
pub fn edition_marker_seed(index: u64) -> String {
    index.to_string()
}

/// Resolves the edition marker a `buy_nft` call must reference when the master edition
/// currently reports `current_supply` prints.
///
/// The supply has to be read right before submitting; a stale value points at a marker the
/// program rejects.
#[throws]
pub fn resolve_edition_marker(master_id: impl MasterId, current_supply: u64) -> EditionMarker {
    derive_edition_marker(
        master_id.to_pubkey()?,
        edition_marker_index(current_supply),
        Pubkey::try_find_program_address,
    )?
}

/// Runs `find` over the marker seeds of `master` and `index`.
#[throws]
fn derive_edition_marker<F>(master: Pubkey, index: u64, find: F) -> EditionMarker
where
    F: FnOnce(&[&[u8]], &Pubkey) -> Option<(Pubkey, u8)>,
{
    let seed = edition_marker_seed(index);
    let Some((address, bump)) = find(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            master.as_ref(),
            EDITION_SEED,
            seed.as_bytes(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    ) else {
        throw!(Error::DerivationExhausted { master, index });
    };

    debug!("edition marker {address} (index {index}, bump {bump}) for mint {master}");
    EditionMarker {
        address,
        bump,
        index,
    }
}

pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[METADATA_SEED, TOKEN_METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &TOKEN_METADATA_PROGRAM_ID,
    )
    .0
}

pub fn master_edition_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
    .0
}

/// Edition record of a print. Shares the seeds of a master edition.
pub fn edition_address(mint: &Pubkey) -> Pubkey {
    master_edition_address(mint)
}

/// PDA of the `nft` program that owns master edition vaults and signs prints.
pub fn mint_authority_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[AUTHORITY_SEED], program_id).0
}

pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}
