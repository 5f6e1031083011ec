//! Buying a numbered print of a master edition.
//!
//! A purchase reads the current supply, resolves the edition marker for it and submits
//! `buy_nft` with a fresh mint for the print. Nothing here guards against a concurrent buyer
//! racing for the same supply value: the program rejects the loser. With more than one
//! attempt configured, a rejected purchase starts over from a new supply read.

use log::{info, warn};
use thiserror::Error;

use crate::{
    client::{self, Ledger, MasterEdition},
    config::PurchaseConfig,
    edition::{self, resolve_edition_marker, EditionMarker, MasterId},
    error_reporter::report_error,
    keys::random_keypair,
    program_client::{accounts, buy_nft_ix},
    Instruction, Keypair, Pubkey, Signature, Signer,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] edition::Error),
    #[error(transparent)]
    Client(#[from] client::Error),
    #[error("mint {mint} is sold out: {supply} of {max_supply} editions printed")]
    SoldOut {
        mint: Pubkey,
        supply: u64,
        max_supply: u64,
    },
}

/// Everything needed to submit one purchase, derived from a supply value.
#[derive(Debug)]
pub struct PurchasePlan {
    /// Mint of the print, signs the transaction together with the buyer.
    pub new_mint: Keypair,
    pub master_mint: Pubkey,
    pub supply: u64,
    pub marker: EditionMarker,
    pub instruction: Instruction,
}

impl PurchasePlan {
    /// Edition number the print will get.
    pub fn edition(&self) -> u64 {
        self.supply.saturating_add(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub signature: Signature,
    pub new_mint: Pubkey,
    pub marker: EditionMarker,
    pub edition: u64,
    pub attempts: u32,
}

/// Prepares a purchase of the next print of `master_mint` assuming it has `supply` prints.
///
/// Pure: the caller is responsible for the supply being fresh.
pub fn plan_purchase(
    program_id: Pubkey,
    buyer: Pubkey,
    master_mint: impl MasterId,
    supply: u64,
) -> Result<PurchasePlan, edition::Error> {
    let master_mint = master_mint.to_pubkey()?;
    let marker = resolve_edition_marker(master_mint, supply)?;
    let new_mint = random_keypair();
    let instruction = buy_nft_ix(
        program_id,
        accounts::Buy::new(
            &program_id,
            buyer,
            master_mint,
            new_mint.pubkey(),
            marker.address,
        ),
    );
    Ok(PurchasePlan {
        new_mint,
        master_mint,
        supply,
        marker,
        instruction,
    })
}

/// Buys the next print of `master_mint` for the ledger's payer.
///
/// Failed supply reads and transactions the cluster definitely rejected are retried up to
/// `options.max_attempts` times. A submission that fails without a verdict ends the purchase,
/// since the transaction may still land.
pub async fn buy_nft<L: Ledger>(
    ledger: &L,
    program_id: Pubkey,
    master_mint: impl MasterId,
    options: &PurchaseConfig,
) -> Result<PurchaseReceipt, Error> {
    let master_mint = master_mint.to_pubkey()?;
    let max_attempts = options.max_attempts.max(1);

    info!("buying a print of {master_mint}");
    let mut attempt = 0;
    loop {
        attempt += 1;
        let retryable = match ledger.master_edition(&master_mint).await {
            Ok(edition) => {
                match attempt_purchase(ledger, program_id, master_mint, &edition, options).await {
                    Ok((plan, signature)) => {
                        info!(
                            "edition {} of {master_mint} minted to {}",
                            plan.edition(),
                            plan.new_mint.pubkey()
                        );
                        return Ok(PurchaseReceipt {
                            signature,
                            new_mint: plan.new_mint.pubkey(),
                            marker: plan.marker,
                            edition: plan.edition(),
                            attempts: attempt,
                        });
                    }
                    Err(Error::Client(err)) if err.is_rejection() => err,
                    Err(Error::Client(err)) => {
                        report_error(&err);
                        return Err(err.into());
                    }
                    Err(err) => return Err(err),
                }
            }
            Err(err) if err.is_remote() => err,
            Err(err) => return Err(err.into()),
        };

        report_error(&retryable);
        if attempt >= max_attempts {
            return Err(retryable.into());
        }
        warn!("attempt {attempt} of {max_attempts} failed, re-reading supply");
    }
}

async fn attempt_purchase<L: Ledger>(
    ledger: &L,
    program_id: Pubkey,
    master_mint: Pubkey,
    edition: &MasterEdition,
    options: &PurchaseConfig,
) -> Result<(PurchasePlan, Signature), Error> {
    if let Some(max_supply) = edition.sold_out_at() {
        return Err(Error::SoldOut {
            mint: master_mint,
            supply: edition.supply,
            max_supply,
        });
    }

    let buyer = ledger.payer();
    let plan = plan_purchase(program_id, buyer.pubkey(), master_mint, edition.supply)?;
    info!(
        "print mint {}, edition marker {} (index {})",
        plan.new_mint.pubkey(),
        plan.marker.address,
        plan.marker.index
    );

    let instructions = [plan.instruction.clone()];
    let signers = [&plan.new_mint, buyer];
    if options.simulate {
        ledger.simulate(&instructions, &signers).await?;
    }
    let signature = ledger
        .submit(&instructions, &signers, options.skip_preflight)
        .await?;
    Ok((plan, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program_client::PROGRAM_ID;

    #[test]
    fn plan_references_resolved_marker() {
        let buyer = Pubkey::new_unique();
        let master = Pubkey::new_unique();
        let plan = plan_purchase(PROGRAM_ID, buyer, master, 300).unwrap();

        assert_eq!(plan.marker, resolve_edition_marker(master, 300).unwrap());
        assert_eq!(plan.marker.index, 1);
        assert_eq!(plan.edition(), 301);
        assert_eq!(plan.instruction.accounts[0].pubkey, buyer);
        assert_eq!(plan.instruction.accounts[1].pubkey, master);
        assert_eq!(plan.instruction.accounts[6].pubkey, plan.new_mint.pubkey());
        assert_eq!(plan.instruction.accounts[10].pubkey, plan.marker.address);
    }

    #[test]
    fn stale_supply_plans_collide() {
        let buyer = Pubkey::new_unique();
        let master = Pubkey::new_unique();
        let first = plan_purchase(PROGRAM_ID, buyer, master, 5).unwrap();
        let second = plan_purchase(PROGRAM_ID, buyer, master, 5).unwrap();

        assert_eq!(first.marker, second.marker);
        assert_eq!(first.edition(), second.edition());
        assert_ne!(first.new_mint.pubkey(), second.new_mint.pubkey());
    }

    #[test]
    fn malformed_master_is_rejected() {
        assert!(matches!(
            plan_purchase(PROGRAM_ID, Pubkey::new_unique(), "abc", 0),
            Err(edition::Error::InvalidIdentifier(_))
        ));
    }
}
