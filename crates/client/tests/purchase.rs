mod common;

use common::{seeds_constraint_violation, transport_failure, MockLedger};
use skinforge_client::{
    buy_nft,
    client::Error as ClientError,
    config::PurchaseConfig,
    edition,
    program_client::PROGRAM_ID,
    purchase::Error,
    resolve_edition_marker, Ledger, Pubkey, Signer,
};

fn options(max_attempts: u32, simulate: bool) -> PurchaseConfig {
    PurchaseConfig {
        simulate,
        skip_preflight: true,
        max_attempts,
    }
}

fn marker_account(instructions: &[skinforge_client::Instruction]) -> Pubkey {
    instructions[0].accounts[10].pubkey
}

#[tokio::test]
async fn buys_the_next_print() {
    let ledger = MockLedger::new().with_supplies(&[7], Some(100));
    let master = Pubkey::new_unique();

    let receipt = buy_nft(&ledger, PROGRAM_ID, master, &options(1, false))
        .await
        .unwrap();

    assert_eq!(receipt.edition, 8);
    assert_eq!(receipt.attempts, 1);
    assert_eq!(receipt.marker, resolve_edition_marker(master, 7).unwrap());

    let submissions = ledger.submissions();
    assert_eq!(submissions.len(), 1);
    let (instructions, signers) = &submissions[0];
    assert_eq!(marker_account(instructions), receipt.marker.address);
    assert_eq!(signers, &vec![receipt.new_mint, ledger.payer().pubkey()]);
}

#[tokio::test]
async fn malformed_master_never_reaches_the_network() {
    let ledger = MockLedger::new().with_supplies(&[0], None);

    let result = buy_nft(&ledger, PROGRAM_ID, "not-a-mint", &options(3, true)).await;

    assert!(matches!(
        result,
        Err(Error::Resolve(edition::Error::InvalidIdentifier(id))) if id == "not-a-mint"
    ));
    assert_eq!(ledger.reads(), 0);
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn stale_supply_is_not_detected() {
    // the supply never moves, as if both purchases read it before either landed
    let ledger = MockLedger::new().with_supplies(&[247], None);
    let master = Pubkey::new_unique();

    let first = buy_nft(&ledger, PROGRAM_ID, master, &options(1, false))
        .await
        .unwrap();
    let second = buy_nft(&ledger, PROGRAM_ID, master, &options(1, false))
        .await
        .unwrap();

    assert_eq!(first.marker, second.marker);
    assert_eq!(first.edition, second.edition);
    assert_ne!(first.new_mint, second.new_mint);

    let submissions = ledger.submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(
        marker_account(&submissions[0].0),
        marker_account(&submissions[1].0)
    );
}

#[tokio::test]
async fn retry_re_reads_supply_and_re_derives_marker() {
    let ledger = MockLedger::new()
        .with_supplies(&[247, 248], None)
        .failing_submissions([seeds_constraint_violation()]);
    let master = Pubkey::new_unique();

    let receipt = buy_nft(&ledger, PROGRAM_ID, master, &options(2, false))
        .await
        .unwrap();

    assert_eq!(receipt.attempts, 2);
    assert_eq!(receipt.marker.index, 1);
    assert_eq!(receipt.edition, 249);
    assert_eq!(ledger.reads(), 2);

    let submissions = ledger.submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(
        marker_account(&submissions[0].0),
        resolve_edition_marker(master, 247).unwrap().address
    );
    assert_eq!(
        marker_account(&submissions[1].0),
        resolve_edition_marker(master, 248).unwrap().address
    );
    // every attempt prints into a fresh mint
    assert_ne!(submissions[0].1[0], submissions[1].1[0]);
}

#[tokio::test]
async fn without_retries_the_first_rejection_is_final() {
    let ledger = MockLedger::new()
        .with_supplies(&[3], None)
        .failing_submissions([seeds_constraint_violation()]);

    let result = buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(1, false)).await;

    assert!(matches!(
        result,
        Err(Error::Client(ClientError::SimulationFailed { .. }))
    ));
    assert_eq!(ledger.reads(), 1);
}

#[tokio::test]
async fn zero_attempts_still_tries_once() {
    let ledger = MockLedger::new().with_supplies(&[0], None);

    let receipt = buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(0, false))
        .await
        .unwrap();

    assert_eq!(receipt.attempts, 1);
}

#[tokio::test]
async fn local_failures_are_not_retried() {
    let missing = Pubkey::new_unique();
    let ledger = MockLedger::new().with_read_error(ClientError::AccountNotFound(missing));

    let result = buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(5, false)).await;

    assert!(matches!(
        result,
        Err(Error::Client(ClientError::AccountNotFound(address))) if address == missing
    ));
    assert_eq!(ledger.reads(), 1);
}

#[tokio::test]
async fn sold_out_editions_are_refused() {
    let ledger = MockLedger::new().with_supplies(&[3], Some(3));
    let master = Pubkey::new_unique();

    let result = buy_nft(&ledger, PROGRAM_ID, master, &options(3, false)).await;

    assert!(matches!(
        result,
        Err(Error::SoldOut { mint, supply: 3, max_supply: 3 }) if mint == master
    ));
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn failed_simulation_skips_submission() {
    let ledger = MockLedger::new()
        .with_supplies(&[0], None)
        .failing_simulations([seeds_constraint_violation()]);

    let result = buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(1, true)).await;

    assert!(matches!(
        result,
        Err(Error::Client(ClientError::SimulationFailed { .. }))
    ));
    assert_eq!(ledger.simulated.lock().unwrap().len(), 1);
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn simulation_precedes_submission() {
    let ledger = MockLedger::new().with_supplies(&[0], None);

    buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(1, true))
        .await
        .unwrap();

    let simulated = ledger.simulated.lock().unwrap().clone();
    let submitted = ledger.submissions();
    assert_eq!(simulated.len(), 1);
    assert_eq!(simulated[0], submitted[0].0);
}

#[tokio::test]
async fn submission_without_verdict_is_not_retried() {
    let ledger = MockLedger::new()
        .with_supplies(&[10, 11], None)
        .failing_submissions([transport_failure()]);

    let result = buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(3, false)).await;

    assert!(matches!(
        result,
        Err(Error::Client(ClientError::Rpc(_)))
    ));
    assert_eq!(ledger.reads(), 1);
    assert_eq!(ledger.submissions().len(), 1);
}

#[tokio::test]
async fn failed_supply_reads_are_retried() {
    let ledger = MockLedger::new()
        .with_read_error(transport_failure())
        .with_supplies(&[4], None);

    let receipt = buy_nft(&ledger, PROGRAM_ID, Pubkey::new_unique(), &options(2, false))
        .await
        .unwrap();

    assert_eq!(receipt.attempts, 2);
    assert_eq!(receipt.edition, 5);
    assert_eq!(ledger.reads(), 2);
    assert_eq!(ledger.submissions().len(), 1);
}
