#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use skinforge_client::{
    anchor_client::solana_client::client_error::{ClientError, ClientErrorKind},
    client::{Error, MASTER_EDITION_V2},
    solana_sdk::{instruction::InstructionError, transaction::TransactionError},
    Instruction, Keypair, Ledger, MasterEdition, Pubkey, Signature, Signer,
};

/// In-memory stand-in for a cluster. Hands out scripted master edition reads and
/// submission results and records everything it is asked to do.
pub struct MockLedger {
    payer: Keypair,
    editions: Mutex<VecDeque<Result<MasterEdition, Error>>>,
    simulation_failures: Mutex<VecDeque<Error>>,
    submit_failures: Mutex<VecDeque<Error>>,
    pub reads: AtomicUsize,
    pub simulated: Mutex<Vec<Vec<Instruction>>>,
    pub submitted: Mutex<Vec<(Vec<Instruction>, Vec<Pubkey>)>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            payer: Keypair::new(),
            editions: Mutex::new(VecDeque::new()),
            simulation_failures: Mutex::new(VecDeque::new()),
            submit_failures: Mutex::new(VecDeque::new()),
            reads: AtomicUsize::new(0),
            simulated: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Master edition reads return these supplies in order, repeating the last one.
    pub fn with_supplies(self, supplies: &[u64], max_supply: Option<u64>) -> Self {
        self.editions.lock().unwrap().extend(supplies.iter().map(|&supply| {
            Ok(MasterEdition {
                key: MASTER_EDITION_V2,
                supply,
                max_supply,
            })
        }));
        self
    }

    pub fn with_read_error(self, error: Error) -> Self {
        self.editions.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn failing_submissions(self, errors: impl IntoIterator<Item = Error>) -> Self {
        self.submit_failures.lock().unwrap().extend(errors);
        self
    }

    pub fn failing_simulations(self, errors: impl IntoIterator<Item = Error>) -> Self {
        self.simulation_failures.lock().unwrap().extend(errors);
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<(Vec<Instruction>, Vec<Pubkey>)> {
        self.submitted.lock().unwrap().clone()
    }
}

impl Ledger for MockLedger {
    fn payer(&self) -> &Keypair {
        &self.payer
    }

    async fn master_edition(&self, mint: &Pubkey) -> Result<MasterEdition, Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut editions = self.editions.lock().unwrap();
        if editions.len() > 1 {
            return editions.pop_front().unwrap();
        }
        match editions.front() {
            Some(Ok(edition)) => Ok(*edition),
            _ => editions
                .pop_front()
                .unwrap_or(Err(Error::AccountNotFound(*mint))),
        }
    }

    async fn simulate(
        &self,
        instructions: &[Instruction],
        _signers: &[&Keypair],
    ) -> Result<Vec<String>, Error> {
        self.simulated.lock().unwrap().push(instructions.to_vec());
        match self.simulation_failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(vec!["Program log: Instruction: BuyNft".to_owned()]),
        }
    }

    async fn submit(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
        _skip_preflight: bool,
    ) -> Result<Signature, Error> {
        self.submitted.lock().unwrap().push((
            instructions.to_vec(),
            signers.iter().map(|signer| signer.pubkey()).collect(),
        ));
        match self.submit_failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(Signature::new_unique()),
        }
    }
}

/// What the program answers when the edition marker seeds do not match its own derivation.
pub fn seeds_constraint_violation() -> Error {
    Error::SimulationFailed {
        err: TransactionError::InstructionError(0, InstructionError::Custom(2006)),
        logs: vec![
            "Program log: AnchorError caused by account: edition_marker. Error Code: ConstraintSeeds."
                .to_owned(),
        ],
    }
}

/// An RPC failure that says nothing about the fate of the transaction, like a timeout.
pub fn transport_failure() -> Error {
    ClientError::from(ClientErrorKind::Custom("request timed out".to_owned())).into()
}
