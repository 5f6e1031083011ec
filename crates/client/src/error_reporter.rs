use anchor_client::{
    solana_client::{
        client_error::ClientErrorKind,
        rpc_request::{RpcError, RpcResponseErrorData},
    },
    solana_sdk::{instruction::InstructionError, transaction::TransactionError},
};
use log::error;

use crate::client::Error;

/// Names of the Anchor framework error codes the `nft` program can fail with.
static ANCHOR_ERRORS: phf::Map<u32, &'static str> = phf::phf_map! {
    100u32 => "InstructionMissing",
    101u32 => "InstructionFallbackNotFound",
    102u32 => "InstructionDidNotDeserialize",
    2000u32 => "ConstraintMut",
    2002u32 => "ConstraintSigner",
    2003u32 => "ConstraintRaw",
    2004u32 => "ConstraintOwner",
    2006u32 => "ConstraintSeeds",
    2009u32 => "ConstraintAssociated",
    2010u32 => "ConstraintAssociatedInit",
    2012u32 => "ConstraintAddress",
    2014u32 => "ConstraintTokenMint",
    2015u32 => "ConstraintTokenOwner",
    3001u32 => "AccountDiscriminatorNotFound",
    3002u32 => "AccountDiscriminatorMismatch",
    3003u32 => "AccountDidNotDeserialize",
    3005u32 => "AccountNotEnoughKeys",
    3006u32 => "AccountNotMutable",
    3007u32 => "AccountOwnedByWrongProgram",
    3008u32 => "InvalidProgramId",
    3010u32 => "AccountNotSigner",
    3012u32 => "AccountNotInitialized",
    3014u32 => "AccountNotAssociatedTokenAccount",
};

/// Custom error code and the index of the failing instruction, if the failure carries one.
pub fn custom_error_code(err: &TransactionError) -> Option<(u8, u32)> {
    match err {
        TransactionError::InstructionError(index, InstructionError::Custom(code)) => {
            Some((*index, *code))
        }
        _ => None,
    }
}

pub fn anchor_error_name(code: u32) -> Option<&'static str> {
    ANCHOR_ERRORS.get(&code).copied()
}

/// Program logs attached to a failed simulation or preflight check.
pub fn program_logs(err: &Error) -> Vec<String> {
    match err {
        Error::SimulationFailed { logs, .. } => logs.clone(),
        Error::Rpc(e) => match e.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError {
                data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
                ..
            }) => result.logs.clone().unwrap_or_default(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// One line summary of a failed transaction.
pub fn describe_error(err: &Error) -> String {
    let Some(tx_error) = err.transaction_error() else {
        return err.to_string();
    };
    match custom_error_code(&tx_error) {
        Some((index, code)) => {
            let name = anchor_error_name(code).unwrap_or("program specific error");
            format!("instruction {index} failed with custom error {code} (0x{code:x}): {name}")
        }
        None => format!("transaction failed: {tx_error}"),
    }
}

/// Logs a failed attempt with the program provided code and logs.
pub fn report_error(err: &Error) {
    error!("{}", describe_error(err));
    let logs = program_logs(err);
    if !logs.is_empty() {
        error!("program logs:");
        for line in logs {
            error!("  {line}");
        }
    }
}
