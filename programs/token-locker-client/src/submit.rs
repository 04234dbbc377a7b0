use std::time::Duration;

use anchor_lang::prelude::{msg, Pubkey};
use anchor_lang::solana_program::{hash::Hash, instruction::Instruction, message::Message};

use crate::{
    constants::AMBIGUOUS_RECHECK_DELAY_SECS,
    errors::LockerError,
    ledger::{ConfirmationLevel, LedgerClient, LedgerError, WalletSigner},
    session::Cluster,
};

/// An unsigned message plus the blockhash validity window it was built with.
#[derive(Clone, Debug)]
pub struct BuiltTransaction {
    pub message: Message,
    pub blockhash: Hash,
    /// Confirmation waits never run past this height
    pub last_valid_block_height: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionFailure {
    /// Present when the transaction was broadcast before failing
    pub signature: Option<String>,
    pub error: LedgerError,
    pub program_error: Option<LockerError>,
    pub hints: Vec<&'static str>,
}

impl SubmissionFailure {
    fn new(signature: Option<String>, error: LedgerError) -> Self {
        let program_error = match &error {
            LedgerError::SimulationFailed { message, logs } => {
                LockerError::from_logs(logs.as_slice())
                    .or_else(|| LockerError::from_logs(&[message]))
            }
            LedgerError::TransactionFailed(message) | LedgerError::Rpc(message) => {
                LockerError::from_logs(&[message])
            }
            _ => None,
        };

        let hints = simulation_hints(&error);
        for line in error.logs() {
            msg!("Transaction log: {}", line);
        }
        if !hints.is_empty() {
            msg!("Transaction simulation failed. This might be due to:");
            for (i, hint) in hints.iter().enumerate() {
                msg!("{}. {}", i + 1, hint);
            }
        }
        if let Some(program_error) = program_error {
            msg!("Program error {}: {}", u32::from(program_error), program_error);
        }

        Self {
            signature,
            error,
            program_error,
            hints,
        }
    }
}

/// Terminal state of one submission. Nothing is retried automatically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The first status poll already met the required level
    ConfirmedDirect { signature: String },
    ConfirmedAfterWait { signature: String },
    /// The wait expired without a verdict; the transaction may still land
    AmbiguousTimeout {
        signature: String,
        explorer_url: String,
        recheck_after: Duration,
    },
    Failed(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            SubmissionOutcome::ConfirmedDirect { .. } | SubmissionOutcome::ConfirmedAfterWait { .. }
        )
    }

    pub fn signature(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::ConfirmedDirect { signature }
            | SubmissionOutcome::ConfirmedAfterWait { signature }
            | SubmissionOutcome::AmbiguousTimeout { signature, .. } => Some(signature),
            SubmissionOutcome::Failed(failure) => failure.signature.as_deref(),
        }
    }

    /// Delay before the caller should refresh state after an ambiguous result
    pub fn recheck_after(&self) -> Option<Duration> {
        match self {
            SubmissionOutcome::AmbiguousTimeout { recheck_after, .. } => Some(*recheck_after),
            _ => None,
        }
    }
}

/// Fetches a fresh blockhash and compiles `instructions` for `payer`.
pub async fn build_transaction<L: LedgerClient>(
    ledger: &L,
    payer: &Pubkey,
    instructions: &[Instruction],
) -> Result<BuiltTransaction, LedgerError> {
    let (blockhash, last_valid_block_height) = ledger.get_latest_blockhash().await?;
    let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);

    Ok(BuiltTransaction {
        message,
        blockhash,
        last_valid_block_height,
    })
}

/// Signs, broadcasts and confirms `built`.
///
/// A status poll that already meets `level` short-circuits the wait. An
/// expired wait is re-polled once before being reported as ambiguous.
pub async fn submit_transaction<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    built: &BuiltTransaction,
    cluster: &Cluster,
    level: ConfirmationLevel,
) -> SubmissionOutcome {
    let signature = match wallet.sign_and_send(&built.message).await {
        Ok(signature) => signature,
        Err(error) => {
            msg!("Error signing transaction: {}", error);
            return SubmissionOutcome::Failed(SubmissionFailure::new(None, error));
        }
    };
    msg!("Transaction sent with signature: {}", signature);

    match ledger.get_signature_status(&signature).await {
        Ok(Some(status)) if status >= level => {
            msg!("Transaction already confirmed: {:?}", status);
            return SubmissionOutcome::ConfirmedDirect { signature };
        }
        Ok(status) => msg!("Current status: {:?}, waiting for confirmation", status),
        Err(error) => msg!("Status check failed: {}, waiting for confirmation", error),
    }

    let waited = ledger
        .confirm_transaction(&signature, &built.blockhash, built.last_valid_block_height, level)
        .await;

    match waited {
        Ok(()) => {
            msg!("Transaction confirmed: {}", signature);
            SubmissionOutcome::ConfirmedAfterWait { signature }
        }
        Err(error) if error.is_expiry() => {
            msg!("Confirmation wait expired: {}, checking status once more", error);
            recheck(ledger, signature, cluster, level).await
        }
        Err(error) => {
            msg!("Transaction failed: {}", error);
            SubmissionOutcome::Failed(SubmissionFailure::new(Some(signature), error))
        }
    }
}

async fn recheck<L: LedgerClient>(
    ledger: &L,
    signature: String,
    cluster: &Cluster,
    level: ConfirmationLevel,
) -> SubmissionOutcome {
    match ledger.get_signature_status(&signature).await {
        Ok(Some(status)) if status >= level => {
            msg!("Transaction confirmed after expiry: {}", signature);
            return SubmissionOutcome::ConfirmedAfterWait { signature };
        }
        Ok(status) => msg!("Status after expiry: {:?}", status),
        Err(error) => msg!("Status recheck failed: {}", error),
    }

    let explorer_url = cluster.explorer_tx_url(&signature);
    msg!(
        "Transaction may still be processing. Check the explorer for status: {}",
        explorer_url
    );

    SubmissionOutcome::AmbiguousTimeout {
        signature,
        explorer_url,
        recheck_after: Duration::from_secs(AMBIGUOUS_RECHECK_DELAY_SECS),
    }
}

fn simulation_hints(error: &LedgerError) -> Vec<&'static str> {
    let LedgerError::SimulationFailed { message, logs } = error else {
        return Vec::new();
    };

    let text = std::iter::once(message)
        .chain(logs.iter())
        .map(|line| line.to_lowercase())
        .collect::<Vec<_>>();
    let mentions = |needle: &str| text.iter().any(|line| line.contains(needle));

    let mut hints = Vec::new();
    if mentions("insufficient funds") || mentions("insufficient lamports") {
        hints.push("Insufficient funds for transaction fee");
    }
    if mentions("custom program error")
        || mentions("error code:")
        || mentions("failed to complete")
    {
        hints.push("Program error in the contract");
    }
    if mentions("already in use") {
        hints.push("Account already in use");
    }
    if hints.is_empty() {
        hints = vec![
            "Insufficient funds for transaction fee",
            "Program error in the contract",
            "Account already in use",
        ];
    }
    hints
}
