use std::fmt;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::{hash::Hash, message::Message};

/// Durability tier of a submitted transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfirmationLevel {
    Processed,
    Confirmed,
    Finalized,
}

/// Transport and wallet failures at the ledger seam.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// Request failed at the RPC/transport level
    Rpc(String),
    /// The blockhash expired before confirmation was observed
    BlockHeightExceeded,
    /// The confirmation wait gave up without a verdict
    ConfirmationTimeout,
    /// The wallet refused to sign
    WalletRejected(String),
    /// Preflight simulation rejected the transaction
    SimulationFailed { message: String, logs: Vec<String> },
    /// The transaction landed and failed
    TransactionFailed(String),
}

impl LedgerError {
    /// Expiry errors leave the outcome unknown: the transaction may still land.
    pub fn is_expiry(&self) -> bool {
        match self {
            LedgerError::BlockHeightExceeded | LedgerError::ConfirmationTimeout => true,
            LedgerError::Rpc(message) => {
                let message = message.to_lowercase();
                message.contains("block height exceeded") || message.contains("was not confirmed")
            }
            _ => false,
        }
    }

    pub fn logs(&self) -> &[String] {
        match self {
            LedgerError::SimulationFailed { logs, .. } => logs,
            _ => &[],
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Rpc(message) => write!(f, "RPC request failed: {}", message),
            LedgerError::BlockHeightExceeded => {
                write!(f, "block height exceeded before confirmation")
            }
            LedgerError::ConfirmationTimeout => write!(f, "transaction was not confirmed in time"),
            LedgerError::WalletRejected(message) => {
                write!(f, "wallet rejected the transaction: {}", message)
            }
            LedgerError::SimulationFailed { message, .. } => write!(f, "{}", message),
            LedgerError::TransactionFailed(message) => write!(f, "transaction failed: {}", message),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Read and confirmation access to the ledger.
///
/// Every call is a suspension point; implementations never cache.
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Lamports held by `address`, zero for a missing account
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError>;

    /// Accounts owned by `program_id` whose data starts with `discriminator`
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, LedgerError>;

    /// Latest blockhash and the last block height at which it is valid
    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), LedgerError>;

    /// Current confirmation level of `signature`, `None` if not yet seen
    async fn get_signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<ConfirmationLevel>, LedgerError>;

    /// Waits until `signature` reaches `level` or the blockhash expires
    async fn confirm_transaction(
        &self,
        signature: &str,
        blockhash: &Hash,
        last_valid_block_height: u64,
        level: ConfirmationLevel,
    ) -> Result<(), LedgerError>;
}

/// External wallet with a combined sign-and-send call.
#[allow(async_fn_in_trait)]
pub trait WalletSigner {
    fn pubkey(&self) -> Pubkey;

    /// Signs and broadcasts `message`, returning the base58 signature
    async fn sign_and_send(&self, message: &Message) -> Result<String, LedgerError>;
}
