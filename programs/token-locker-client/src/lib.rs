use anchor_lang::prelude::*;

pub mod actions;
pub mod asset;
pub mod config;
pub mod constants;
pub mod errors;
pub mod instructions;
pub mod ledger;
pub mod pda;
#[cfg(feature = "rpc")]
pub mod rpc;
pub mod scan;
pub mod session;
pub mod state;
pub mod submit;

pub use asset::{Amount, Asset};
pub use config::LockerConfig;
pub use errors::{ClientError, LockerError};
pub use ledger::{ConfirmationLevel, LedgerClient, LedgerError, WalletSigner};
pub use session::{Cluster, Session};
pub use state::{LockerAccount, OwnerConfig, TokenLockInfo};
pub use submit::{BuiltTransaction, SubmissionFailure, SubmissionOutcome};

// Default deployment of the token_locker program. Other deployments are
// selected through `LockerConfig::program_id`.
declare_id!("CPmuun5rANNdQhsfHHm8xKQQuePjrTw37u9fzVbJZxTq");
