use std::collections::HashSet;

use anchor_lang::prelude::*;
use spl_token::solana_program::program_pack::Pack;

use crate::{
    config::LockerConfig,
    errors::ClientError,
    ledger::LedgerClient,
    pda,
    state::{LockerAccount, OwnerConfig, TokenLockInfo},
};

/// The program's singleton config, `None` before `initialize_config`.
pub async fn fetch_config<L: LedgerClient>(
    ledger: &L,
    program_id: &Pubkey,
) -> anyhow::Result<Option<OwnerConfig>> {
    let (address, _) = pda::config_address(program_id);
    match ledger.get_account_data(&address).await? {
        None => Ok(None),
        Some(data) => Ok(Some(OwnerConfig::decode(&data)?)),
    }
}

/// An SPL token account, `None` when it does not exist yet.
pub async fn fetch_token_account<L: LedgerClient>(
    ledger: &L,
    address: &Pubkey,
) -> anyhow::Result<Option<spl_token::state::Account>> {
    match ledger.get_account_data(address).await? {
        None => Ok(None),
        Some(data) => {
            let account = spl_token::state::Account::unpack(&data)
                .map_err(|_| error!(ClientError::InvalidTokenAccount))?;
            Ok(Some(account))
        }
    }
}

/// Initialization state of a deployment, as shown to the owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentStatus {
    pub config: Option<OwnerConfig>,
    pub fee_vault: Pubkey,
    pub fee_vault_exists: bool,
    /// Fee-mint smallest units held by the vault
    pub fee_vault_balance: u64,
}

impl DeploymentStatus {
    pub fn is_ready(&self) -> bool {
        self.config.is_some() && self.fee_vault_exists
    }
}

pub async fn deployment_status<L: LedgerClient>(
    ledger: &L,
    config: &LockerConfig,
) -> anyhow::Result<DeploymentStatus> {
    let owner_config = fetch_config(ledger, &config.program_id).await?;
    let fee_mint = owner_config.map(|c| c.fee_mint).unwrap_or(config.fee_mint);
    let fee_vault = pda::fee_vault_address(&config.program_id, &fee_mint)?;

    let vault = fetch_token_account(ledger, &fee_vault).await?;

    Ok(DeploymentStatus {
        config: owner_config,
        fee_vault,
        fee_vault_exists: vault.is_some(),
        fee_vault_balance: vault.map_or(0, |account| account.amount),
    })
}

/// A decoded lock record and its address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockEntry {
    pub address: Pubkey,
    pub info: TokenLockInfo,
}

/// Every `TokenLockInfo` owned by the program, withdrawn records included.
/// Records that fail to decode are logged and skipped.
pub async fn scan_locks<L: LedgerClient>(
    ledger: &L,
    program_id: &Pubkey,
) -> anyhow::Result<Vec<LockEntry>> {
    let accounts = ledger
        .get_program_accounts(program_id, &TokenLockInfo::DISCRIMINATOR)
        .await?;
    msg!("Found {} lock accounts", accounts.len());

    let locks = accounts
        .into_iter()
        .filter_map(|(address, data)| match TokenLockInfo::decode(&data) {
            Ok(info) => Some(LockEntry { address, info }),
            Err(e) => {
                msg!("Skipping lock account {}: {}", address, e);
                None
            }
        })
        .collect();

    Ok(locks)
}

/// Selects locks for a view. The default filter keeps everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockFilter {
    pub locker: Option<Pubkey>,
    pub include_withdrawn: bool,
}

impl Default for LockFilter {
    fn default() -> Self {
        Self {
            locker: None,
            include_withdrawn: true,
        }
    }
}

impl LockFilter {
    /// A wallet's own active locks
    pub fn for_locker(locker: Pubkey) -> Self {
        Self {
            locker: Some(locker),
            include_withdrawn: false,
        }
    }

    pub fn matches(&self, entry: &LockEntry) -> bool {
        self.locker.map_or(true, |locker| entry.info.locker == locker)
            && (self.include_withdrawn || !entry.info.is_withdrawn())
    }
}

pub fn filter_locks(locks: &[LockEntry], filter: &LockFilter) -> Vec<LockEntry> {
    locks.iter().filter(|entry| filter.matches(entry)).copied().collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_locks: usize,
    /// Native smallest units still locked
    pub native_locked: u64,
    pub fungible_locks: usize,
    pub unique_lockers: usize,
}

impl DashboardStats {
    pub fn from_locks(locks: &[LockEntry]) -> Self {
        let mut lockers = HashSet::new();
        let mut stats = Self::default();

        for entry in locks {
            stats.total_locks += 1;
            if entry.info.is_native() {
                stats.native_locked =
                    stats.native_locked.saturating_add(entry.info.locked_amount);
            } else {
                stats.fungible_locks += 1;
            }
            lockers.insert(entry.info.locker);
        }

        stats.unique_lockers = lockers.len();
        stats
    }
}
