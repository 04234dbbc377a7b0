use std::str::FromStr;

use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::ClientError,
    ledger::ConfirmationLevel,
    session::Cluster,
};

pub const PROGRAM_ID_ENV: &str = "TOKEN_LOCKER_PROGRAM_ID";
pub const FEE_MINT_ENV: &str = "TOKEN_LOCKER_FEE_MINT";
pub const LOCK_FEE_ENV: &str = "TOKEN_LOCKER_LOCK_FEE";
pub const CLUSTER_ENV: &str = "TOKEN_LOCKER_CLUSTER";

/// Deployment-specific inputs. None of these are computed by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockerConfig {
    pub program_id: Pubkey,
    pub fee_mint: Pubkey,
    /// Fee charged per lock, in fee-mint smallest units
    pub lock_fee: u64,
    /// Confirmation level a submission must reach to count as landed
    pub commitment: ConfirmationLevel,
    pub cluster: Cluster,
    pub compute_unit_limit: u32,
    /// Priority fee attached to withdrawals, in micro-lamports per compute unit
    pub withdraw_priority_fee: u64,
}

impl Default for LockerConfig {
    fn default() -> Self {
        Self {
            program_id: crate::ID,
            fee_mint: DEFAULT_FEE_MINT,
            lock_fee: DEFAULT_LOCK_FEE,
            commitment: ConfirmationLevel::Confirmed,
            cluster: Cluster::Devnet,
            compute_unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
            withdraw_priority_fee: DEFAULT_WITHDRAW_PRIORITY_FEE,
        }
    }
}

impl LockerConfig {
    /// Defaults overridden by `TOKEN_LOCKER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(PROGRAM_ID_ENV) {
            config.program_id = parse_pubkey(&value)?;
        }
        if let Some(value) = lookup(FEE_MINT_ENV) {
            config.fee_mint = parse_pubkey(&value)?;
        }
        if let Some(value) = lookup(LOCK_FEE_ENV) {
            config.lock_fee = value.trim().parse().map_err(|_| ClientError::InvalidConfig)?;
        }
        if let Some(value) = lookup(CLUSTER_ENV) {
            config.cluster = value.parse()?;
        }

        Ok(config)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_fee_mint(mut self, fee_mint: Pubkey) -> Self {
        self.fee_mint = fee_mint;
        self
    }

    pub fn with_lock_fee(mut self, lock_fee: u64) -> Self {
        self.lock_fee = lock_fee;
        self
    }

    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.cluster = cluster;
        self
    }

    pub fn with_commitment(mut self, commitment: ConfirmationLevel) -> Self {
        self.commitment = commitment;
        self
    }
}

pub fn parse_pubkey(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|_| error!(ClientError::InvalidConfig))
}
