use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::{
    asset::Asset,
    constants::{
        SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, TOKEN_LOCK_INFO_DISCRIMINATOR,
    },
};
use super::LockerAccount;

/// One lock created by `lock_tokens` or `lock_native_tokens`.
///
/// The record survives withdrawal with `locked_amount` set to zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TokenLockInfo {
    /// Wallet that created the lock and may withdraw it
    pub locker: Pubkey,

    /// Locked mint, `Pubkey::default()` for the native asset
    pub token_mint: Pubkey,

    /// Amount still locked, in smallest units
    pub locked_amount: u64,

    /// Unix seconds after which withdrawal is allowed
    pub unlock_time: u64,

    /// Unix seconds when the lock was created
    pub creation_time: u64,

    /// Caller-chosen nonce used in the lock PDA seeds
    pub seed: u64,
}

impl TokenLockInfo {
    pub const PAYLOAD_LEN: usize = 32 + // locker
        32 + // token_mint
        8 + // locked_amount
        8 + // unlock_time
        8 + // creation_time
        8; // seed

    pub fn asset(&self) -> Asset {
        Asset::from_mint(self.token_mint)
    }

    pub fn is_native(&self) -> bool {
        self.asset().is_native()
    }

    /// Funds were withdrawn; the record is kept by the program
    pub fn is_withdrawn(&self) -> bool {
        self.locked_amount == 0
    }

    pub fn can_withdraw(&self, now: u64) -> bool {
        !self.is_withdrawn() && now >= self.unlock_time
    }

    /// Seconds left until unlock, `None` once the lock period has ended
    pub fn time_remaining(&self, now: u64) -> Option<u64> {
        match self.unlock_time.saturating_sub(now) {
            0 => None,
            remaining => Some(remaining),
        }
    }

    pub fn describe_remaining(&self, now: u64) -> String {
        match self.time_remaining(now) {
            None => "Lock period has ended".to_string(),
            Some(remaining) => {
                let days = remaining / SECONDS_PER_DAY;
                let hours = (remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
                let minutes = (remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
                format!("{}d {}h {}m remaining", days, hours, minutes)
            }
        }
    }
}

impl LockerAccount for TokenLockInfo {
    const DISCRIMINATOR: [u8; 8] = TOKEN_LOCK_INFO_DISCRIMINATOR;

    fn swap_le(self) -> Self {
        Self {
            locked_amount: u64::from_le(self.locked_amount),
            unlock_time: u64::from_le(self.unlock_time),
            creation_time: u64::from_le(self.creation_time),
            seed: u64::from_le(self.seed),
            ..self
        }
    }
}
