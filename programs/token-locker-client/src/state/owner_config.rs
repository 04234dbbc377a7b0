use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::OWNER_CONFIG_DISCRIMINATOR;
use super::LockerAccount;

/// Singleton fee configuration stored at the `OwnerConfig` PDA
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct OwnerConfig {
    /// Administrative authority allowed to withdraw fees
    pub owner: Pubkey,

    /// Mint of the fee currency
    pub fee_mint: Pubkey,

    /// Fees accumulated by lock instructions, in fee-mint smallest units
    pub collected_fees: u64,
}

impl OwnerConfig {
    pub const PAYLOAD_LEN: usize = 32 + // owner
        32 + // fee_mint
        8; // collected_fees
}

impl LockerAccount for OwnerConfig {
    const DISCRIMINATOR: [u8; 8] = OWNER_CONFIG_DISCRIMINATOR;

    fn swap_le(self) -> Self {
        Self {
            collected_fees: u64::from_le(self.collected_fees),
            ..self
        }
    }
}
