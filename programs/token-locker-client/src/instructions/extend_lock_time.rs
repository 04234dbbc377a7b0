use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::constants::EXTEND_LOCK_TIME_DISCRIMINATOR;
use super::build;

/// `extend_lock_time(new_unlock_time)`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendLockTime {
    pub new_unlock_time: u64,
}

impl Discriminator for ExtendLockTime {
    const DISCRIMINATOR: [u8; 8] = EXTEND_LOCK_TIME_DISCRIMINATOR;
}

impl InstructionData for ExtendLockTime {}

/// The lock address is taken as-is since it already identifies the seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendLockTimeAccounts {
    pub locker: Pubkey,
    pub lock_account: Pubkey,
}

impl ToAccountMetas for ExtendLockTimeAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.locker, true),
            AccountMeta::new(self.lock_account, false),
        ]
    }
}

pub fn extend_lock_time(
    program_id: &Pubkey,
    locker: &Pubkey,
    lock_account: &Pubkey,
    new_unlock_time: u64,
) -> Instruction {
    build(
        program_id,
        &ExtendLockTimeAccounts {
            locker: *locker,
            lock_account: *lock_account,
        },
        &ExtendLockTime { new_unlock_time },
    )
}
