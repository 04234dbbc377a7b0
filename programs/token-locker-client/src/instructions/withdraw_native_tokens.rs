use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::{asset::Asset, constants::WITHDRAW_NATIVE_TOKENS_DISCRIMINATOR, pda};
use super::build;

/// `withdraw_native_tokens(seed)`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawNativeTokens {
    pub seed: u64,
}

impl Discriminator for WithdrawNativeTokens {
    const DISCRIMINATOR: [u8; 8] = WITHDRAW_NATIVE_TOKENS_DISCRIMINATOR;
}

impl InstructionData for WithdrawNativeTokens {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawNativeTokensAccounts {
    pub locker: Pubkey,
    pub lock_account: Pubkey,
}

impl WithdrawNativeTokensAccounts {
    pub fn new(program_id: &Pubkey, locker: &Pubkey, seed: u64) -> Self {
        Self {
            locker: *locker,
            lock_account: pda::lock_address(program_id, locker, &Asset::Native, seed).0,
        }
    }
}

impl ToAccountMetas for WithdrawNativeTokensAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.locker, true),
            AccountMeta::new(self.lock_account, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ]
    }
}

pub fn withdraw_native_tokens(program_id: &Pubkey, locker: &Pubkey, seed: u64) -> Instruction {
    build(
        program_id,
        &WithdrawNativeTokensAccounts::new(program_id, locker, seed),
        &WithdrawNativeTokens { seed },
    )
}
