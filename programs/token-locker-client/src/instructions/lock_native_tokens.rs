use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, sysvar};
use anchor_lang::{Discriminator, InstructionData};

use crate::{asset::Asset, constants::LOCK_NATIVE_TOKENS_DISCRIMINATOR, pda};
use super::build;

/// `lock_native_tokens(amount, unlock_time, seed)`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockNativeTokens {
    pub amount: u64,
    pub unlock_time: u64,
    pub seed: u64,
}

impl Discriminator for LockNativeTokens {
    const DISCRIMINATOR: [u8; 8] = LOCK_NATIVE_TOKENS_DISCRIMINATOR;
}

impl InstructionData for LockNativeTokens {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockNativeTokensAccounts {
    pub locker: Pubkey,
    pub user_fee_account: Pubkey,
    pub lock_account: Pubkey,
    pub fee_vault: Pubkey,
    pub config: Pubkey,
}

impl LockNativeTokensAccounts {
    pub fn new(program_id: &Pubkey, locker: &Pubkey, fee_mint: &Pubkey, seed: u64) -> Result<Self> {
        Ok(Self {
            locker: *locker,
            user_fee_account: pda::associated_token_address(locker, fee_mint, false)?,
            lock_account: pda::lock_address(program_id, locker, &Asset::Native, seed).0,
            fee_vault: pda::fee_vault_address(program_id, fee_mint)?,
            config: pda::config_address(program_id).0,
        })
    }
}

impl ToAccountMetas for LockNativeTokensAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.locker, true),
            AccountMeta::new(self.user_fee_account, false),
            AccountMeta::new(self.lock_account, false),
            AccountMeta::new(self.fee_vault, false),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ]
    }
}

pub fn lock_native_tokens(
    program_id: &Pubkey,
    locker: &Pubkey,
    fee_mint: &Pubkey,
    args: LockNativeTokens,
) -> Result<Instruction> {
    let accounts = LockNativeTokensAccounts::new(program_id, locker, fee_mint, args.seed)?;
    Ok(build(program_id, &accounts, &args))
}
