use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, sysvar};
use anchor_lang::{Discriminator, InstructionData};

use crate::{asset::Asset, constants::LOCK_TOKENS_DISCRIMINATOR, pda};
use super::build;

/// `lock_tokens(amount, unlock_time, seed)` for SPL mints
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockTokens {
    pub amount: u64,
    pub unlock_time: u64,
    pub seed: u64,
}

impl Discriminator for LockTokens {
    const DISCRIMINATOR: [u8; 8] = LOCK_TOKENS_DISCRIMINATOR;
}

impl InstructionData for LockTokens {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockTokensAccounts {
    pub locker: Pubkey,
    pub user_token_account: Pubkey,
    pub user_fee_account: Pubkey,
    pub lock_account: Pubkey,
    pub lock_vault: Pubkey,
    pub mint: Pubkey,
    pub fee_vault: Pubkey,
    pub config: Pubkey,
}

impl LockTokensAccounts {
    pub fn new(
        program_id: &Pubkey,
        locker: &Pubkey,
        mint: &Pubkey,
        fee_mint: &Pubkey,
        seed: u64,
    ) -> Result<Self> {
        let asset = Asset::fungible(*mint)?;
        Ok(Self {
            locker: *locker,
            user_token_account: pda::associated_token_address(locker, mint, false)?,
            user_fee_account: pda::associated_token_address(locker, fee_mint, false)?,
            lock_account: pda::lock_address(program_id, locker, &asset, seed).0,
            lock_vault: pda::lock_vault_address(program_id, locker, mint, seed)?,
            mint: *mint,
            fee_vault: pda::fee_vault_address(program_id, fee_mint)?,
            config: pda::config_address(program_id).0,
        })
    }
}

impl ToAccountMetas for LockTokensAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.locker, true),
            AccountMeta::new(self.user_token_account, false),
            AccountMeta::new(self.user_fee_account, false),
            AccountMeta::new(self.lock_account, false),
            AccountMeta::new(self.lock_vault, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new(self.fee_vault, false),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ]
    }
}

pub fn lock_tokens(
    program_id: &Pubkey,
    locker: &Pubkey,
    mint: &Pubkey,
    fee_mint: &Pubkey,
    args: LockTokens,
) -> Result<Instruction> {
    let accounts = LockTokensAccounts::new(program_id, locker, mint, fee_mint, args.seed)?;
    Ok(build(program_id, &accounts, &args))
}
