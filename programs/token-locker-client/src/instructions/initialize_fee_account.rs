use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, sysvar};
use anchor_lang::{Discriminator, InstructionData};

use crate::{constants::INITIALIZE_FEE_ACCOUNT_DISCRIMINATOR, pda};
use super::build;

/// `initialize_usdc_account()`: creates the config PDA's fee-mint account
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitializeFeeAccount {}

impl Discriminator for InitializeFeeAccount {
    const DISCRIMINATOR: [u8; 8] = INITIALIZE_FEE_ACCOUNT_DISCRIMINATOR;
}

impl InstructionData for InitializeFeeAccount {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeFeeAccountAccounts {
    pub owner: Pubkey,
    pub config: Pubkey,
    pub fee_vault: Pubkey,
    pub fee_mint: Pubkey,
}

impl InitializeFeeAccountAccounts {
    pub fn new(program_id: &Pubkey, owner: &Pubkey, fee_mint: &Pubkey) -> Result<Self> {
        Ok(Self {
            owner: *owner,
            config: pda::config_address(program_id).0,
            fee_vault: pda::fee_vault_address(program_id, fee_mint)?,
            fee_mint: *fee_mint,
        })
    }
}

impl ToAccountMetas for InitializeFeeAccountAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new(self.fee_vault, false),
            AccountMeta::new_readonly(self.fee_mint, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ]
    }
}

pub fn initialize_fee_account(
    program_id: &Pubkey,
    owner: &Pubkey,
    fee_mint: &Pubkey,
) -> Result<Instruction> {
    Ok(build(
        program_id,
        &InitializeFeeAccountAccounts::new(program_id, owner, fee_mint)?,
        &InitializeFeeAccount {},
    ))
}
