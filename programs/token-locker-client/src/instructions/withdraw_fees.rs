use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::{constants::WITHDRAW_FEES_DISCRIMINATOR, pda};
use super::build;

/// `withdraw_fees()`: sweeps the fee vault to the owner
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawFees {}

impl Discriminator for WithdrawFees {
    const DISCRIMINATOR: [u8; 8] = WITHDRAW_FEES_DISCRIMINATOR;
}

impl InstructionData for WithdrawFees {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawFeesAccounts {
    pub owner: Pubkey,
    pub config: Pubkey,
    pub fee_vault: Pubkey,
    pub owner_fee_account: Pubkey,
}

impl WithdrawFeesAccounts {
    pub fn new(program_id: &Pubkey, owner: &Pubkey, fee_mint: &Pubkey) -> Result<Self> {
        Ok(Self {
            owner: *owner,
            config: pda::config_address(program_id).0,
            fee_vault: pda::fee_vault_address(program_id, fee_mint)?,
            owner_fee_account: pda::associated_token_address(owner, fee_mint, false)?,
        })
    }
}

impl ToAccountMetas for WithdrawFeesAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new(self.fee_vault, false),
            AccountMeta::new(self.owner_fee_account, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
        ]
    }
}

pub fn withdraw_fees(
    program_id: &Pubkey,
    owner: &Pubkey,
    fee_mint: &Pubkey,
) -> Result<Instruction> {
    Ok(build(
        program_id,
        &WithdrawFeesAccounts::new(program_id, owner, fee_mint)?,
        &WithdrawFees {},
    ))
}
