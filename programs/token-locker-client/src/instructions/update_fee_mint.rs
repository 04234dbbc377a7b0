use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::{constants::UPDATE_FEE_MINT_DISCRIMINATOR, pda};
use super::build;

/// `update_usdc_mint(new_usdc_mint)`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateFeeMint {
    pub new_fee_mint: Pubkey,
}

impl Discriminator for UpdateFeeMint {
    const DISCRIMINATOR: [u8; 8] = UPDATE_FEE_MINT_DISCRIMINATOR;
}

impl InstructionData for UpdateFeeMint {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateFeeMintAccounts {
    pub owner: Pubkey,
    pub config: Pubkey,
}

impl ToAccountMetas for UpdateFeeMintAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.config, false),
        ]
    }
}

pub fn update_fee_mint(program_id: &Pubkey, owner: &Pubkey, new_fee_mint: &Pubkey) -> Instruction {
    build(
        program_id,
        &UpdateFeeMintAccounts {
            owner: *owner,
            config: pda::config_address(program_id).0,
        },
        &UpdateFeeMint {
            new_fee_mint: *new_fee_mint,
        },
    )
}
