use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, sysvar};
use anchor_lang::{Discriminator, InstructionData};

use crate::{constants::INITIALIZE_CONFIG_DISCRIMINATOR, pda};
use super::build;

/// `initialize_config(usdc_mint)`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeConfig {
    pub fee_mint: Pubkey,
}

impl Discriminator for InitializeConfig {
    const DISCRIMINATOR: [u8; 8] = INITIALIZE_CONFIG_DISCRIMINATOR;
}

impl InstructionData for InitializeConfig {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeConfigAccounts {
    pub owner: Pubkey,
    pub config: Pubkey,
}

impl InitializeConfigAccounts {
    pub fn new(program_id: &Pubkey, owner: &Pubkey) -> Self {
        Self {
            owner: *owner,
            config: pda::config_address(program_id).0,
        }
    }
}

impl ToAccountMetas for InitializeConfigAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ]
    }
}

pub fn initialize_config(program_id: &Pubkey, owner: &Pubkey, fee_mint: &Pubkey) -> Instruction {
    build(
        program_id,
        &InitializeConfigAccounts::new(program_id, owner),
        &InitializeConfig { fee_mint: *fee_mint },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_utils::meta_flags;

    #[test]
    fn test_initialize_config_layout() {
        let owner = Pubkey::new_unique();
        let fee_mint = Pubkey::new_unique();
        let ix = initialize_config(&crate::ID, &owner, &fee_mint);

        assert_eq!(ix.program_id, crate::ID);
        assert_eq!(ix.data.len(), 8 + 32);
        assert_eq!(ix.data[..8], [208, 127, 21, 1, 194, 190, 196, 70]);
        assert_eq!(ix.data[8..], fee_mint.to_bytes());

        assert_eq!(
            meta_flags(&ix),
            vec![
                (owner, true, true),
                (pda::config_address(&crate::ID).0, false, true),
                (anchor_lang::system_program::ID, false, false),
                (sysvar::rent::ID, false, false),
            ]
        );
    }
}
