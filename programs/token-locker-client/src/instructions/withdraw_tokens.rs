use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::{asset::Asset, constants::WITHDRAW_TOKENS_DISCRIMINATOR, pda};
use super::build;

/// `withdraw_tokens(seed)` for SPL mints
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawTokens {
    pub seed: u64,
}

impl Discriminator for WithdrawTokens {
    const DISCRIMINATOR: [u8; 8] = WITHDRAW_TOKENS_DISCRIMINATOR;
}

impl InstructionData for WithdrawTokens {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawTokensAccounts {
    pub locker: Pubkey,
    pub lock_account: Pubkey,
    pub user_token_account: Pubkey,
    pub lock_vault: Pubkey,
}

impl WithdrawTokensAccounts {
    pub fn new(program_id: &Pubkey, locker: &Pubkey, mint: &Pubkey, seed: u64) -> Result<Self> {
        let asset = Asset::fungible(*mint)?;
        Ok(Self {
            locker: *locker,
            lock_account: pda::lock_address(program_id, locker, &asset, seed).0,
            user_token_account: pda::associated_token_address(locker, mint, false)?,
            lock_vault: pda::lock_vault_address(program_id, locker, mint, seed)?,
        })
    }
}

impl ToAccountMetas for WithdrawTokensAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.locker, true),
            AccountMeta::new(self.lock_account, false),
            AccountMeta::new(self.user_token_account, false),
            AccountMeta::new(self.lock_vault, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ]
    }
}

pub fn withdraw_tokens(
    program_id: &Pubkey,
    locker: &Pubkey,
    mint: &Pubkey,
    seed: u64,
) -> Result<Instruction> {
    let accounts = WithdrawTokensAccounts::new(program_id, locker, mint, seed)?;
    Ok(build(program_id, &accounts, &WithdrawTokens { seed }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_utils::meta_flags;
    use crate::ledger::mock::wallet_key;

    #[test]
    fn test_withdraw_tokens_layout() {
        let locker = wallet_key();
        let mint = Pubkey::new_unique();
        let ix = withdraw_tokens(&crate::ID, &locker, &mint, 99).unwrap();

        assert_eq!(ix.data[..8], [2, 4, 225, 61, 19, 182, 106, 170]);
        assert_eq!(ix.data[8..], 99u64.to_le_bytes());

        let (lock, _) = pda::lock_address(&crate::ID, &locker, &Asset::Fungible(mint), 99);
        let flags = meta_flags(&ix);
        assert_eq!(flags.len(), 7);
        assert_eq!(flags[0], (locker, true, true));
        assert_eq!(flags[1], (lock, false, true));
        let user_account = pda::associated_token_address(&locker, &mint, false).unwrap();
        let lock_vault = pda::associated_token_address(&lock, &mint, true).unwrap();
        assert_eq!(flags[2], (user_account, false, true));
        assert_eq!(flags[3], (lock_vault, false, true));
        assert_eq!(flags[4], (anchor_spl::token::ID, false, false));
    }
}
