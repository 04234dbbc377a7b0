pub mod compute_budget;
pub mod extend_lock_time;
pub mod initialize_config;
pub mod initialize_fee_account;
pub mod lock_native_tokens;
pub mod lock_tokens;
pub mod update_fee_mint;
pub mod withdraw_fees;
pub mod withdraw_native_tokens;
pub mod withdraw_tokens;

pub use compute_budget::*;
pub use extend_lock_time::*;
pub use initialize_config::*;
pub use initialize_fee_account::*;
pub use lock_native_tokens::*;
pub use lock_tokens::*;
pub use update_fee_mint::*;
pub use withdraw_fees::*;
pub use withdraw_native_tokens::*;
pub use withdraw_tokens::*;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::InstructionData;

/// Assembles a token_locker instruction: discriminator plus little-endian
/// arguments, with the account list in program order.
pub fn build<A: ToAccountMetas, D: InstructionData>(
    program_id: &Pubkey,
    accounts: &A,
    args: &D,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: args.data(),
    }
}

/// Creates `owner`'s token account for `mint` unless it already exists
pub fn create_token_account_idempotent(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account_idempotent(
        payer,
        owner,
        mint,
        &anchor_spl::token::ID,
    )
}
