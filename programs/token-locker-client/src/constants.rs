use anchor_lang::prelude::*;

/// PDA seeds
pub const OWNER_CONFIG_SEED: &[u8] = b"OwnerConfig";
pub const TOKEN_LOCK_INFO_SEED: &[u8] = b"TokenLockInfo";

/// Every account and instruction payload starts with an 8-byte tag
pub const DISCRIMINATOR_LEN: usize = 8;

/// Account discriminators, sha256("account:<Name>")[..8]
pub const OWNER_CONFIG_DISCRIMINATOR: [u8; 8] = [68, 140, 203, 32, 144, 130, 191, 23];
pub const TOKEN_LOCK_INFO_DISCRIMINATOR: [u8; 8] = [169, 155, 132, 240, 3, 21, 173, 54];

/// Instruction discriminators, sha256("global:<name>")[..8] where `<name>` is the
/// program's instruction name. The fee account and fee mint instructions are
/// `initialize_usdc_account` and `update_usdc_mint` on chain.
pub const INITIALIZE_CONFIG_DISCRIMINATOR: [u8; 8] = [208, 127, 21, 1, 194, 190, 196, 70];
pub const INITIALIZE_FEE_ACCOUNT_DISCRIMINATOR: [u8; 8] = [103, 20, 54, 81, 255, 20, 113, 205];
pub const LOCK_NATIVE_TOKENS_DISCRIMINATOR: [u8; 8] = [97, 53, 201, 3, 28, 12, 25, 249];
pub const LOCK_TOKENS_DISCRIMINATOR: [u8; 8] = [136, 11, 32, 232, 161, 117, 54, 211];
pub const WITHDRAW_NATIVE_TOKENS_DISCRIMINATOR: [u8; 8] = [122, 208, 11, 35, 0, 223, 125, 59];
pub const WITHDRAW_TOKENS_DISCRIMINATOR: [u8; 8] = [2, 4, 225, 61, 19, 182, 106, 170];
pub const EXTEND_LOCK_TIME_DISCRIMINATOR: [u8; 8] = [175, 19, 21, 28, 26, 14, 108, 245];
pub const WITHDRAW_FEES_DISCRIMINATOR: [u8; 8] = [198, 212, 171, 109, 144, 215, 174, 89];
pub const UPDATE_FEE_MINT_DISCRIMINATOR: [u8; 8] = [131, 156, 29, 130, 237, 52, 110, 164];

/// Decimal places of the native asset (lamports per SOL)
pub const NATIVE_DECIMALS: u8 = 9;

// 10^19 is the largest power of ten below u64::MAX
pub const MAX_DECIMALS: u8 = 19;

/// Fee mint used by the default deployment (devnet USDC)
pub const DEFAULT_FEE_MINT: Pubkey =
    solana_program::pubkey!("Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGtKJr");
pub const FEE_MINT_DECIMALS: u8 = 6;

/// Fee charged by every lock instruction, in fee-mint smallest units ($5)
pub const DEFAULT_LOCK_FEE: u64 = 5_000_000;

/// Compute budget attached to lock/withdraw transactions
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 400_000;
pub const DEFAULT_WITHDRAW_PRIORITY_FEE: u64 = 1_000_000;

/// Delay before re-checking a transaction whose confirmation was ambiguous
pub const AMBIGUOUS_RECHECK_DELAY_SECS: u64 = 5;

/// Time constants
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::hash::hash;

    #[test]
    fn test_instruction_discriminators_match_program_names() {
        let expected = [
            ("initialize_config", INITIALIZE_CONFIG_DISCRIMINATOR),
            ("initialize_usdc_account", INITIALIZE_FEE_ACCOUNT_DISCRIMINATOR),
            ("lock_native_tokens", LOCK_NATIVE_TOKENS_DISCRIMINATOR),
            ("lock_tokens", LOCK_TOKENS_DISCRIMINATOR),
            ("withdraw_native_tokens", WITHDRAW_NATIVE_TOKENS_DISCRIMINATOR),
            ("withdraw_tokens", WITHDRAW_TOKENS_DISCRIMINATOR),
            ("extend_lock_time", EXTEND_LOCK_TIME_DISCRIMINATOR),
            ("withdraw_fees", WITHDRAW_FEES_DISCRIMINATOR),
            ("update_usdc_mint", UPDATE_FEE_MINT_DISCRIMINATOR),
        ];

        for (name, discriminator) in expected {
            let preimage = format!("global:{}", name);
            assert_eq!(hash(preimage.as_bytes()).to_bytes()[..8], discriminator, "{}", name);
        }
    }
}
