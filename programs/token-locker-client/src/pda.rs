use anchor_lang::prelude::*;
use spl_associated_token_account::get_associated_token_address_with_program_id;

use crate::{
    asset::Asset,
    constants::{OWNER_CONFIG_SEED, TOKEN_LOCK_INFO_SEED},
    errors::ClientError,
};

/// The singleton `OwnerConfig` PDA
pub fn config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[OWNER_CONFIG_SEED], program_id)
}

/// The `TokenLockInfo` PDA for one (locker, asset, seed) triple
pub fn lock_address(
    program_id: &Pubkey,
    locker: &Pubkey,
    asset: &Asset,
    seed: u64,
) -> (Pubkey, u8) {
    let mint = asset.mint_key();
    Pubkey::find_program_address(
        &[
            TOKEN_LOCK_INFO_SEED,
            locker.as_ref(),
            mint.as_ref(),
            &seed.to_le_bytes(),
        ],
        program_id,
    )
}

/// Associated token account of `owner` for `mint` under the SPL token program.
///
/// PDA owners are off curve and must be requested with
/// `allow_owner_off_curve`; wallets must be on curve.
pub fn associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    allow_owner_off_curve: bool,
) -> Result<Pubkey> {
    require!(
        allow_owner_off_curve || owner.is_on_curve(),
        ClientError::OwnerOffCurve
    );
    Ok(get_associated_token_address_with_program_id(owner, mint, &anchor_spl::token::ID))
}

/// Program-owned fee account: the fee mint ATA of the config PDA
pub fn fee_vault_address(program_id: &Pubkey, fee_mint: &Pubkey) -> Result<Pubkey> {
    let (config, _) = config_address(program_id);
    associated_token_address(&config, fee_mint, true)
}

/// Token account holding a fungible lock: the mint ATA of the lock PDA
pub fn lock_vault_address(
    program_id: &Pubkey,
    locker: &Pubkey,
    mint: &Pubkey,
    seed: u64,
) -> Result<Pubkey> {
    let asset = Asset::fungible(*mint)?;
    let (lock, _) = lock_address(program_id, locker, &asset, seed);
    associated_token_address(&lock, mint, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_address_is_deterministic() {
        let program_id = crate::ID;
        let (first, bump) = config_address(&program_id);
        let (second, _) = config_address(&program_id);
        assert_eq!(first, second);

        let expected =
            Pubkey::create_program_address(&[OWNER_CONFIG_SEED, &[bump]], &program_id).unwrap();
        assert_eq!(first, expected);
        assert!(!first.is_on_curve());

        assert_ne!(first, config_address(&Pubkey::new_unique()).0);
    }

    #[test]
    fn test_lock_address_varies_with_every_input() {
        let program_id = crate::ID;
        let locker = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let asset = Asset::Fungible(mint);

        let (base, bump) = lock_address(&program_id, &locker, &asset, 42);
        assert_eq!(base, lock_address(&program_id, &locker, &asset, 42).0);

        let expected = Pubkey::create_program_address(
            &[
                TOKEN_LOCK_INFO_SEED,
                locker.as_ref(),
                mint.as_ref(),
                &42u64.to_le_bytes(),
                &[bump],
            ],
            &program_id,
        )
        .unwrap();
        assert_eq!(base, expected);

        let mut seen = std::collections::HashSet::new();
        for seed in 0..32u64 {
            assert!(seen.insert(lock_address(&program_id, &locker, &asset, seed).0));
        }

        assert_ne!(base, lock_address(&program_id, &Pubkey::new_unique(), &asset, 42).0);
        assert_ne!(base, lock_address(&program_id, &locker, &Asset::Native, 42).0);
        let other_mint = Asset::Fungible(Pubkey::new_unique());
        assert_ne!(base, lock_address(&program_id, &locker, &other_mint, 42).0);
    }

    #[test]
    fn test_native_lock_uses_default_mint_seed() {
        let program_id = crate::ID;
        let locker = Pubkey::new_unique();
        let (native, _) = lock_address(&program_id, &locker, &Asset::Native, 7);
        let (manual, _) = Pubkey::find_program_address(
            &[
                TOKEN_LOCK_INFO_SEED,
                locker.as_ref(),
                Pubkey::default().as_ref(),
                &7u64.to_le_bytes(),
            ],
            &program_id,
        );
        assert_eq!(native, manual);
    }

    #[test]
    fn test_associated_address_requires_off_curve_flag() {
        let mint = Pubkey::new_unique();
        let (config, _) = config_address(&crate::ID);

        assert_eq!(
            associated_token_address(&config, &mint, false).unwrap_err(),
            ClientError::OwnerOffCurve.into()
        );

        let vault = associated_token_address(&config, &mint, true).unwrap();
        assert_eq!(vault, fee_vault_address(&crate::ID, &mint).unwrap());
        assert_eq!(
            vault,
            anchor_spl::associated_token::get_associated_token_address(&config, &mint)
        );
    }
}
