//! One flow per user action: validate, derive addresses, build one
//! transaction and submit it. Flows are sequential and never retry.

use anchor_lang::prelude::{error, msg, Pubkey};
use anchor_lang::solana_program::instruction::Instruction;
use anyhow::{ensure, Context, Result};

use crate::{
    asset::{fetch_decimals, format_units, to_smallest_units, Amount, Asset},
    errors::ClientError,
    instructions::{self, LockNativeTokens, LockTokens},
    ledger::{LedgerClient, WalletSigner},
    pda,
    scan::{deployment_status, fetch_config, fetch_token_account, LockEntry},
    session::Session,
    state::OwnerConfig,
    submit::{build_transaction, submit_transaction, SubmissionOutcome},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReceipt {
    pub outcome: SubmissionOutcome,
    /// Lock record the action created or touched
    pub lock_address: Option<Pubkey>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockRequest {
    pub asset: Asset,
    /// Human decimal amount, e.g. "2.5"
    pub amount: String,
    pub unlock_time: u64,
    /// Lock nonce; the current unix time when absent
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockReceipt {
    pub outcome: SubmissionOutcome,
    pub lock_address: Pubkey,
    pub seed: u64,
    pub amount: Amount,
}

async fn send<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
    instructions: &[Instruction],
) -> Result<SubmissionOutcome> {
    ensure!(
        wallet.pubkey() == session.wallet,
        "signer {} is not the session wallet {}",
        wallet.pubkey(),
        session.wallet
    );

    let built = build_transaction(ledger, &session.wallet, instructions)
        .await
        .context("failed to fetch a recent blockhash")?;

    let outcome = submit_transaction(
        ledger,
        wallet,
        &built,
        session.cluster(),
        session.config.commitment,
    )
    .await;
    Ok(outcome)
}

/// Config owned by the session wallet, required by every admin flow.
async fn owned_config<L: LedgerClient>(ledger: &L, session: &Session) -> Result<OwnerConfig> {
    let config = fetch_config(ledger, session.program_id())
        .await?
        .ok_or_else(|| error!(ClientError::ConfigNotInitialized))?;
    ensure!(config.owner == session.wallet, error!(ClientError::NotOwner));
    Ok(config)
}

/// Creates the singleton config with the session wallet as owner.
pub async fn initialize_config<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
) -> Result<ActionReceipt> {
    let existing = fetch_config(ledger, session.program_id()).await?;
    ensure!(existing.is_none(), error!(ClientError::ConfigAlreadyInitialized));

    msg!("Initializing config with fee mint {}", session.config.fee_mint);
    let ix = instructions::initialize_config(
        session.program_id(),
        &session.wallet,
        &session.config.fee_mint,
    );

    Ok(ActionReceipt {
        outcome: send(ledger, wallet, session, &[ix]).await?,
        lock_address: None,
    })
}

/// Creates the program's fee-mint account under the config PDA.
pub async fn initialize_fee_account<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
) -> Result<ActionReceipt> {
    let config = owned_config(ledger, session).await?;
    let status = deployment_status(ledger, &session.config).await?;
    ensure!(!status.fee_vault_exists, error!(ClientError::FeeAccountAlreadyInitialized));

    msg!("Initializing fee account {}", status.fee_vault);
    let ix = instructions::initialize_fee_account(
        session.program_id(),
        &session.wallet,
        &config.fee_mint,
    )?;

    Ok(ActionReceipt {
        outcome: send(ledger, wallet, session, &[ix]).await?,
        lock_address: None,
    })
}

/// Locks `request.amount` of `request.asset` until `request.unlock_time`.
///
/// The amount is scaled by the asset's on-chain decimals. The wallet must hold
/// the amount and at least `lock_fee` in its fee-mint account, which the
/// program charges.
pub async fn lock<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
    request: &LockRequest,
    now: u64,
) -> Result<LockReceipt> {
    ensure!(request.unlock_time > now, error!(ClientError::InvalidUnlockTime));

    let config = fetch_config(ledger, session.program_id())
        .await?
        .ok_or_else(|| error!(ClientError::ConfigNotInitialized))?;

    let decimals = fetch_decimals(ledger, &request.asset).await?;
    let amount = to_smallest_units(&request.amount, decimals)?;
    let balance = wallet_balance(ledger, &session.wallet, &request.asset).await?;
    ensure!(amount.units <= balance, error!(ClientError::InsufficientBalance));

    let fee_account = pda::associated_token_address(&session.wallet, &config.fee_mint, false)?;
    let fee_balance = fetch_token_account(ledger, &fee_account)
        .await?
        .map_or(0, |account| account.amount);
    ensure!(
        fee_balance >= session.config.lock_fee,
        error!(ClientError::InsufficientFeeBalance)
    );

    let seed = request.seed.unwrap_or(now);
    let (lock_address, _) =
        pda::lock_address(session.program_id(), &session.wallet, &request.asset, seed);

    msg!(
        "Locking {} ({} units) until {} with seed {}",
        format_units(amount.units, decimals),
        amount.units,
        request.unlock_time,
        seed
    );
    msg!(
        "Lock fee: {} of {} fee-mint units, lock account {}",
        session.config.lock_fee,
        fee_balance,
        lock_address
    );

    let lock_ix = match request.asset {
        Asset::Native => instructions::lock_native_tokens(
            session.program_id(),
            &session.wallet,
            &config.fee_mint,
            LockNativeTokens {
                amount: amount.units,
                unlock_time: request.unlock_time,
                seed,
            },
        )?,
        Asset::Fungible(mint) => instructions::lock_tokens(
            session.program_id(),
            &session.wallet,
            &mint,
            &config.fee_mint,
            LockTokens {
                amount: amount.units,
                unlock_time: request.unlock_time,
                seed,
            },
        )?,
    };

    let ixs = [
        instructions::set_compute_unit_limit(session.config.compute_unit_limit),
        lock_ix,
    ];

    Ok(LockReceipt {
        outcome: send(ledger, wallet, session, &ixs).await?,
        lock_address,
        seed,
        amount,
    })
}

/// Spendable balance of `asset` in smallest units: lamports for the native
/// asset, otherwise the wallet's associated token account.
async fn wallet_balance<L: LedgerClient>(
    ledger: &L,
    wallet: &Pubkey,
    asset: &Asset,
) -> Result<u64> {
    match asset {
        Asset::Native => Ok(ledger.get_balance(wallet).await?),
        Asset::Fungible(mint) => {
            let address = pda::associated_token_address(wallet, mint, false)?;
            let account = fetch_token_account(ledger, &address).await?;
            Ok(account.map_or(0, |account| account.amount))
        }
    }
}

/// Withdraws an expired lock back to its locker.
pub async fn withdraw<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
    entry: &LockEntry,
    now: u64,
) -> Result<ActionReceipt> {
    let info = &entry.info;
    ensure!(info.locker == session.wallet, error!(ClientError::NotLocker));
    ensure!(!info.is_withdrawn(), error!(ClientError::AlreadyWithdrawn));
    ensure!(info.can_withdraw(now), error!(ClientError::LockNotExpired));

    let asset = info.asset();
    let (expected, _) = pda::lock_address(session.program_id(), &info.locker, &asset, info.seed);
    ensure!(
        expected == entry.address,
        "lock account {} does not match its seeds (expected {})",
        entry.address,
        expected
    );

    let mut ixs = vec![
        instructions::set_compute_unit_price(session.config.withdraw_priority_fee),
        instructions::set_compute_unit_limit(session.config.compute_unit_limit),
    ];
    match asset {
        Asset::Native => {
            ixs.push(instructions::withdraw_native_tokens(
                session.program_id(),
                &session.wallet,
                info.seed,
            ));
        }
        Asset::Fungible(mint) => {
            ixs.push(instructions::create_token_account_idempotent(
                &session.wallet,
                &session.wallet,
                &mint,
            ));
            ixs.push(instructions::withdraw_tokens(
                session.program_id(),
                &session.wallet,
                &mint,
                info.seed,
            )?);
        }
    }

    msg!("Withdrawing lock {} ({} units)", entry.address, info.locked_amount);

    Ok(ActionReceipt {
        outcome: send(ledger, wallet, session, &ixs).await?,
        lock_address: Some(entry.address),
    })
}

pub async fn extend_lock_time<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
    entry: &LockEntry,
    new_unlock_time: u64,
    now: u64,
) -> Result<ActionReceipt> {
    ensure!(entry.info.locker == session.wallet, error!(ClientError::NotLocker));
    ensure!(
        new_unlock_time > entry.info.unlock_time,
        error!(ClientError::UnlockTimeNotExtended)
    );
    ensure!(new_unlock_time > now, error!(ClientError::InvalidUnlockTime));

    msg!(
        "Extending lock {} from {} to {}",
        entry.address,
        entry.info.unlock_time,
        new_unlock_time
    );
    let ix = instructions::extend_lock_time(
        session.program_id(),
        &session.wallet,
        &entry.address,
        new_unlock_time,
    );

    Ok(ActionReceipt {
        outcome: send(ledger, wallet, session, &[ix]).await?,
        lock_address: Some(entry.address),
    })
}

/// Sweeps collected fees to the owner's fee-mint account. The program only
/// pays out while the config's fee counter is positive.
pub async fn withdraw_fees<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
) -> Result<ActionReceipt> {
    let config = owned_config(ledger, session).await?;
    ensure!(config.collected_fees > 0, error!(ClientError::NoFeesToWithdraw));

    msg!("Withdrawing {} fee-mint units", config.collected_fees);
    let ixs = [
        instructions::create_token_account_idempotent(
            &session.wallet,
            &session.wallet,
            &config.fee_mint,
        ),
        instructions::withdraw_fees(session.program_id(), &session.wallet, &config.fee_mint)?,
    ];

    Ok(ActionReceipt {
        outcome: send(ledger, wallet, session, &ixs).await?,
        lock_address: None,
    })
}

pub async fn update_fee_mint<L: LedgerClient, W: WalletSigner>(
    ledger: &L,
    wallet: &W,
    session: &Session,
    new_fee_mint: &Pubkey,
) -> Result<ActionReceipt> {
    let config = owned_config(ledger, session).await?;
    ensure!(*new_fee_mint != Pubkey::default(), error!(ClientError::InvalidMint));

    msg!("Updating fee mint {} -> {}", config.fee_mint, new_fee_mint);
    let ix = instructions::update_fee_mint(session.program_id(), &session.wallet, new_fee_mint);

    Ok(ActionReceipt {
        outcome: send(ledger, wallet, session, &[ix]).await?,
        lock_address: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LockerConfig,
        ledger::mock::{wallet_key, MockLedger, MockWallet},
        state::{LockerAccount, TokenLockInfo},
    };
    use anchor_lang::solana_program::message::Message;
    use spl_token::solana_program::program_pack::Pack;

    const NOW: u64 = 1_750_000_000;

    fn setup(owner: Pubkey) -> (MockLedger, Session) {
        let ledger = MockLedger::default();
        let session = Session::new(owner, LockerConfig::default());
        let config = OwnerConfig {
            owner,
            fee_mint: session.config.fee_mint,
            collected_fees: 0,
        };
        ledger.set_account(pda::config_address(session.program_id()).0, config.encode());
        (ledger, session)
    }

    fn add_mint(ledger: &MockLedger, decimals: u8) -> Pubkey {
        let mint = Pubkey::new_unique();
        let state = spl_token::state::Mint {
            decimals,
            is_initialized: true,
            supply: 1_000_000_000_000,
            ..Default::default()
        };
        let mut data = vec![0u8; spl_token::state::Mint::LEN];
        spl_token::state::Mint::pack(state, &mut data).unwrap();
        ledger.set_account(mint, data);
        mint
    }

    fn add_token_account(
        ledger: &MockLedger,
        address: Pubkey,
        owner: Pubkey,
        mint: Pubkey,
        amount: u64,
    ) {
        let state = spl_token::state::Account {
            mint,
            owner,
            amount,
            state: spl_token::state::AccountState::Initialized,
            ..Default::default()
        };
        let mut data = vec![0u8; spl_token::state::Account::LEN];
        spl_token::state::Account::pack(state, &mut data).unwrap();
        ledger.set_account(address, data);
    }

    fn fund_wallet(ledger: &MockLedger, session: &Session, asset: Asset, amount: u64) {
        let fee_mint = session.config.fee_mint;
        let fee_account = pda::associated_token_address(&session.wallet, &fee_mint, false).unwrap();
        add_token_account(ledger, fee_account, session.wallet, fee_mint, session.config.lock_fee);

        match asset {
            Asset::Native => ledger.set_balance(session.wallet, amount),
            Asset::Fungible(mint) => {
                let account = pda::associated_token_address(&session.wallet, &mint, false).unwrap();
                add_token_account(ledger, account, session.wallet, mint, amount);
            }
        }
    }

    fn native_request(amount: &str) -> LockRequest {
        LockRequest {
            asset: Asset::Native,
            amount: amount.to_string(),
            unlock_time: NOW + 60,
            seed: None,
        }
    }

    fn program_of(message: &Message, index: usize) -> Pubkey {
        message.account_keys[message.instructions[index].program_id_index as usize]
    }

    fn lock_entry(session: &Session, asset: Asset, seed: u64, unlock_time: u64) -> LockEntry {
        LockEntry {
            address: pda::lock_address(session.program_id(), &session.wallet, &asset, seed).0,
            info: TokenLockInfo {
                locker: session.wallet,
                token_mint: asset.mint_key(),
                locked_amount: 1_000,
                unlock_time,
                creation_time: NOW - 100,
                seed,
            },
        }
    }

    #[tokio::test]
    async fn test_lock_fungible_end_to_end() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);
        let mint = add_mint(&ledger, 6);
        fund_wallet(&ledger, &session, Asset::Fungible(mint), 3_000_000);

        let request = LockRequest {
            asset: Asset::Fungible(mint),
            amount: "2.5".to_string(),
            unlock_time: NOW + 86_400,
            seed: Some(42),
        };
        let receipt = lock(&ledger, &wallet, &session, &request, NOW).await.unwrap();

        assert!(receipt.outcome.is_confirmed());
        assert_eq!(receipt.amount.units, 2_500_000);
        assert_eq!(receipt.seed, 42);
        assert_eq!(
            receipt.lock_address,
            pda::lock_address(&crate::ID, &user, &Asset::Fungible(mint), 42).0
        );
        assert_ne!(
            receipt.lock_address,
            pda::lock_address(&crate::ID, &user, &Asset::Fungible(mint), 43).0
        );

        let sent = wallet.sent.borrow();
        let message = &sent[0];
        assert_eq!(message.instructions.len(), 2);
        assert_eq!(program_of(message, 0), solana_sdk::compute_budget::ID);
        assert_eq!(program_of(message, 1), crate::ID);

        let data = &message.instructions[1].data;
        assert_eq!(data.len(), 32);
        assert_eq!(data[8..16], 2_500_000u64.to_le_bytes());
        assert_eq!(data[16..24], (NOW + 86_400).to_le_bytes());
        assert_eq!(data[24..32], 42u64.to_le_bytes());
    }

    #[tokio::test]
    async fn test_lock_native_defaults_seed_to_now() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);
        fund_wallet(&ledger, &session, Asset::Native, 1_000_000_000);

        let request = native_request("1");
        let receipt = lock(&ledger, &wallet, &session, &request, NOW).await.unwrap();

        assert_eq!(receipt.seed, NOW);
        assert_eq!(receipt.amount.units, 1_000_000_000);
        let data = &wallet.sent.borrow()[0].instructions[1].data;
        assert_eq!(data[..8], [97, 53, 201, 3, 28, 12, 25, 249]);
    }

    #[tokio::test]
    async fn test_lock_rejects_amount_above_wallet_balance() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);

        let err = lock(&ledger, &wallet, &session, &native_request("1000000"), NOW)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast::<anchor_lang::error::Error>().unwrap(),
            ClientError::InsufficientBalance.into()
        );

        let mint = add_mint(&ledger, 6);
        fund_wallet(&ledger, &session, Asset::Fungible(mint), 2_499_999);
        let request = LockRequest {
            asset: Asset::Fungible(mint),
            amount: "2.5".to_string(),
            unlock_time: NOW + 60,
            seed: None,
        };
        let err = lock(&ledger, &wallet, &session, &request, NOW).await.unwrap_err();
        assert_eq!(
            err.downcast::<anchor_lang::error::Error>().unwrap(),
            ClientError::InsufficientBalance.into()
        );

        assert!(wallet.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_lock_rejects_missing_or_short_fee_account() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);
        ledger.set_balance(user, 5_000_000_000);

        let err = lock(&ledger, &wallet, &session, &native_request("1"), NOW)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast::<anchor_lang::error::Error>().unwrap(),
            ClientError::InsufficientFeeBalance.into()
        );

        let fee_mint = session.config.fee_mint;
        let fee_account = pda::associated_token_address(&user, &fee_mint, false).unwrap();
        add_token_account(&ledger, fee_account, user, fee_mint, session.config.lock_fee - 1);
        let err = lock(&ledger, &wallet, &session, &native_request("1"), NOW)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast::<anchor_lang::error::Error>().unwrap(),
            ClientError::InsufficientFeeBalance.into()
        );

        assert!(wallet.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_lock_clamps_oversized_amount() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);
        let mint = add_mint(&ledger, 6);
        fund_wallet(&ledger, &session, Asset::Fungible(mint), u64::MAX);

        let request = LockRequest {
            asset: Asset::Fungible(mint),
            amount: "9".repeat(30),
            unlock_time: NOW + 60,
            seed: Some(1),
        };
        let receipt = lock(&ledger, &wallet, &session, &request, NOW).await.unwrap();

        assert_eq!(
            receipt.amount,
            Amount {
                units: u64::MAX,
                clamped: true
            }
        );
        let data = &wallet.sent.borrow()[0].instructions[1].data;
        assert_eq!(data[8..16], u64::MAX.to_le_bytes());
    }

    #[tokio::test]
    async fn test_lock_rejects_invalid_input_before_signing() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);

        let past = LockRequest {
            asset: Asset::Native,
            amount: "1".to_string(),
            unlock_time: NOW,
            seed: None,
        };
        assert!(lock(&ledger, &wallet, &session, &past, NOW).await.is_err());

        let zero = LockRequest {
            amount: "0".to_string(),
            unlock_time: NOW + 1,
            ..past
        };
        assert!(lock(&ledger, &wallet, &session, &zero, NOW).await.is_err());

        let unknown_mint = LockRequest {
            asset: Asset::Fungible(Pubkey::new_unique()),
            amount: "1".to_string(),
            unlock_time: NOW + 1,
            seed: None,
        };
        assert!(lock(&ledger, &wallet, &session, &unknown_mint, NOW).await.is_err());

        assert!(wallet.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_fungible_creates_token_account() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);
        let mint = Pubkey::new_unique();
        let entry = lock_entry(&session, Asset::Fungible(mint), 9, NOW - 1);

        let receipt = withdraw(&ledger, &wallet, &session, &entry, NOW).await.unwrap();
        assert_eq!(receipt.lock_address, Some(entry.address));

        let sent = wallet.sent.borrow();
        let message = &sent[0];
        assert_eq!(message.instructions.len(), 4);
        assert_eq!(message.instructions[0].data[0], 3);
        assert_eq!(program_of(message, 2), anchor_spl::associated_token::ID);
        assert_eq!(message.instructions[3].data[..8], [2, 4, 225, 61, 19, 182, 106, 170]);
    }

    #[tokio::test]
    async fn test_withdraw_guards() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);

        let locked = lock_entry(&session, Asset::Native, 1, NOW + 10);
        assert!(withdraw(&ledger, &wallet, &session, &locked, NOW).await.is_err());

        let mut emptied = lock_entry(&session, Asset::Native, 2, NOW - 10);
        emptied.info.locked_amount = 0;
        assert!(withdraw(&ledger, &wallet, &session, &emptied, NOW).await.is_err());

        let mut foreign = lock_entry(&session, Asset::Native, 3, NOW - 10);
        foreign.info.locker = wallet_key();
        assert!(withdraw(&ledger, &wallet, &session, &foreign, NOW).await.is_err());

        let mut moved = lock_entry(&session, Asset::Native, 4, NOW - 10);
        moved.address = Pubkey::new_unique();
        assert!(withdraw(&ledger, &wallet, &session, &moved, NOW).await.is_err());

        assert!(wallet.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_extend_lock_time_requires_later_time() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(user);
        let entry = lock_entry(&session, Asset::Native, 5, NOW + 100);

        let shorter = extend_lock_time(&ledger, &wallet, &session, &entry, NOW + 50, NOW).await;
        assert!(shorter.is_err());

        let receipt = extend_lock_time(&ledger, &wallet, &session, &entry, NOW + 200, NOW)
            .await
            .unwrap();
        assert!(receipt.outcome.is_confirmed());
        let data = &wallet.sent.borrow()[0].instructions[0].data;
        assert_eq!(data[8..], (NOW + 200).to_le_bytes());
    }

    #[tokio::test]
    async fn test_admin_flows_require_owner() {
        let owner = wallet_key();
        let (ledger, _) = setup(owner);
        let intruder = wallet_key();
        let session = Session::new(intruder, LockerConfig::default());
        let wallet = MockWallet::new(intruder);

        assert!(initialize_config(&ledger, &wallet, &session).await.is_err());
        assert!(update_fee_mint(&ledger, &wallet, &session, &Pubkey::new_unique()).await.is_err());
        assert!(withdraw_fees(&ledger, &wallet, &session).await.is_err());
        assert!(wallet.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_flows() {
        let owner = wallet_key();
        let ledger = MockLedger::default();
        let session = Session::new(owner, LockerConfig::default());
        let wallet = MockWallet::new(owner);

        let receipt = initialize_config(&ledger, &wallet, &session).await.unwrap();
        assert!(receipt.outcome.is_confirmed());

        // fee account needs the config on chain
        assert!(initialize_fee_account(&ledger, &wallet, &session).await.is_err());

        let config = OwnerConfig {
            owner,
            fee_mint: session.config.fee_mint,
            collected_fees: 0,
        };
        ledger.set_account(pda::config_address(session.program_id()).0, config.encode());
        initialize_fee_account(&ledger, &wallet, &session).await.unwrap();

        assert_eq!(wallet.sent.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_withdraw_fees_follows_collected_counter() {
        let owner = wallet_key();
        let (ledger, session) = setup(owner);
        let wallet = MockWallet::new(owner);
        let fee_mint = session.config.fee_mint;
        let config_address = pda::config_address(session.program_id()).0;

        // a funded vault is not enough while the counter is zero
        let fee_vault = pda::fee_vault_address(session.program_id(), &fee_mint).unwrap();
        add_token_account(&ledger, fee_vault, config_address, fee_mint, 5_000_000);
        let err = withdraw_fees(&ledger, &wallet, &session).await.unwrap_err();
        assert_eq!(
            err.downcast::<anchor_lang::error::Error>().unwrap(),
            ClientError::NoFeesToWithdraw.into()
        );
        assert!(wallet.sent.borrow().is_empty());

        // the counter alone decides, even with an empty vault
        add_token_account(&ledger, fee_vault, config_address, fee_mint, 0);
        let config = OwnerConfig {
            owner,
            fee_mint,
            collected_fees: 5_000_000,
        };
        ledger.set_account(config_address, config.encode());

        let receipt = withdraw_fees(&ledger, &wallet, &session).await.unwrap();
        assert!(receipt.outcome.is_confirmed());
        assert_eq!(wallet.sent.borrow()[0].instructions.len(), 2);
    }

    #[tokio::test]
    async fn test_mismatched_signer_is_rejected() {
        let user = wallet_key();
        let (ledger, session) = setup(user);
        let wallet = MockWallet::new(wallet_key());
        let entry = lock_entry(&session, Asset::Native, 6, NOW + 100);

        let result = extend_lock_time(&ledger, &wallet, &session, &entry, NOW + 200, NOW).await;
        assert!(result.is_err());
    }
}
