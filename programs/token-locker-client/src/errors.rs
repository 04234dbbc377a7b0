use anchor_lang::prelude::*;

/// Errors raised by the on-chain token_locker program, in program order.
/// Codes start at 6000 and must stay aligned with the deployed program.
#[error_code]
#[derive(PartialEq, Eq)]
pub enum LockerError {
    #[msg("Unlock time must be in the future")]
    InvalidUnlockTime,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Lock period not yet ended")]
    LockNotExpired,

    #[msg("Only locker can withdraw")]
    UnauthorizedLocker,

    #[msg("No tokens to withdraw")]
    NoTokensToWithdraw,

    #[msg("Only owner can withdraw fees")]
    UnauthorizedOwner,

    #[msg("No fees to withdraw")]
    NoFeesToWithdraw,

    #[msg("Invalid USDC mint")]
    InvalidUsdcMint,

    #[msg("Only locker can extend")]
    OnlyLockerCanExtend,

    #[msg("New unlock time must be greater")]
    NewUnlockTimeMustBeGreater,

    #[msg("New unlock time must be in future")]
    NewUnlockTimeMustBeInFuture,

    #[msg("Only owner can update")]
    OnlyOwnerCanUpdate,
}

impl LockerError {
    const ALL: [LockerError; 12] = [
        LockerError::InvalidUnlockTime,
        LockerError::InvalidAmount,
        LockerError::LockNotExpired,
        LockerError::UnauthorizedLocker,
        LockerError::NoTokensToWithdraw,
        LockerError::UnauthorizedOwner,
        LockerError::NoFeesToWithdraw,
        LockerError::InvalidUsdcMint,
        LockerError::OnlyLockerCanExtend,
        LockerError::NewUnlockTimeMustBeGreater,
        LockerError::NewUnlockTimeMustBeInFuture,
        LockerError::OnlyOwnerCanUpdate,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| u32::from(*e) == code)
    }

    /// Finds the program error reported in simulation or transaction logs,
    /// either as `custom program error: 0x1772` or as an Anchor
    /// `Error Code: LockNotExpired` line.
    pub fn from_logs<S: AsRef<str>>(logs: &[S]) -> Option<Self> {
        logs.iter().find_map(|line| Self::from_log_line(line.as_ref()))
    }

    fn from_log_line(line: &str) -> Option<Self> {
        if let Some((_, hex)) = line.split_once("custom program error: 0x") {
            let digits: String = hex.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
            return u32::from_str_radix(&digits, 16).ok().and_then(Self::from_code);
        }
        if let Some((_, rest)) = line.split_once("Error Code: ") {
            let name: String = rest.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
            return Self::ALL.into_iter().find(|e| e.name() == name);
        }
        None
    }
}

/// Client-side codec and validation failures.
#[error_code(offset = 7000)]
pub enum ClientError {
    #[msg("Account data is shorter than the record layout")]
    RecordTooShort,

    #[msg("Account discriminator does not match the expected record type")]
    DiscriminatorMismatch,

    #[msg("Amount must be a positive decimal number")]
    InvalidAmount,

    #[msg("Unlock time must be after the current time")]
    InvalidUnlockTime,

    #[msg("Mint must not be the native asset placeholder")]
    InvalidMint,

    #[msg("Associated account owner is off curve")]
    OwnerOffCurve,

    #[msg("Account not found")]
    AccountNotFound,

    #[msg("Account data is not a valid mint")]
    InvalidMintAccount,

    #[msg("Account data is not a valid token account")]
    InvalidTokenAccount,

    #[msg("Config account already initialized")]
    ConfigAlreadyInitialized,

    #[msg("Config account not initialized")]
    ConfigNotInitialized,

    #[msg("Fee account already initialized")]
    FeeAccountAlreadyInitialized,

    #[msg("Wallet is not the locker of this lock")]
    NotLocker,

    #[msg("Wallet is not the config owner")]
    NotOwner,

    #[msg("Lock period not yet ended")]
    LockNotExpired,

    #[msg("Lock has already been withdrawn")]
    AlreadyWithdrawn,

    #[msg("No fees to withdraw")]
    NoFeesToWithdraw,

    #[msg("New unlock time must be greater than the current one")]
    UnlockTimeNotExtended,

    #[msg("Invalid configuration value")]
    InvalidConfig,

    #[msg("Decimals exceed the supported maximum of 19")]
    InvalidDecimals,

    #[msg("Amount exceeds the wallet balance")]
    InsufficientBalance,

    #[msg("Fee-mint balance is below the lock fee")]
    InsufficientFeeBalance,
}
