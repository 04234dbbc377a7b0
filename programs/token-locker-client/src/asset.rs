use anchor_lang::prelude::*;
use anchor_lang::AccountDeserialize;
use anchor_spl::token::Mint;

use crate::{
    constants::{MAX_DECIMALS, NATIVE_DECIMALS},
    errors::ClientError,
    ledger::LedgerClient,
};

/// Asset held by a lock. The program stores the native asset as the
/// default public key in the `token_mint` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    Fungible(Pubkey),
}

impl Asset {
    pub fn from_mint(mint: Pubkey) -> Self {
        if mint == Pubkey::default() {
            Asset::Native
        } else {
            Asset::Fungible(mint)
        }
    }

    /// Validated constructor for user-supplied mints
    pub fn fungible(mint: Pubkey) -> Result<Self> {
        require!(mint != Pubkey::default(), ClientError::InvalidMint);
        Ok(Asset::Fungible(mint))
    }

    /// Key used in lock PDA seeds and stored in `TokenLockInfo::token_mint`
    pub fn mint_key(&self) -> Pubkey {
        match self {
            Asset::Native => Pubkey::default(),
            Asset::Fungible(mint) => *mint,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }
}

/// Amount converted to smallest units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amount {
    pub units: u64,
    /// The requested value exceeded `u64::MAX` and was capped
    pub clamped: bool,
}

/// Caps an already-scaled amount at `u64::MAX`, flagging the clamp.
pub fn clamp_units(units: u128) -> Amount {
    match u64::try_from(units) {
        Ok(units) => Amount { units, clamped: false },
        Err(_) => {
            msg!("Amount exceeds maximum value for u64. Capping at max value.");
            Amount { units: u64::MAX, clamped: true }
        }
    }
}

/// Scales a human decimal amount ("2.5") by `decimals` without floating
/// point. Fractional digits beyond `decimals` are truncated.
pub fn to_smallest_units(amount: &str, decimals: u8) -> Result<Amount> {
    require!(decimals <= MAX_DECIMALS, ClientError::InvalidDecimals);

    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    require!(
        !(whole.is_empty() && fraction.is_empty()),
        ClientError::InvalidAmount
    );
    require!(
        whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()),
        ClientError::InvalidAmount
    );

    let fraction_digits = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(decimals as usize);

    let mut units: Option<u128> = Some(0);
    for digit in whole.bytes().chain(fraction_digits) {
        units = units
            .and_then(|v| v.checked_mul(10))
            .and_then(|v| v.checked_add(u128::from(digit - b'0')));
        if units.is_none() {
            break;
        }
    }

    let amount = clamp_units(units.unwrap_or(u128::MAX));
    require!(amount.units > 0, ClientError::InvalidAmount);

    Ok(amount)
}

/// Renders smallest units as a decimal string with trailing zeros trimmed.
pub fn format_units(units: u64, decimals: u8) -> String {
    let digits = units.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Reads `decimals` from raw SPL mint account data.
pub fn decode_mint_decimals(data: &[u8]) -> Result<u8> {
    let mint = Mint::try_deserialize(&mut &data[..]).map_err(|_| ClientError::InvalidMintAccount)?;
    Ok(mint.decimals)
}

/// Decimal places of `asset`, fetching the mint account for fungible assets.
pub async fn fetch_decimals<L: LedgerClient>(ledger: &L, asset: &Asset) -> anyhow::Result<u8> {
    match asset {
        Asset::Native => Ok(NATIVE_DECIMALS),
        Asset::Fungible(mint) => {
            let data = ledger
                .get_account_data(mint)
                .await?
                .ok_or(ClientError::AccountNotFound)
                .map_err(anchor_lang::error::Error::from)?;
            Ok(decode_mint_decimals(&data)?)
        }
    }
}
