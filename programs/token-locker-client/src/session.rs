use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anchor_lang::prelude::*;

use crate::{config::LockerConfig, errors::ClientError};

/// Network the wallet is connected to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Custom(String),
}

impl Cluster {
    pub fn rpc_url(&self) -> &str {
        match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Custom(url) => url,
        }
    }

    /// Link to a transaction on the Solana explorer
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        match self {
            Cluster::MainnetBeta => {
                format!("https://explorer.solana.com/tx/{}?cluster=mainnet", signature)
            }
            Cluster::Devnet => {
                format!("https://explorer.solana.com/tx/{}?cluster=devnet", signature)
            }
            Cluster::Testnet => {
                format!("https://explorer.solana.com/tx/{}?cluster=testnet", signature)
            }
            Cluster::Custom(url) => format!(
                "https://explorer.solana.com/tx/{}?cluster=custom&customUrl={}",
                signature,
                urlencoding::encode(url)
            ),
        }
    }
}

impl FromStr for Cluster {
    type Err = anchor_lang::error::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "mainnet" | "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Cluster::Custom(url.to_string()))
            }
            _ => err!(ClientError::InvalidConfig),
        }
    }
}

/// Connected wallet plus deployment settings, passed explicitly to every flow.
#[derive(Clone, Debug)]
pub struct Session {
    pub wallet: Pubkey,
    pub config: LockerConfig,
}

impl Session {
    pub fn new(wallet: Pubkey, config: LockerConfig) -> Self {
        Self { wallet, config }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.config.program_id
    }

    pub fn cluster(&self) -> &Cluster {
        &self.config.cluster
    }
}

/// Current wall-clock time in unix seconds
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
