use std::str::FromStr;
use std::time::Duration;

use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    client_error::{ClientError as RpcClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{
    config::LockerConfig,
    ledger::{ConfirmationLevel, LedgerClient, LedgerError, WalletSigner},
};

const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

fn commitment(level: ConfirmationLevel) -> CommitmentConfig {
    match level {
        ConfirmationLevel::Processed => CommitmentConfig::processed(),
        ConfirmationLevel::Confirmed => CommitmentConfig::confirmed(),
        ConfirmationLevel::Finalized => CommitmentConfig::finalized(),
    }
}

fn rpc_error(err: RpcClientError) -> LedgerError {
    LedgerError::Rpc(err.to_string())
}

/// Preflight rejections keep their simulation logs for error decoding.
fn send_error(err: RpcClientError) -> LedgerError {
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        message,
        data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
        ..
    }) = err.kind()
    {
        return LedgerError::SimulationFailed {
            message: message.clone(),
            logs: simulation.logs.clone().unwrap_or_default(),
        };
    }
    rpc_error(err)
}

fn parse_signature(signature: &str) -> Result<Signature, LedgerError> {
    Signature::from_str(signature)
        .map_err(|e| LedgerError::Rpc(format!("invalid signature {}: {}", signature, e)))
}

/// `LedgerClient` over a JSON-RPC node.
pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(url: String, level: ConfirmationLevel) -> Self {
        let commitment = commitment(level);
        Self {
            client: RpcClient::new_with_commitment(url, commitment),
            commitment,
        }
    }

    pub fn from_config(config: &LockerConfig) -> Self {
        Self::new(config.cluster.rpc_url().to_string(), config.commitment)
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }
}

impl LedgerClient for RpcLedger {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(rpc_error)?;
        Ok(response.value.map(|account| account.data))
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        let response = self
            .client
            .get_balance_with_commitment(address, self.commitment)
            .await
            .map_err(rpc_error)?;
        Ok(response.value)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, LedgerError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                0,
                discriminator,
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .client
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(rpc_error)?;

        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }

    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), LedgerError> {
        self.client
            .get_latest_blockhash_with_commitment(self.commitment)
            .await
            .map_err(rpc_error)
    }

    async fn get_signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<ConfirmationLevel>, LedgerError> {
        let signature = parse_signature(signature)?;
        let response = self
            .client
            .get_signature_statuses(&[signature])
            .await
            .map_err(rpc_error)?;

        let Some(status) = response.value.into_iter().next().flatten() else {
            return Ok(None);
        };
        if let Some(err) = status.err {
            return Err(LedgerError::TransactionFailed(err.to_string()));
        }

        let level = [
            ConfirmationLevel::Finalized,
            ConfirmationLevel::Confirmed,
            ConfirmationLevel::Processed,
        ]
        .into_iter()
        .find(|level| status.satisfies_commitment(commitment(*level)));

        Ok(level)
    }

    async fn confirm_transaction(
        &self,
        signature: &str,
        _blockhash: &Hash,
        last_valid_block_height: u64,
        level: ConfirmationLevel,
    ) -> Result<(), LedgerError> {
        loop {
            match self.get_signature_status(signature).await? {
                Some(status) if status >= level => return Ok(()),
                _ => {}
            }

            let height = self.client.get_block_height().await.map_err(rpc_error)?;
            if height > last_valid_block_height {
                return Err(LedgerError::BlockHeightExceeded);
            }

            tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
        }
    }
}

/// Local keypair signer that broadcasts through its own RPC client.
pub struct KeypairWallet {
    keypair: Keypair,
    client: RpcClient,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, url: String, level: ConfirmationLevel) -> Self {
        Self {
            keypair,
            client: RpcClient::new_with_commitment(url, commitment(level)),
        }
    }
}

impl WalletSigner for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_and_send(&self, message: &Message) -> Result<String, LedgerError> {
        let mut tx = Transaction::new_unsigned(message.clone());
        tx.try_sign(&[&self.keypair], message.recent_blockhash)
            .map_err(|e| LedgerError::WalletRejected(e.to_string()))?;
        let signature = self.client.send_transaction(&tx).await.map_err(send_error)?;
        Ok(signature.to_string())
    }
}
