pub mod lock_info;
pub mod owner_config;

pub use lock_info::*;
pub use owner_config::*;

use anchor_lang::prelude::*;
use bytemuck::Pod;

use crate::{constants::DISCRIMINATOR_LEN, errors::ClientError};

/// A fixed-layout record owned by the token_locker program.
///
/// On the wire a record is its 8-byte discriminator followed by the
/// `#[repr(C)]` payload with every integer in little-endian order.
pub trait LockerAccount: Pod {
    const DISCRIMINATOR: [u8; 8];

    /// Discriminator plus payload
    const LEN: usize = DISCRIMINATOR_LEN + std::mem::size_of::<Self>();

    /// Converts integer fields between host and little-endian order.
    /// Applying it twice yields the original value.
    fn swap_le(self) -> Self;

    /// Decodes a record from raw account data. Bytes past the layout are ignored.
    fn decode(data: &[u8]) -> Result<Self> {
        require!(data.len() >= Self::LEN, ClientError::RecordTooShort);
        require!(
            data[..DISCRIMINATOR_LEN] == Self::DISCRIMINATOR,
            ClientError::DiscriminatorMismatch
        );

        let record = bytemuck::try_pod_read_unaligned::<Self>(&data[DISCRIMINATOR_LEN..Self::LEN])
            .map_err(|_| ClientError::RecordTooShort)?;

        Ok(record.swap_le())
    }

    /// Encodes the record exactly as the program stores it.
    fn encode(&self) -> Vec<u8> {
        let wire = self.swap_le();
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        data.extend_from_slice(bytemuck::bytes_of(&wire));
        data
    }
}
