//! Payload encoding for the create-metadata instruction.
//!
//! Layout: 8-byte discriminator, the metadata record (Borsh or JSON behind a
//! u32 length prefix), then `is_mutable` and `collection_details` flags.

use crate::config::MetadataFormat;
use crate::error::{LaunchError, LaunchResult};
use borsh::BorshSerialize;
use serde::Serialize;

/// Discriminator of the create-metadata-account instruction.
pub const CREATE_METADATA_DISCRIMINATOR: [u8; 8] = [0x22, 0x35, 0x57, 0x8f, 0xd9, 0x44, 0x80, 0x4c];

#[derive(Debug, Clone, PartialEq, BorshSerialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub address: [u8; 32],
    pub verified: bool,
    pub share: u8,
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, Serialize)]
pub struct Collection {
    pub verified: bool,
    pub key: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Uses {
    pub use_method: u8,
    pub remaining: u64,
    pub total: u64,
}

/// On-chain metadata record.
#[derive(Debug, Clone, PartialEq, BorshSerialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl DataV2 {
    /// A record with no royalties, creators, collection or uses.
    pub fn fungible(name: &str, symbol: &str, uri: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        }
    }
}

pub fn encode_create_metadata(data: &DataV2, format: MetadataFormat) -> LaunchResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    buf.extend_from_slice(&CREATE_METADATA_DISCRIMINATOR);

    match format {
        MetadataFormat::Borsh => {
            BorshSerialize::serialize(data, &mut buf)
                .map_err(|e| LaunchError::InvalidParameters(format!("metadata encoding failed: {}", e)))?;
        }
        MetadataFormat::Json => {
            let json = serde_json::to_vec(data)
                .map_err(|e| LaunchError::InvalidParameters(format!("metadata encoding failed: {}", e)))?;
            let len = u32::try_from(json.len())
                .map_err(|_| LaunchError::InvalidParameters("metadata too large".to_string()))?;
            buf.extend_from_slice(&len.to_le_bytes());
            buf.extend_from_slice(&json);
        }
    }

    // is_mutable = false
    buf.push(0);
    // collection_details = None
    buf.push(0);
    Ok(buf)
}
