//! Symbol addresses
//!
//! Layout (25 bytes, base32 encoded to 40 characters):
//!
//! ```text
//! network(1) || ripemd160(sha3_256(public_key))(20) || sha3_256(first 21 bytes)[..4]
//! ```

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;
use subtle::ConstantTimeEq;

use crate::error::{ErrorCode, ProfileError, ProfileResult};
use crate::types::NetworkType;

const RAW_ADDRESS_LEN: usize = 25;
const ENCODED_ADDRESS_LEN: usize = 40;
const CHECKSUM_LEN: usize = 4;

/// A Symbol account address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    address: String,
    network_type: NetworkType,
}

impl Address {
    /// Derive the address of a public key on a network
    pub fn from_public_key(public_key: &[u8; 32], network_type: NetworkType) -> Self {
        let key_hash = Sha3_256::digest(public_key);
        let ripemd_hash = Ripemd160::digest(key_hash);

        let mut raw = [0u8; RAW_ADDRESS_LEN];
        raw[0] = network_type.as_byte();
        raw[1..21].copy_from_slice(&ripemd_hash);

        let checksum = Sha3_256::digest(&raw[..21]);
        raw[21..].copy_from_slice(&checksum[..CHECKSUM_LEN]);

        Self {
            address: data_encoding::BASE32_NOPAD.encode(&raw),
            network_type,
        }
    }

    /// Parse a plain (`TA4E47...`) or pretty (`TA4E47-MGAO57-...`) address
    pub fn from_raw(raw: &str) -> ProfileResult<Self> {
        let plain: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_uppercase();

        if plain.len() != ENCODED_ADDRESS_LEN {
            return Err(invalid_address(raw, "wrong length"));
        }

        let bytes = data_encoding::BASE32_NOPAD
            .decode(plain.as_bytes())
            .map_err(|_| invalid_address(raw, "not base32"))?;

        let network_type = NetworkType::from_byte(bytes[0])
            .map_err(|_| invalid_address(raw, "unknown network"))?;

        let checksum = Sha3_256::digest(&bytes[..21]);
        if !bool::from(checksum[..CHECKSUM_LEN].ct_eq(&bytes[21..])) {
            return Err(invalid_address(raw, "checksum mismatch"));
        }

        Ok(Self {
            address: plain,
            network_type,
        })
    }

    pub fn plain(&self) -> &str {
        &self.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// Dash separated groups of six characters
    pub fn pretty(&self) -> String {
        self.address
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Constant-time comparison of the encoded form
    pub fn matches(&self, other: &Address) -> bool {
        self.network_type == other.network_type
            && bool::from(self.address.as_bytes().ct_eq(other.address.as_bytes()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

fn invalid_address(raw: &str, reason: &str) -> ProfileError {
    ProfileError::new(
        ErrorCode::InvalidAddress,
        format!("Invalid address '{}': {}", raw, reason),
    )
}
