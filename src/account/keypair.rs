//! Symbol key pairs
//!
//! Ed25519 keys (RFC 8032). The address hashing lives in `address.rs`.

use ed25519_dalek::SigningKey;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::ProfileError;

/// Key material errors
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Private key must be 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Private key is not valid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid derivation index: {0}")]
    InvalidIndex(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),
}

impl From<KeyError> for ProfileError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::InvalidLength(_) | KeyError::InvalidHex(_) => {
                ProfileError::invalid_private_key(e.to_string())
            }
            _ => ProfileError::crypto_error(e.to_string()),
        }
    }
}

/// A Symbol key pair
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    private_key: [u8; 32],
    #[zeroize(skip)]
    public_key: [u8; 32],
}

impl KeyPair {
    pub fn from_private_key(private_key: [u8; 32]) -> Self {
        let public_key = public_key_from_private(&private_key);
        Self {
            private_key,
            public_key,
        }
    }

    /// Parse a 64 character hex private key (either case)
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(
            hex::decode(private_key.trim()).map_err(|e| KeyError::InvalidHex(e.to_string()))?,
        );
        if bytes.len() != 32 {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        let pair = Self::from_private_key(key);
        key.zeroize();
        Ok(pair)
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode_upper(self.private_key))
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key)
    }
}

/// Derive the Symbol public key from a private key
pub fn public_key_from_private(private_key: &[u8; 32]) -> [u8; 32] {
    SigningKey::from_bytes(private_key).verifying_key().to_bytes()
}
