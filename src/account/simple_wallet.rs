//! Password-protected single-key wallet
//!
//! The serialized form is the `simpleWallet` object stored in each profile
//! record. The private key never leaves this struct unencrypted; `open`
//! is the only way back to an [`Account`].

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ProfileError, ProfileResult};
use crate::types::{NetworkType, Password};
use crate::utils::encryption;

use super::{Account, Address, KeyPair};

/// Wallet schema tag written into every blob
pub const SIMPLE_WALLET_SCHEMA: &str = "simple_v1";

/// Encrypted private key and its nonce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPrivateKey {
    pub encrypted_key: String,
    pub iv: String,
}

/// An encrypted key pair plus its public address and network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleWallet {
    pub name: String,
    pub network: NetworkType,
    pub address: Address,
    pub creation_date: String,
    pub schema: String,
    pub encrypted_private_key: EncryptedPrivateKey,
}

impl SimpleWallet {
    /// Encrypt `private_key` (hex) under `password`
    pub fn create_from_private_key(
        name: &str,
        password: &Password,
        private_key: &str,
        network: NetworkType,
    ) -> ProfileResult<Self> {
        let key_pair = KeyPair::from_private_key_hex(private_key)?;
        let address = Address::from_public_key(key_pair.public_key(), network);

        let encrypted_key = encryption::encrypt(key_pair.private_key_hex().as_str(), password)?;
        let iv = encryption::nonce_hex(&encrypted_key)?;

        Ok(Self {
            name: name.to_string(),
            network,
            address,
            creation_date: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            schema: SIMPLE_WALLET_SCHEMA.to_string(),
            encrypted_private_key: EncryptedPrivateKey { encrypted_key, iv },
        })
    }

    /// Decrypt the wallet
    ///
    /// Fails with `InvalidPassword` unless the password opens the blob to
    /// a key for the stored address; `details` tells which check failed.
    pub fn open(&self, password: &Password) -> ProfileResult<Account> {
        let private_key = encryption::decrypt(&self.encrypted_private_key.encrypted_key, password)
            .map_err(|e| match e.code {
                ErrorCode::DecryptionError => ProfileError::invalid_password(),
                _ => e,
            })?;
        let private_key = zeroize::Zeroizing::new(private_key);

        let key_pair = KeyPair::from_private_key_hex(&private_key)
            .map_err(|e| ProfileError::invalid_password().with_details(e.to_string()))?;
        let account = Account::from_key_pair(&key_pair, self.network);

        if !account.address.matches(&self.address) {
            return Err(ProfileError::invalid_password()
                .with_details("Decrypted key does not match the wallet address"));
        }

        Ok(account)
    }
}
