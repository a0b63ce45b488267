//! Account Module
//!
//! Symbol account primitives used by profiles: key pairs, addresses and
//! the password-protected `SimpleWallet` blob.

mod address;
mod keypair;
mod simple_wallet;

pub use address::*;
pub use keypair::*;
pub use simple_wallet::*;

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::ProfileResult;
use crate::types::NetworkType;

/// An opened account: address plus hex keys
///
/// SECURITY: the private key is zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Account {
    #[zeroize(skip)]
    pub address: Address,
    #[zeroize(skip)]
    pub public_key: String,
    pub private_key: Zeroizing<String>,
}

impl Account {
    pub fn from_key_pair(key_pair: &KeyPair, network: NetworkType) -> Self {
        Self {
            address: Address::from_public_key(key_pair.public_key(), network),
            public_key: key_pair.public_key_hex(),
            private_key: key_pair.private_key_hex(),
        }
    }

    pub fn from_private_key(private_key: &str, network: NetworkType) -> ProfileResult<Self> {
        let key_pair = KeyPair::from_private_key_hex(private_key)?;
        Ok(Self::from_key_pair(&key_pair, network))
    }

    /// Generate a fresh random account
    pub fn generate(network: NetworkType) -> Self {
        use rand::RngCore;

        let mut secret = Zeroizing::new([0u8; 32]);
        rand::rngs::OsRng.fill_bytes(secret.as_mut());
        Self::from_key_pair(&KeyPair::from_private_key(*secret), network)
    }

    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
