//! HD wallet primitives
//!
//! BIP-39 mnemonic to seed, and BIP-32 extended keys. Profile keys come from
//! the secp256k1 BIP-32 tree (`"Bitcoin seed"` master key, child keys added
//! modulo the curve order); the 32 byte child secret is then used as an
//! Ed25519 private key.
//!
//! SECURITY: seeds and derived secrets are zeroized on drop.

use bip39::Mnemonic;
use bitcoin::bip32::{ChildNumber, Xpriv};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::Network;
use zeroize::Zeroizing;

use crate::account::KeyError;
use crate::error::{ProfileError, ProfileResult};

use super::derivation_path::DerivationPath;

/// Parse and validate a mnemonic (word list and checksum)
pub fn parse_mnemonic(mnemonic: &str) -> ProfileResult<Mnemonic> {
    let normalized = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");
    Mnemonic::parse(normalized.as_str())
        .map_err(|e| ProfileError::invalid_mnemonic(format!("Invalid mnemonic: {}", e)))
}

/// BIP-39 seed with an empty passphrase
pub fn seed_from_mnemonic(mnemonic: &str) -> ProfileResult<Zeroizing<[u8; 64]>> {
    let mnemonic = parse_mnemonic(mnemonic)?;
    Ok(Zeroizing::new(mnemonic.to_seed("")))
}

/// A BIP-32 extended private key
pub struct ExtendedKey {
    xpriv: Xpriv,
}

impl ExtendedKey {
    /// Master key from a BIP-39 seed
    pub fn from_seed(seed: &[u8]) -> Result<Self, KeyError> {
        let xpriv = Xpriv::new_master(Network::Bitcoin, seed)
            .map_err(|e| KeyError::Derivation(format!("Failed to create master key: {}", e)))?;
        Ok(Self { xpriv })
    }

    /// Walk every level of `path`
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, KeyError> {
        let children = path
            .components
            .iter()
            .map(|component| {
                let child = if component.hardened {
                    ChildNumber::from_hardened_idx(component.index)
                } else {
                    ChildNumber::from_normal_idx(component.index)
                };
                child.map_err(|e| KeyError::InvalidIndex(format!("{}: {}", component, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let secp = Secp256k1::new();
        let xpriv = self
            .xpriv
            .derive_priv(&secp, &children)
            .map_err(|e| KeyError::Derivation(format!("Failed to derive key: {}", e)))?;
        Ok(Self { xpriv })
    }

    /// The 32 byte secret at this node
    pub fn private_key(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.xpriv.private_key.secret_bytes())
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.xpriv.private_key.non_secure_erase();
    }
}
