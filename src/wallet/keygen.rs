//! Mnemonic Generation
//!
//! Creates and validates the passphrases HD profiles are built from.
//!
//! SECURITY: Entropy is zeroized on drop.

use bip39::Mnemonic;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{ProfileError, ProfileResult};

use super::hd::parse_mnemonic;

/// Create a new random 24-word mnemonic
pub fn generate_mnemonic() -> ProfileResult<Zeroizing<String>> {
    // 256 bits = 24 words
    let mut entropy = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(entropy.as_mut());

    let mnemonic = Mnemonic::from_entropy(entropy.as_ref())
        .map_err(|e| ProfileError::crypto_error(format!("Failed to create mnemonic: {}", e)))?;

    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Validate a mnemonic phrase (word list and checksum)
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    parse_mnemonic(mnemonic).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic().unwrap();
        assert_eq!(mnemonic.split_whitespace().count(), 24);
        assert!(validate_mnemonic(&mnemonic));
    }

    #[test]
    fn test_generated_mnemonics_differ() {
        assert_ne!(*generate_mnemonic().unwrap(), *generate_mnemonic().unwrap());
    }

    #[test]
    fn test_validate_mnemonic() {
        assert!(validate_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        ));
        assert!(!validate_mnemonic("abandon abandon abandon"));
        assert!(!validate_mnemonic(""));
    }
}
