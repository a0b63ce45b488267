//! Key Derivation
//!
//! Derives a Symbol account from a mnemonic and a profile path number.
//!
//! SECURITY: All private key material is zeroized when no longer needed.

use zeroize::Zeroizing;

use crate::account::{Account, KeyPair};
use crate::error::ProfileResult;
use crate::types::NetworkType;

use super::derivation_path::DerivationPath;
use super::hd::{seed_from_mnemonic, ExtendedKey};

/// Derive the private key (hex) at `m/44'/4343'/{path_number}'/0'/0'`
pub fn private_key_from_mnemonic(
    mnemonic: &str,
    path_number: u32,
) -> ProfileResult<Zeroizing<String>> {
    let seed = seed_from_mnemonic(mnemonic)?;
    let master = ExtendedKey::from_seed(seed.as_ref())?;
    let child = master.derive_path(&DerivationPath::for_path_number(path_number))?;

    Ok(Zeroizing::new(hex::encode_upper(&child.private_key()[..])))
}

/// Derive the account at `m/44'/4343'/{path_number}'/0'/0'` on `network`
pub fn account_from_mnemonic(
    mnemonic: &str,
    path_number: u32,
    network: NetworkType,
) -> ProfileResult<Account> {
    let seed = seed_from_mnemonic(mnemonic)?;
    let master = ExtendedKey::from_seed(seed.as_ref())?;
    let child = master.derive_path(&DerivationPath::for_path_number(path_number))?;

    let key_pair = KeyPair::from_private_key(*child.private_key());
    Ok(Account::from_key_pair(&key_pair, network))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const MNEMONIC: &str = "uniform promote eyebrow frequent mother order evolve spell elite lady clarify accuse annual tenant rotate walnut wisdom render before million scrub scan crush sense";

    #[test]
    fn test_known_testnet_address() {
        let account = account_from_mnemonic(MNEMONIC, 0, NetworkType::TestNet).unwrap();
        assert_eq!(account.address.plain(), "TA4E47MGAO57ZJFORKCFSPADBMWHLX7UKMZJKAOD");
    }

    #[test]
    fn test_known_private_key() {
        let private_key = private_key_from_mnemonic(MNEMONIC, 0).unwrap();
        assert_eq!(
            private_key.as_str(),
            "A58BD9618B47F5E6B6BACB9B37CC242EDE1A0461AAE8FF2084BC825209D90E18"
        );
    }

    #[test]
    fn test_private_key_matches_account() {
        let private_key = private_key_from_mnemonic(MNEMONIC, 2).unwrap();
        let account = account_from_mnemonic(MNEMONIC, 2, NetworkType::TestNet).unwrap();
        assert_eq!(private_key.as_str(), account.private_key.as_str());
    }

    #[test]
    fn test_path_numbers_give_distinct_accounts() {
        let a = account_from_mnemonic(MNEMONIC, 0, NetworkType::TestNet).unwrap();
        let b = account_from_mnemonic(MNEMONIC, 1, NetworkType::TestNet).unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_invalid_mnemonic() {
        let err = account_from_mnemonic("not a valid mnemonic", 0, NetworkType::TestNet).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
    }
}
