//! Profile Module
//!
//! A profile pairs an encrypted Symbol account with the network it talks to.
//! Profiles are created once, from a private key or from a mnemonic and a
//! path number, and afterwards only their default flag changes.
//!
//! HD profiles also keep the mnemonic, encrypted under the profile password,
//! together with the derivation path it was opened at.

mod creation;
pub mod migration;
mod record;

pub use creation::*;
pub use record::*;

use std::fmt;
use zeroize::Zeroizing;

use crate::account::{Account, Address, SimpleWallet};
use crate::error::{ErrorCode, ProfileError, ProfileResult};
use crate::types::{NetworkCurrency, NetworkType, Password, ProfileType};
use crate::utils::encryption;
use crate::wallet::{self, MAX_PATH_NUMBER};

/// Mnemonic material of an HD profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdSecret {
    /// Mnemonic encrypted with the profile password
    pub encrypted_passphrase: String,
    /// `m/44'/4343'/{n}'/0'/0'`
    pub path: String,
}

/// How the profile key was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileKind {
    PrivateKey,
    Hd(HdSecret),
}

impl ProfileKind {
    pub fn profile_type(&self) -> ProfileType {
        match self {
            ProfileKind::PrivateKey => ProfileType::PrivateKey,
            ProfileKind::Hd(_) => ProfileType::Hd,
        }
    }
}

/// Everything an opened profile reveals
pub struct ProfileCredentials {
    pub account: Account,
    pub mnemonic: Option<Zeroizing<String>>,
    pub path_number: Option<u32>,
}

impl fmt::Debug for ProfileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileCredentials")
            .field("account", &self.account)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "[REDACTED]"))
            .field("path_number", &self.path_number)
            .finish()
    }
}

/// A named, password protected account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    simple_wallet: SimpleWallet,
    url: String,
    network_generation_hash: String,
    network_currency: NetworkCurrency,
    version: u32,
    kind: ProfileKind,
    is_default: bool,
}

impl Profile {
    /// Build a new profile
    pub fn create(creation: ProfileCreation) -> ProfileResult<Self> {
        let settings = creation.settings();
        if settings.name.trim().is_empty() {
            return Err(ProfileError::invalid_input("Profile name cannot be empty"));
        }

        let profile = match creation {
            ProfileCreation::PrivateKey(args) => {
                let simple_wallet = SimpleWallet::create_from_private_key(
                    &args.settings.name,
                    &args.settings.password,
                    &args.private_key,
                    args.settings.network_type,
                )?;
                Self::assemble(simple_wallet, args.settings, ProfileKind::PrivateKey)
            }
            ProfileCreation::Mnemonic(args) => {
                if args.path_number > MAX_PATH_NUMBER {
                    return Err(ProfileError::invalid_path(&wallet::path_from_index(
                        args.path_number,
                    ))
                    .with_details(format!("path number must be between 0 and {}", MAX_PATH_NUMBER)));
                }

                let private_key =
                    wallet::private_key_from_mnemonic(&args.mnemonic, args.path_number)?;
                let simple_wallet = SimpleWallet::create_from_private_key(
                    &args.settings.name,
                    &args.settings.password,
                    &private_key,
                    args.settings.network_type,
                )?;
                let secret = HdSecret {
                    encrypted_passphrase: encryption::encrypt(&args.mnemonic, &args.settings.password)?,
                    path: wallet::path_from_index(args.path_number),
                };
                Self::assemble(simple_wallet, args.settings, ProfileKind::Hd(secret))
            }
        };

        crate::log_info!(
            "profile",
            "Profile created",
            profile = profile.name(),
            profile_type = profile.profile_type(),
            network = profile.network_type(),
            address = profile.address(),
        );

        Ok(profile)
    }

    pub fn create_from_private_key(args: PrivateKeyProfileArgs) -> ProfileResult<Self> {
        Self::create(ProfileCreation::PrivateKey(args))
    }

    pub fn create_from_mnemonic(args: MnemonicProfileArgs) -> ProfileResult<Self> {
        Self::create(ProfileCreation::Mnemonic(args))
    }

    /// Rebuild a profile from its stored record. No cryptography happens here.
    pub fn from_record(name: &str, record: ProfileRecord) -> ProfileResult<Self> {
        if record.simple_wallet.name != name {
            return Err(ProfileError::persistence(format!(
                "Profile {} holds a wallet named {}",
                name, record.simple_wallet.name
            )));
        }

        let kind = match (
            record.profile_type,
            record.encrypted_passphrase,
            record.path,
        ) {
            (ProfileType::PrivateKey, None, None) => ProfileKind::PrivateKey,
            (ProfileType::Hd, Some(encrypted_passphrase), Some(path)) => {
                wallet::index_from_path(&path).map_err(|e| {
                    ProfileError::persistence(format!("Profile {} has an invalid path", name))
                        .with_details(e.message)
                })?;
                ProfileKind::Hd(HdSecret {
                    encrypted_passphrase,
                    path,
                })
            }
            (profile_type, _, _) => {
                return Err(ProfileError::persistence(format!(
                    "Profile {} of type {} has inconsistent passphrase and path fields",
                    name, profile_type
                )))
            }
        };

        Ok(Self {
            simple_wallet: record.simple_wallet,
            url: record.url,
            network_generation_hash: record.network_generation_hash,
            network_currency: record.network_currency,
            version: record.version,
            kind,
            is_default: record.default.is_set(),
        })
    }

    pub fn to_record(&self) -> ProfileRecord {
        let (encrypted_passphrase, path) = match &self.kind {
            ProfileKind::PrivateKey => (None, None),
            ProfileKind::Hd(secret) => (
                Some(secret.encrypted_passphrase.clone()),
                Some(secret.path.clone()),
            ),
        };

        ProfileRecord {
            simple_wallet: self.simple_wallet.clone(),
            url: self.url.clone(),
            network_generation_hash: self.network_generation_hash.clone(),
            network_currency: self.network_currency.clone(),
            version: self.version,
            default: self.is_default.into(),
            profile_type: self.kind.profile_type(),
            encrypted_passphrase,
            path,
        }
    }

    /// Open the wallet
    pub fn decrypt(&self, password: &Password) -> ProfileResult<Account> {
        self.simple_wallet.open(password)
    }

    pub fn is_password_valid(&self, password: &Password) -> bool {
        self.decrypt(password).is_ok()
    }

    /// Recover the mnemonic of an HD profile
    pub fn decrypt_passphrase(&self, password: &Password) -> ProfileResult<Zeroizing<String>> {
        let secret = match &self.kind {
            ProfileKind::Hd(secret) => secret,
            ProfileKind::PrivateKey => {
                return Err(ProfileError::invalid_input(format!(
                    "Profile {} was not created from a mnemonic",
                    self.name()
                )))
            }
        };

        encryption::decrypt(&secret.encrypted_passphrase, password)
            .map(Zeroizing::new)
            .map_err(|e| match e.code {
                ErrorCode::DecryptionError => ProfileError::invalid_password(),
                _ => e,
            })
    }

    /// Account plus, for HD profiles, the mnemonic and path number
    pub fn credentials(&self, password: &Password) -> ProfileResult<ProfileCredentials> {
        let account = self.decrypt(password)?;
        let mnemonic = match self.kind {
            ProfileKind::Hd(_) => Some(self.decrypt_passphrase(password)?),
            ProfileKind::PrivateKey => None,
        };

        Ok(ProfileCredentials {
            account,
            mnemonic,
            path_number: self.path_number(),
        })
    }

    /// Account index of an HD profile
    pub fn path_number(&self) -> Option<u32> {
        match &self.kind {
            ProfileKind::Hd(secret) => wallet::index_from_path(&secret.path).ok(),
            ProfileKind::PrivateKey => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.simple_wallet.name
    }

    pub fn address(&self) -> &Address {
        &self.simple_wallet.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.simple_wallet.network
    }

    pub fn simple_wallet(&self) -> &SimpleWallet {
        &self.simple_wallet
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn network_generation_hash(&self) -> &str {
        &self.network_generation_hash
    }

    pub fn network_currency(&self) -> &NetworkCurrency {
        &self.network_currency
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn kind(&self) -> &ProfileKind {
        &self.kind
    }

    pub fn profile_type(&self) -> ProfileType {
        self.kind.profile_type()
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn encrypted_passphrase(&self) -> Option<&str> {
        match &self.kind {
            ProfileKind::Hd(secret) => Some(&secret.encrypted_passphrase),
            ProfileKind::PrivateKey => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            ProfileKind::Hd(secret) => Some(&secret.path),
            ProfileKind::PrivateKey => None,
        }
    }

    fn assemble(simple_wallet: SimpleWallet, settings: ProfileSettings, kind: ProfileKind) -> Self {
        Self {
            simple_wallet,
            url: settings.url,
            network_generation_hash: settings.generation_hash,
            network_currency: settings.network_currency,
            version: CURRENT_PROFILE_VERSION,
            kind,
            is_default: settings.is_default,
        }
    }
}

/// Property/value summary
impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows = vec![
            ("Name", self.name().to_string()),
            ("Address", self.address().pretty()),
            ("Network", self.network_type().to_string()),
            ("Node URL", self.url.clone()),
            ("Generation Hash", self.network_generation_hash.clone()),
            (
                "Network Currency",
                format!(
                    "name: {}, divisibility: {}",
                    self.network_currency.namespace_id, self.network_currency.divisibility
                ),
            ),
            ("Profile type", self.profile_type().to_string()),
        ];

        if let (Some(path), Some(path_number)) = (self.path(), self.path_number()) {
            rows.push(("Path", format!("Path n. {} ({})", path_number + 1, path)));
        }

        for (property, value) in rows {
            writeln!(f, "{:<18}{}", property, value)?;
        }
        Ok(())
    }
}
