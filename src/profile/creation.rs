//! Profile creation arguments

use zeroize::Zeroizing;

use crate::types::{NetworkCurrency, NetworkType, Password};

/// Settings shared by every kind of profile
#[derive(Debug, Clone)]
pub struct ProfileSettings {
    pub name: String,
    pub password: Password,
    pub network_type: NetworkType,
    pub url: String,
    pub generation_hash: String,
    pub network_currency: NetworkCurrency,
    pub is_default: bool,
}

/// Import an existing private key
#[derive(Clone)]
pub struct PrivateKeyProfileArgs {
    pub settings: ProfileSettings,
    /// Hex encoded, 64 characters
    pub private_key: Zeroizing<String>,
}

/// Derive the key from a mnemonic at `m/44'/4343'/{path_number}'/0'/0'`
#[derive(Clone)]
pub struct MnemonicProfileArgs {
    pub settings: ProfileSettings,
    pub mnemonic: Zeroizing<String>,
    /// Between 0 and 9
    pub path_number: u32,
}

/// Input for [`super::Profile::create`]
#[derive(Clone)]
pub enum ProfileCreation {
    PrivateKey(PrivateKeyProfileArgs),
    Mnemonic(MnemonicProfileArgs),
}

impl ProfileCreation {
    pub fn settings(&self) -> &ProfileSettings {
        match self {
            ProfileCreation::PrivateKey(args) => &args.settings,
            ProfileCreation::Mnemonic(args) => &args.settings,
        }
    }
}

impl From<PrivateKeyProfileArgs> for ProfileCreation {
    fn from(args: PrivateKeyProfileArgs) -> Self {
        ProfileCreation::PrivateKey(args)
    }
}

impl From<MnemonicProfileArgs> for ProfileCreation {
    fn from(args: MnemonicProfileArgs) -> Self {
        ProfileCreation::Mnemonic(args)
    }
}

impl std::fmt::Debug for PrivateKeyProfileArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyProfileArgs")
            .field("settings", &self.settings)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for MnemonicProfileArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MnemonicProfileArgs")
            .field("settings", &self.settings)
            .field("mnemonic", &"[REDACTED]")
            .field("path_number", &self.path_number)
            .finish()
    }
}

impl std::fmt::Debug for ProfileCreation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileCreation::PrivateKey(args) => std::fmt::Debug::fmt(args, f),
            ProfileCreation::Mnemonic(args) => std::fmt::Debug::fmt(args, f),
        }
    }
}
