//! Symbol Profile Core
//!
//! Local, password protected profiles for Symbol accounts, persisted in a
//! single JSON document (`~/.symbolrc.json` by default).
//!
//! # Architecture
//!
//! This crate provides:
//! - **account**: Symbol key pairs, addresses and the encrypted `SimpleWallet`
//! - **wallet**: Mnemonics, BIP-32 derivation and the `m/44'/4343'/{n}'/0'/0'` path
//! - **profile**: The profile entity, its stored record and schema migrations
//! - **repository**: Document persistence with atomic writes
//! - **service**: Default-profile handling for a command layer
//! - **utils**: Secret encryption, logging and configuration
//!
//! # Security
//!
//! This crate uses `zeroize` to securely clear sensitive data from memory.
//! Private keys, seeds and mnemonics are zeroed when dropped, and the
//! logger redacts them by field name.
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_core::*;
//!
//! let service = ProfileService::from_config(&ProfileStoreConfig::from_env()?);
//! let profile = service.find_profile_named(None)?;
//! let account = profile.decrypt(&Password::new("password")?)?;
//! println!("{}", account.address.pretty());
//! ```

pub mod account;
pub mod error;
pub mod profile;
pub mod repository;
pub mod service;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export key types for convenience
pub use account::{Account, Address, SimpleWallet};
pub use error::{ErrorCode, ProfileError, ProfileResult};
pub use profile::{
    MnemonicProfileArgs, PrivateKeyProfileArgs, Profile, ProfileCreation, ProfileRecord,
    ProfileSettings, CURRENT_PROFILE_VERSION,
};
pub use repository::ProfileRepository;
pub use service::ProfileService;
pub use types::*;
pub use utils::ProfileStoreConfig;
