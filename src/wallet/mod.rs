//! Wallet Module
//!
//! HD derivation for profiles: mnemonic handling, BIP-32 extended keys,
//! and the fixed `m/44'/4343'/{n}'/0'/0'` path template.

mod derivation;
mod derivation_path;
pub mod hd;
mod keygen;

pub use derivation::*;
pub use derivation_path::*;
pub use keygen::*;
