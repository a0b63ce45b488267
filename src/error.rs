//! Unified error types for the profile core
//!
//! All errors flow through this module so the command layer can match on
//! a stable [`ErrorCode`] instead of parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all profile operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ProfileError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn duplicate_profile(name: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateProfile,
            format!("A profile named {} already exists.", name),
        )
    }

    pub fn profile_not_found(name: &str) -> Self {
        Self::new(
            ErrorCode::ProfileNotFound,
            format!("{} not found", name),
        )
    }

    pub fn no_default_profile() -> Self {
        Self::new(
            ErrorCode::NoDefaultProfile,
            "No default profile found. Use 'profile setdefault' to select one.",
        )
    }

    pub fn invalid_password() -> Self {
        Self::new(
            ErrorCode::InvalidPassword,
            "The password provided does not match your account password",
        )
    }

    pub fn invalid_mnemonic(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMnemonic, msg)
    }

    pub fn invalid_path(path: &str) -> Self {
        Self::new(
            ErrorCode::InvalidPath,
            format!("Invalid derivation path '{}'", path),
        )
    }

    pub fn decryption(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DecryptionError, msg)
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_private_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPrivateKey, msg)
    }

    pub fn crypto_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CryptoError, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProfileError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Repository errors
    DuplicateProfile,
    ProfileNotFound,
    NoDefaultProfile,
    PersistenceError,

    // Secret errors
    InvalidPassword,
    DecryptionError,

    // Input errors
    InvalidInput,
    InvalidMnemonic,
    InvalidPath,
    InvalidPrivateKey,
    InvalidAddress,

    // Crypto errors
    CryptoError,

    // Parse errors
    ParseError,
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;

// Conversions from common error types

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for ProfileError {
    fn from(e: hex::FromHexError) -> Self {
        ProfileError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::new(ErrorCode::PersistenceError, e.to_string())
    }
}

impl From<bip39::Error> for ProfileError {
    fn from(e: bip39::Error) -> Self {
        ProfileError::new(ErrorCode::InvalidMnemonic, format!("BIP39 error: {}", e))
    }
}
