//! Shared types for the profile core
//!
//! Data structures that cross module boundaries are defined here
//! for consistent serialization.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ErrorCode, ProfileError, ProfileResult};

// =============================================================================
// Network Types
// =============================================================================

/// Symbol network identifiers. The discriminant is the address prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    MainNet,
    TestNet,
    Mijin,
    MijinTest,
}

impl NetworkType {
    pub fn as_byte(&self) -> u8 {
        match self {
            NetworkType::MainNet => 104,
            NetworkType::TestNet => 152,
            NetworkType::Mijin => 96,
            NetworkType::MijinTest => 144,
        }
    }

    pub fn from_byte(byte: u8) -> ProfileResult<Self> {
        match byte {
            104 => Ok(NetworkType::MainNet),
            152 => Ok(NetworkType::TestNet),
            96 => Ok(NetworkType::Mijin),
            144 => Ok(NetworkType::MijinTest),
            other => Err(ProfileError::invalid_input(format!(
                "Unknown network type: {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "MAIN_NET",
            NetworkType::TestNet => "TEST_NET",
            NetworkType::Mijin => "MIJIN",
            NetworkType::MijinTest => "MIJIN_TEST",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Stored as the raw byte, matching the wallet blob format.
impl Serialize for NetworkType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_byte())
    }
}

impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let byte = u8::deserialize(deserializer)?;
        NetworkType::from_byte(byte).map_err(|e| serde::de::Error::custom(e.message))
    }
}

/// Network currency mosaic description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCurrency {
    pub namespace_id: String,
    pub divisibility: u8,
}

impl NetworkCurrency {
    pub fn new(namespace_id: impl Into<String>, divisibility: u8) -> Self {
        Self {
            namespace_id: namespace_id.into(),
            divisibility,
        }
    }
}

impl Default for NetworkCurrency {
    /// Currency assumed for records written before it was stored.
    fn default() -> Self {
        Self::new("symbol.xym", 6)
    }
}

// =============================================================================
// Profile Types
// =============================================================================

/// How the profile's key was imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileType {
    PrivateKey,
    #[serde(rename = "HD")]
    Hd,
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileType::PrivateKey => f.write_str("PrivateKey"),
            ProfileType::Hd => f.write_str("HD"),
        }
    }
}

// =============================================================================
// Password
// =============================================================================

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A profile password. The value is zeroized on drop and never printed.
pub struct Password(SecretString);

impl Password {
    pub fn new(value: impl Into<String>) -> ProfileResult<Self> {
        let value: String = value.into();
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ProfileError::new(
                ErrorCode::InvalidInput,
                format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }
        Ok(Self(SecretString::from(value)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for Password {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.expose().to_string()))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
