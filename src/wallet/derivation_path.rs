//! Key Derivation Paths
//!
//! Profiles derive their key at `m/44'/4343'/{n}'/0'/0'`: BIP-44 purpose,
//! SLIP-0044 coin type 4343 (Symbol), with the account level selected by
//! the user. Every level of the template is hardened.

use crate::error::{ProfileError, ProfileResult};

/// BIP-44 purpose
pub const PURPOSE: u32 = 44;

/// SLIP-0044 coin type for Symbol
pub const SYMBOL_COIN_TYPE: u32 = 4343;

/// Highest path number offered to users (ten child accounts, 0-based)
pub const MAX_PATH_NUMBER: u32 = 9;

/// Hardened offset for BIP-32 derivation
pub const HARDENED: u32 = 0x80000000;

/// Parsed derivation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    pub components: Vec<DerivationComponent>,
}

/// Single component of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationComponent {
    pub index: u32,
    pub hardened: bool,
}

impl DerivationComponent {
    pub fn new(index: u32, hardened: bool) -> Self {
        Self { index, hardened }
    }

    pub fn hardened(index: u32) -> Self {
        Self::new(index, true)
    }

    /// Get the full index including hardened bit
    pub fn full_index(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED
        } else {
            self.index
        }
    }
}

impl std::fmt::Display for DerivationComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m")?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl DerivationPath {
    /// The profile path for child account `path_number`
    pub fn for_path_number(path_number: u32) -> Self {
        Self {
            components: vec![
                DerivationComponent::hardened(PURPOSE),
                DerivationComponent::hardened(SYMBOL_COIN_TYPE),
                DerivationComponent::hardened(path_number),
                DerivationComponent::hardened(0),
                DerivationComponent::hardened(0),
            ],
        }
    }

    /// Parse a generic `m/...` path string
    pub fn parse(path: &str) -> ProfileResult<Self> {
        parse_path(path).map_err(|reason| ProfileError::invalid_path(path).with_details(reason))
    }

    /// The account level of a profile-template path
    fn template_path_number(&self) -> Option<u32> {
        match self.components.as_slice() {
            [purpose, coin, account, change, index]
                if *purpose == DerivationComponent::hardened(PURPOSE)
                    && *coin == DerivationComponent::hardened(SYMBOL_COIN_TYPE)
                    && account.hardened
                    && *change == DerivationComponent::hardened(0)
                    && *index == DerivationComponent::hardened(0) =>
            {
                Some(account.index)
            }
            _ => None,
        }
    }
}

/// Build the profile derivation path for a path number
pub fn path_from_index(path_number: u32) -> String {
    DerivationPath::for_path_number(path_number).to_string()
}

/// Recover the path number from a profile derivation path
///
/// Only the exact template shape is accepted, so the result always
/// rebuilds the input byte for byte.
pub fn index_from_path(path: &str) -> ProfileResult<u32> {
    let parsed = DerivationPath::parse(path)?;
    let path_number = parsed.template_path_number().ok_or_else(|| {
        ProfileError::invalid_path(path).with_details("expected m/44'/4343'/{n}'/0'/0'")
    })?;

    if path_from_index(path_number) != path {
        return Err(ProfileError::invalid_path(path).with_details("path is not in canonical form"));
    }

    Ok(path_number)
}

/// Parse a derivation path string
fn parse_path(path: &str) -> Result<DerivationPath, String> {
    let path_part = path
        .strip_prefix("m/")
        .ok_or_else(|| "Derivation path must start with 'm/'".to_string())?;

    if path_part.is_empty() {
        return Err("Empty derivation path".to_string());
    }

    let components = path_part
        .split('/')
        .map(parse_component)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DerivationPath { components })
}

/// Parse a single path component
fn parse_component(s: &str) -> Result<DerivationComponent, String> {
    if s.is_empty() {
        return Err("Empty path component".to_string());
    }

    let (number_str, hardened) = match s.strip_suffix('\'') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if number_str.is_empty() || !number_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid path component '{}'", s));
    }

    let index: u32 = number_str
        .parse()
        .map_err(|e| format!("Invalid path component '{}': {}", s, e))?;

    // Check for overflow (excluding hardened bit)
    if index >= HARDENED {
        return Err(format!("Path component {} exceeds maximum value", index));
    }

    Ok(DerivationComponent::new(index, hardened))
}
