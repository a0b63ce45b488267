//! On-disk profile record (current schema)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::account::SimpleWallet;
use crate::types::{NetworkCurrency, ProfileType};

/// Schema version written by this crate
pub const CURRENT_PROFILE_VERSION: u32 = 3;

/// Persisted default marker, stored as `"0"` or `"1"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefaultFlag {
    #[default]
    #[serde(rename = "0")]
    Unset,
    #[serde(rename = "1")]
    Set,
}

impl DefaultFlag {
    pub fn is_set(&self) -> bool {
        matches!(self, DefaultFlag::Set)
    }
}

impl From<bool> for DefaultFlag {
    fn from(is_default: bool) -> Self {
        if is_default {
            DefaultFlag::Set
        } else {
            DefaultFlag::Unset
        }
    }
}

/// A profile as stored in the document, at schema version 3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub simple_wallet: SimpleWallet,
    pub url: String,
    pub network_generation_hash: String,
    pub network_currency: NetworkCurrency,
    pub version: u32,
    #[serde(default)]
    pub default: DefaultFlag,
    #[serde(rename = "type")]
    pub profile_type: ProfileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The whole profile file: profile name to record, sorted by name
pub type ProfileDocument = BTreeMap<String, ProfileRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flag_wire_format() {
        assert_eq!(serde_json::to_string(&DefaultFlag::Set).unwrap(), "\"1\"");
        assert_eq!(serde_json::to_string(&DefaultFlag::Unset).unwrap(), "\"0\"");
        let parsed: DefaultFlag = serde_json::from_str("\"1\"").unwrap();
        assert!(parsed.is_set());
        assert!(serde_json::from_str::<DefaultFlag>("\"2\"").is_err());
    }

    #[test]
    fn test_default_flag_from_bool() {
        assert_eq!(DefaultFlag::from(true), DefaultFlag::Set);
        assert_eq!(DefaultFlag::from(false), DefaultFlag::Unset);
        assert_eq!(DefaultFlag::default(), DefaultFlag::Unset);
    }
}
