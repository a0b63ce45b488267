//! Profile schema migrations
//!
//! Older documents are upgraded record by record:
//! - v1: no `version` (or `0`/`1`), no `networkCurrency`, no `type`
//! - v2: `version: 2` and `networkCurrency`, still no `type`
//! - v3: `type`, plus `encryptedPassphrase`/`path` for HD profiles
//!
//! Each step is a pure conversion between typed shapes, so running the
//! chain on a current record leaves it untouched. A v3 record with gaps
//! (no `networkCurrency`, `type` or `default`) is filled with the same
//! defaults as the older shapes and reported as upgraded. HD fields found
//! on any shape are carried forward; `Profile::from_record` checks that
//! they agree with the profile type.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::account::SimpleWallet;
use crate::error::{ProfileError, ProfileResult};
use crate::types::{NetworkCurrency, ProfileType};

use super::record::{DefaultFlag, ProfileDocument, ProfileRecord, CURRENT_PROFILE_VERSION};

/// Type and HD fields, optional on every stored shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredKind {
    #[serde(default, rename = "type")]
    profile_type: Option<ProfileType>,
    #[serde(default)]
    encrypted_passphrase: Option<String>,
    #[serde(default)]
    path: Option<String>,
}

impl StoredKind {
    /// The stored type, or HD when HD fields are present without one
    fn resolved_type(&self) -> ProfileType {
        match self.profile_type {
            Some(profile_type) => profile_type,
            None if self.encrypted_passphrase.is_some() || self.path.is_some() => ProfileType::Hd,
            None => ProfileType::PrivateKey,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordV1 {
    simple_wallet: SimpleWallet,
    url: String,
    network_generation_hash: String,
    #[serde(default)]
    default: Option<DefaultFlag>,
    #[serde(flatten)]
    kind: StoredKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordV2 {
    simple_wallet: SimpleWallet,
    url: String,
    network_generation_hash: String,
    #[serde(default)]
    network_currency: NetworkCurrency,
    #[serde(default)]
    default: Option<DefaultFlag>,
    #[serde(flatten)]
    kind: StoredKind,
}

/// The v3 shape as found on disk, gaps allowed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordV3 {
    simple_wallet: SimpleWallet,
    url: String,
    network_generation_hash: String,
    #[serde(default)]
    network_currency: Option<NetworkCurrency>,
    #[serde(default)]
    default: Option<DefaultFlag>,
    #[serde(flatten)]
    kind: StoredKind,
}

impl RecordV3 {
    fn is_complete(&self) -> bool {
        self.network_currency.is_some() && self.default.is_some() && self.kind.profile_type.is_some()
    }
}

impl From<RecordV1> for RecordV2 {
    fn from(v1: RecordV1) -> Self {
        Self {
            simple_wallet: v1.simple_wallet,
            url: v1.url,
            network_generation_hash: v1.network_generation_hash,
            network_currency: NetworkCurrency::default(),
            default: v1.default,
            kind: v1.kind,
        }
    }
}

impl From<RecordV2> for RecordV3 {
    fn from(v2: RecordV2) -> Self {
        Self {
            simple_wallet: v2.simple_wallet,
            url: v2.url,
            network_generation_hash: v2.network_generation_hash,
            network_currency: Some(v2.network_currency),
            default: v2.default,
            kind: v2.kind,
        }
    }
}

impl From<RecordV3> for ProfileRecord {
    fn from(v3: RecordV3) -> Self {
        let profile_type = v3.kind.resolved_type();
        Self {
            simple_wallet: v3.simple_wallet,
            url: v3.url,
            network_generation_hash: v3.network_generation_hash,
            network_currency: v3.network_currency.unwrap_or_default(),
            version: CURRENT_PROFILE_VERSION,
            default: v3.default.unwrap_or_default(),
            profile_type,
            encrypted_passphrase: v3.kind.encrypted_passphrase,
            path: v3.kind.path,
        }
    }
}

/// A record brought to the current schema
#[derive(Debug, Clone)]
pub struct MigratedRecord {
    pub record: ProfileRecord,
    /// Schema version the record was stored with
    pub from_version: u32,
    upgraded: bool,
}

impl MigratedRecord {
    /// Whether the stored form differs from `record` and should be rewritten
    pub fn was_upgraded(&self) -> bool {
        self.upgraded
    }
}

/// A whole document brought to the current schema
#[derive(Debug, Clone, Default)]
pub struct MigratedDocument {
    pub document: ProfileDocument,
    /// Names of the records that were upgraded
    pub upgraded: Vec<String>,
}

impl MigratedDocument {
    pub fn changed(&self) -> bool {
        !self.upgraded.is_empty()
    }
}

/// Schema version of a raw record. A missing `version` means v1; `0`
/// is read as v1 by `migrate_record`.
pub fn record_version(name: &str, value: &Value) -> ProfileResult<u32> {
    let object = value.as_object().ok_or_else(|| {
        ProfileError::persistence(format!("Profile {} is not a JSON object", name))
    })?;

    match object.get("version") {
        None | Some(Value::Null) => Ok(1),
        Some(version) => version
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                ProfileError::persistence(format!(
                    "Profile {} has an invalid version: {}",
                    name, version
                ))
            }),
    }
}

/// Upgrade one raw record to the current schema
pub fn migrate_record(name: &str, value: Value) -> ProfileResult<MigratedRecord> {
    let from_version = record_version(name, &value)?;

    let stored = match from_version {
        0 | 1 => RecordV3::from(RecordV2::from(parse::<RecordV1>(name, value)?)),
        2 => RecordV3::from(parse::<RecordV2>(name, value)?),
        CURRENT_PROFILE_VERSION => parse::<RecordV3>(name, value)?,
        other => {
            return Err(ProfileError::persistence(format!(
                "Profile {} has unsupported version {} (current is {})",
                name, other, CURRENT_PROFILE_VERSION
            )))
        }
    };

    let upgraded = from_version < CURRENT_PROFILE_VERSION || !stored.is_complete();
    Ok(MigratedRecord {
        record: ProfileRecord::from(stored),
        from_version,
        upgraded,
    })
}

/// Upgrade every record of a raw document
pub fn migrate_document(raw: BTreeMap<String, Value>) -> ProfileResult<MigratedDocument> {
    let mut migrated = MigratedDocument::default();

    for (name, value) in raw {
        let record = migrate_record(&name, value)?;
        if record.was_upgraded() {
            migrated.upgraded.push(name.clone());
        }
        migrated.document.insert(name, record.record);
    }

    Ok(migrated)
}

fn parse<T: for<'de> Deserialize<'de>>(name: &str, value: Value) -> ProfileResult<T> {
    serde_json::from_value(value).map_err(|e| {
        ProfileError::persistence(format!("Profile {} cannot be migrated", name))
            .with_details(e.to_string())
    })
}
