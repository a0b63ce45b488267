//! Profile Repository
//!
//! Persists profiles in a single JSON document keyed by profile name.
//! Every read migrates the stored records to the current schema. Every
//! write replaces the whole document atomically (temp file, fsync, rename).
//!
//! There is no file locking: concurrent writers race and the last one wins.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, ProfileResult};
use crate::profile::migration::{migrate_document, MigratedDocument};
use crate::profile::{DefaultFlag, Profile, ProfileDocument};
use crate::utils::ProfileStoreConfig;

/// File-backed profile store
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    document_path: PathBuf,
}

impl ProfileRepository {
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
        }
    }

    pub fn from_config(config: &ProfileStoreConfig) -> Self {
        Self::new(config.document_path.clone())
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Store a new profile. Names are unique.
    ///
    /// A profile saved as default takes the flag from any previous default.
    pub fn save(&self, profile: Profile) -> ProfileResult<Profile> {
        let mut document = self.load()?.document;

        if document.contains_key(profile.name()) {
            crate::log_warn!("repository", "Duplicate profile name", profile = profile.name());
            return Err(ProfileError::duplicate_profile(profile.name()));
        }

        if profile.is_default() {
            clear_defaults(&mut document);
        }
        document.insert(profile.name().to_string(), profile.to_record());
        self.persist(&document)?;

        crate::log_info!(
            "repository",
            "Profile saved",
            profile = profile.name(),
            profile_type = profile.profile_type(),
            is_default = profile.is_default(),
        );

        Ok(profile)
    }

    /// Look up a profile by name
    pub fn find(&self, name: &str) -> ProfileResult<Profile> {
        let document = self.load_and_write_back_upgrades()?;
        let record = document
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileError::profile_not_found(name))?;
        Profile::from_record(name, record)
    }

    /// Every stored profile, sorted by name
    ///
    /// Once every record has become a valid profile, the migrated document
    /// is written back. Nothing is written when there is no document yet.
    pub fn all(&self) -> ProfileResult<Vec<Profile>> {
        let migrated = self.load()?;

        let profiles = migrated
            .document
            .iter()
            .map(|(name, record)| Profile::from_record(name, record.clone()))
            .collect::<ProfileResult<Vec<_>>>()?;

        if !migrated.document.is_empty() || self.document_path.exists() {
            self.persist(&migrated.document)?;
        }

        crate::log_debug!(
            "repository",
            "Loaded profiles",
            count = profiles.len(),
            upgraded = migrated.upgraded.len(),
        );

        Ok(profiles)
    }

    /// Make `name` the only default profile
    pub fn set_default(&self, name: &str) -> ProfileResult<Profile> {
        let mut document = self.load()?.document;

        if !document.contains_key(name) {
            return Err(ProfileError::profile_not_found(name));
        }

        clear_defaults(&mut document);
        let record = document
            .get_mut(name)
            .ok_or_else(|| ProfileError::profile_not_found(name))?;
        record.default = DefaultFlag::Set;
        let record = record.clone();

        self.persist(&document)?;
        crate::log_info!("repository", "Default profile set", profile = name);

        Profile::from_record(name, record)
    }

    /// The profile flagged as default
    pub fn get_default_profile(&self) -> ProfileResult<Profile> {
        let document = self.load_and_write_back_upgrades()?;
        let (name, record) = document
            .iter()
            .find(|(_, record)| record.default.is_set())
            .ok_or_else(ProfileError::no_default_profile)?;
        Profile::from_record(name, record.clone())
    }

    fn load_and_write_back_upgrades(&self) -> ProfileResult<ProfileDocument> {
        let migrated = self.load()?;
        if migrated.changed() {
            self.persist(&migrated.document)?;
        }
        Ok(migrated.document)
    }

    /// Read and migrate the document. A missing file is an empty document.
    fn load(&self) -> ProfileResult<MigratedDocument> {
        let contents = match fs::read_to_string(&self.document_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                crate::log_debug!(
                    "repository",
                    "Profile document not found, starting empty",
                    path = self.document_path.display(),
                );
                return Ok(MigratedDocument::default());
            }
            Err(e) => {
                return Err(ProfileError::persistence(format!(
                    "Cannot read {}",
                    self.document_path.display()
                ))
                .with_details(e.to_string()))
            }
        };

        if contents.trim().is_empty() {
            return Ok(MigratedDocument::default());
        }

        let raw: BTreeMap<String, Value> = serde_json::from_str(&contents).map_err(|e| {
            ProfileError::persistence(format!(
                "{} is not a valid profile document",
                self.document_path.display()
            ))
            .with_details(e.to_string())
        })?;

        let migrated = migrate_document(raw)?;
        if migrated.changed() {
            crate::log_info!(
                "repository",
                "Migrated profiles to the current schema",
                count = migrated.upgraded.len(),
            );
        }
        Ok(migrated)
    }

    fn persist(&self, document: &ProfileDocument) -> ProfileResult<()> {
        let json = serde_json::to_string_pretty(document)?;
        write_atomic(&self.document_path, json.as_bytes()).map_err(|e| {
            crate::log_error!(
                "repository",
                "Failed to write profile document",
                path = self.document_path.display(),
                error = e,
            );
            e
        })
    }
}

fn clear_defaults(document: &mut ProfileDocument) {
    for record in document.values_mut() {
        record.default = DefaultFlag::Unset;
    }
}

/// Write `bytes` to `path` through a sibling temp file
fn write_atomic(path: &Path, bytes: &[u8]) -> ProfileResult<()> {
    let tmp_path = tmp_path(path)?;

    {
        let mut file = fs::File::create(&tmp_path).map_err(|e| {
            ProfileError::persistence(format!("Cannot create {}", tmp_path.display()))
                .with_details(e.to_string())
        })?;

        file.write_all(bytes)
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                ProfileError::persistence(format!("Cannot write {}", tmp_path.display()))
                    .with_details(e.to_string())
            })?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ProfileError::persistence(format!("Cannot replace {}", path.display()))
            .with_details(e.to_string())
    })
}

/// `.<file name>.tmp` next to `path`, creating the directory if needed
fn tmp_path(path: &Path) -> ProfileResult<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ProfileError::persistence(format!("{} is not a file path", path.display()))
        })?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !parent.exists() {
        fs::create_dir_all(&parent).map_err(|e| {
            ProfileError::persistence(format!("Cannot create {}", parent.display()))
                .with_details(e.to_string())
        })?;
    }

    Ok(parent.join(format!(".{}.tmp", file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::profile::{PrivateKeyProfileArgs, ProfileSettings};
    use crate::types::{NetworkCurrency, NetworkType, Password};
    use zeroize::Zeroizing;

    const PRIVATE_KEY: &str = "A58BD9618B47F5E6B6BACB9B37CC242EDE1A0461AAE8FF2084BC825209D90E18";

    fn profile(name: &str, is_default: bool) -> Profile {
        Profile::create_from_private_key(PrivateKeyProfileArgs {
            settings: ProfileSettings {
                name: name.to_string(),
                password: Password::new("password").unwrap(),
                network_type: NetworkType::MijinTest,
                url: "http://localhost:3000".to_string(),
                generation_hash: "test".to_string(),
                network_currency: NetworkCurrency::default(),
                is_default,
            },
            private_key: Zeroizing::new(PRIVATE_KEY.to_string()),
        })
        .unwrap()
    }

    #[test]
    fn test_missing_document_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ProfileRepository::new(dir.path().join("profiles.json"));
        assert!(repository.all().unwrap().is_empty());
        assert_eq!(
            repository.find("default").unwrap_err().code,
            ErrorCode::ProfileNotFound
        );
        assert!(!repository.document_path().exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_profile_is_not_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let repository = ProfileRepository::new(&path);
        repository.save(profile("default", false)).unwrap();

        // Stored under a key that differs from the wallet name, and still v2
        let mut value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let mut record = value["default"].take();
        record["version"] = serde_json::json!(2);
        let stored = serde_json::json!({ "renamed": record }).to_string();
        fs::write(&path, &stored).unwrap();

        assert_eq!(repository.all().unwrap_err().code, ErrorCode::PersistenceError);
        assert_eq!(fs::read_to_string(&path).unwrap(), stored);
    }

    #[test]
    fn test_saved_default_replaces_previous_default() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ProfileRepository::new(dir.path().join("profiles.json"));

        repository.save(profile("first", true)).unwrap();
        repository.save(profile("second", true)).unwrap();

        let defaults: Vec<_> = repository
            .all()
            .unwrap()
            .into_iter()
            .filter(|p| p.is_default())
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name(), "second");
    }

    #[test]
    fn test_persisted_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let repository = ProfileRepository::new(&path);
        repository.save(profile("default", true)).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let record = &value["default"];
        assert_eq!(record["default"], "1");
        assert_eq!(record["type"], "PrivateKey");
        assert_eq!(record["version"], 3);
        assert_eq!(record["simpleWallet"]["schema"], "simple_v1");
        assert_eq!(record["simpleWallet"]["network"], 144);
        assert_eq!(record["networkCurrency"]["namespaceId"], "symbol.xym");
        assert!(record.get("path").is_none());
        assert!(record.get("encryptedPassphrase").is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ProfileRepository::new(dir.path().join("profiles.json"));
        repository.save(profile("default", false)).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("profiles.json")]);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ProfileRepository::new(dir.path().join("nested").join("profiles.json"));
        repository.save(profile("default", false)).unwrap();
        assert!(repository.document_path().exists());
    }

    #[test]
    fn test_invalid_document_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(&path, "{ not json").unwrap();

        let repository = ProfileRepository::new(&path);
        assert_eq!(repository.all().unwrap_err().code, ErrorCode::PersistenceError);
    }

    #[test]
    fn test_empty_file_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(&path, "").unwrap();

        let repository = ProfileRepository::new(&path);
        assert!(repository.all().unwrap().is_empty());
    }
}
