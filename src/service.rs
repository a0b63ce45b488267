//! Profile Service
//!
//! The entry points a command layer uses: create a profile, pick the
//! default one, and resolve "the named profile, or else the default".

use crate::error::ProfileResult;
use crate::profile::{Profile, ProfileCreation};
use crate::repository::ProfileRepository;
use crate::utils::ProfileStoreConfig;

/// Default-profile bookkeeping on top of a [`ProfileRepository`]
#[derive(Debug, Clone)]
pub struct ProfileService {
    repository: ProfileRepository,
}

impl ProfileService {
    pub fn new(repository: ProfileRepository) -> Self {
        Self { repository }
    }

    pub fn from_config(config: &ProfileStoreConfig) -> Self {
        Self::new(ProfileRepository::from_config(config))
    }

    pub fn repository(&self) -> &ProfileRepository {
        &self.repository
    }

    /// Build and store a profile; it becomes the default when requested
    pub fn create_profile(&self, creation: ProfileCreation) -> ProfileResult<Profile> {
        let profile = Profile::create(creation)?;
        self.repository.save(profile)
    }

    pub fn set_default_profile(&self, name: &str) -> ProfileResult<Profile> {
        self.repository.set_default(name)
    }

    pub fn get_default_profile(&self) -> ProfileResult<Profile> {
        self.repository.get_default_profile()
    }

    /// The profile called `name`, or the default profile when no name is given
    pub fn find_profile_named(&self, name: Option<&str>) -> ProfileResult<Profile> {
        match name {
            Some(name) => self.repository.find(name),
            None => self.repository.get_default_profile(),
        }
    }

    pub fn all_profiles(&self) -> ProfileResult<Vec<Profile>> {
        self.repository.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::profile::{PrivateKeyProfileArgs, ProfileSettings};
    use crate::types::{NetworkCurrency, NetworkType, Password};
    use zeroize::Zeroizing;

    fn creation(name: &str, is_default: bool) -> ProfileCreation {
        ProfileCreation::PrivateKey(PrivateKeyProfileArgs {
            settings: ProfileSettings {
                name: name.to_string(),
                password: Password::new("password").unwrap(),
                network_type: NetworkType::MijinTest,
                url: "http://localhost:3000".to_string(),
                generation_hash: "test".to_string(),
                network_currency: NetworkCurrency::default(),
                is_default,
            },
            private_key: Zeroizing::new(
                "A58BD9618B47F5E6B6BACB9B37CC242EDE1A0461AAE8FF2084BC825209D90E18".to_string(),
            ),
        })
    }

    fn service(dir: &tempfile::TempDir) -> ProfileService {
        let config = ProfileStoreConfig::default().with_document_path(dir.path().join("rc.json"));
        ProfileService::from_config(&config)
    }

    #[test]
    fn test_create_profile_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        service.create_profile(creation("first", false)).unwrap();
        assert_eq!(
            service.get_default_profile().unwrap_err().code,
            ErrorCode::NoDefaultProfile
        );

        service.create_profile(creation("second", true)).unwrap();
        assert_eq!(service.get_default_profile().unwrap().name(), "second");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        service.create_profile(creation("default", false)).unwrap();
        let err = service.create_profile(creation("default", false)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateProfile);
    }

    #[test]
    fn test_find_profile_named_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        service.create_profile(creation("a", false)).unwrap();
        service.create_profile(creation("b", false)).unwrap();
        service.set_default_profile("b").unwrap();

        assert_eq!(service.find_profile_named(Some("a")).unwrap().name(), "a");
        assert_eq!(service.find_profile_named(None).unwrap().name(), "b");
        assert_eq!(
            service.find_profile_named(Some("c")).unwrap_err().code,
            ErrorCode::ProfileNotFound
        );
    }

    #[test]
    fn test_set_default_unknown_profile() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        assert_eq!(
            service.set_default_profile("missing").unwrap_err().code,
            ErrorCode::ProfileNotFound
        );
    }
}
