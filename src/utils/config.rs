//! Profile Store Configuration
//!
//! Where the profile document lives and how chatty the core is. The
//! repository receives its path from this value; nothing is global except
//! the debug logging switch, which [`ProfileStoreConfig::apply`] sets.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, ProfileResult};

use super::logging;

/// File name of the profile document in the home directory
pub const PROFILE_FILE_NAME: &str = ".symbolrc.json";

/// Overrides the document location
pub const PROFILE_FILE_ENV: &str = "SYMBOL_CLI_PROFILE_FILE";

/// Enables debug logging when set to `1`, `true` or `yes`
pub const DEBUG_ENV: &str = "SYMBOL_CLI_DEBUG";

/// Settings for a profile store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStoreConfig {
    /// Location of the JSON profile document
    pub document_path: PathBuf,
    /// Emit debug-level log entries
    pub debug_logging: bool,
}

impl Default for ProfileStoreConfig {
    /// `~/.symbolrc.json`, falling back to the working directory when no
    /// home directory can be resolved.
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            document_path: home.join(PROFILE_FILE_NAME),
            debug_logging: false,
        }
    }
}

impl ProfileStoreConfig {
    /// Defaults overridden by `SYMBOL_CLI_PROFILE_FILE` and `SYMBOL_CLI_DEBUG`
    pub fn from_env() -> ProfileResult<Self> {
        let mut config = Self::default();

        if let Some(path) = env::var_os(PROFILE_FILE_ENV) {
            if path.is_empty() {
                return Err(ProfileError::invalid_input(format!(
                    "{} is set but empty",
                    PROFILE_FILE_ENV
                )));
            }
            config.document_path = PathBuf::from(path);
        }

        if let Ok(value) = env::var(DEBUG_ENV) {
            config.debug_logging = parse_flag(&value);
        }

        Ok(config)
    }

    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = path.into();
        self
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Push the logging settings into the global logger
    pub fn apply(&self) {
        if self.debug_logging {
            logging::enable_debug();
        } else {
            logging::disable_debug();
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
