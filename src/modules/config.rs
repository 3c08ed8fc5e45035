use std::path::{Path, PathBuf};

use crate::{LEGACY_USERS_FILE, LOG_FILE, USERS_FILE};

/// File locations used by one run of the application
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub users_file: PathBuf,
    pub legacy_users_file: PathBuf,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Place every file inside `dir`, keeping the default file names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            users_file: dir.join(USERS_FILE),
            legacy_users_file: dir.join(LEGACY_USERS_FILE),
            log_file: dir.join(LOG_FILE),
        }
    }
}

impl Default for AppConfig {
    /// Files in the current working directory
    fn default() -> Self {
        Self {
            users_file: PathBuf::from(USERS_FILE),
            legacy_users_file: PathBuf::from(LEGACY_USERS_FILE),
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.users_file, PathBuf::from("users.jsonl"));
        assert_eq!(config.legacy_users_file, PathBuf::from("users.txt"));
        assert_eq!(config.log_file, PathBuf::from("application.log"));
    }

    #[test]
    fn test_paths_in_dir() {
        let config = AppConfig::in_dir("/tmp/tours");
        assert_eq!(config.users_file, Path::new("/tmp/tours/users.jsonl"));
        assert_eq!(config.legacy_users_file, Path::new("/tmp/tours/users.txt"));
        assert_eq!(config.log_file, Path::new("/tmp/tours/application.log"));
    }
}
