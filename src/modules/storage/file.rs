use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use tempfile::NamedTempFile;

use super::codec::{decode_store, encode_store};
use super::legacy::parse_legacy_file;
use crate::modules::auth::store::UserStore;
use crate::modules::config::AppConfig;
use crate::modules::error::{TourError, TourResult};
use crate::modules::utils::logging::log_data_operation;

/// Where a loaded store came from
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    /// No data file existed yet
    Fresh,
    DataFile,
    /// Imported from the legacy whitespace-delimited file
    LegacyImport,
    /// The data file could not be read; it was moved to the given path if it existed
    Degraded {
        reason: String,
        moved_to: Option<PathBuf>,
    },
}

fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Function to save the whole store, replacing the data file atomically
pub fn save_user_store(store: &UserStore, path: &Path) -> TourResult<()> {
    let data = encode_store(store)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Write next to the target so the rename stays on one filesystem
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| TourError::StorageIo(e.error))?;

    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

/// Function to load the store. A missing data file is not an error: the legacy
/// file is imported if present, otherwise the store starts empty.
pub fn load_user_store(config: &AppConfig) -> TourResult<(UserStore, LoadSource)> {
    if let Some(data) = read_if_exists(&config.users_file)? {
        return Ok((decode_store(&data)?, LoadSource::DataFile));
    }

    match read_if_exists(&config.legacy_users_file)? {
        Some(data) => {
            let store = parse_legacy_file(&data)?;
            save_user_store(&store, &config.users_file)?;
            info!(
                "Imported {} users from {}",
                store.len(),
                config.legacy_users_file.display()
            );
            Ok((store, LoadSource::LegacyImport))
        }
        None => Ok((UserStore::new(), LoadSource::Fresh)),
    }
}

/// Move an unreadable data file out of the way so the next save cannot overwrite it
fn quarantine(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let target = PathBuf::from(format!("{}.corrupt-{}", path.display(), stamp));
    match fs::rename(path, &target) {
        Ok(()) => Some(target),
        Err(e) => {
            error!("Failed to move {} aside: {}", path.display(), e);
            None
        }
    }
}

/// Load the store, falling back to an empty one if the data cannot be read
pub fn load_or_empty(config: &AppConfig) -> (UserStore, LoadSource) {
    match load_user_store(config) {
        Ok((store, source)) => {
            log_data_operation("load", "-", &config.users_file.display().to_string(), true, None);
            (store, source)
        }
        Err(e) => {
            let reason = e.to_string();
            log_data_operation(
                "load",
                "-",
                &config.users_file.display().to_string(),
                false,
                Some(&reason),
            );
            let moved_to = quarantine(&config.users_file);
            (UserStore::new(), LoadSource::Degraded { reason, moved_to })
        }
    }
}
