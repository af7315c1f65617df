//! Single-row CSV credential store.
//!
//! One record, one fixed location, full overwrite on save. Reads degrade
//! to defaults on any failure (a missing or corrupt file is recoverable);
//! writes surface their error to the caller. Secrets are stored in
//! plaintext — this is a known, accepted property of the deployment, and
//! the store is kept behind this struct so a stricter backend can replace
//! it without touching its callers.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write credentials: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode credentials: {0}")]
    Csv(#[from] csv::Error),

    #[error("credential file has a header but no data row")]
    Empty,
}

/// The saved connection profile. Column names follow the on-disk layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "server_saved", default)]
    pub server: String,

    #[serde(rename = "api_version_saved", default = "default_api_version")]
    pub api_version: String,

    #[serde(rename = "token_name_saved", default)]
    pub token_name: String,

    /// Personal access token secret. Sensitive; stored plaintext.
    #[serde(rename = "token_secret_saved", default)]
    pub token_secret: String,

    #[serde(rename = "site_name_saved", default)]
    pub site_name: String,

    /// Reserved for site URLs; currently always empty.
    #[serde(rename = "site_url_saved", default)]
    pub site_url: String,
}

impl Default for CredentialRecord {
    fn default() -> Self {
        Self {
            server: String::new(),
            api_version: default_api_version(),
            token_name: String::new(),
            token_secret: String::new(),
            site_name: String::new(),
            site_url: String::new(),
        }
    }
}

fn default_api_version() -> String {
    "3.17".into()
}

/// File-backed store for the single [`CredentialRecord`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the record lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved record. A missing file yields defaults; a
    /// malformed one yields defaults with a warning — never an error.
    pub fn load(&self) -> CredentialRecord {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no credential file, using defaults");
            return CredentialRecord::default();
        }
        match self.read_record() {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "credential file unreadable, using defaults"
                );
                CredentialRecord::default()
            }
        }
    }

    fn read_record(&self) -> Result<CredentialRecord, StoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut record: CredentialRecord = reader
            .deserialize()
            .next()
            .ok_or(StoreError::Empty)??;
        // A blank api_version cell falls back to the default, mirroring
        // the record's missing-column behavior.
        if record.api_version.trim().is_empty() {
            record.api_version = default_api_version();
        }
        Ok(record)
    }

    /// Write the record, fully replacing any prior content. Creates the
    /// parent directory if needed. I/O failures are the caller's to show.
    pub fn save(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.serialize(record)?;
        writer.flush()?;
        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::{CredentialRecord, CredentialStore};

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("credentials.csv"))
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let record = store_in(&dir).load();
        assert_eq!(record.api_version, "3.17");
        assert_eq!(record.server, "");
        assert_eq!(record.token_name, "");
        assert_eq!(record.token_secret, "");
        assert_eq!(record.site_name, "");
        assert_eq!(record.site_url, "");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);

        let record = CredentialRecord {
            server: "https://tableau.example.com".into(),
            api_version: "3.19".into(),
            token_name: "ci-token".into(),
            token_secret: "s3cr3t,with,commas".into(),
            site_name: "analytics".into(),
            site_url: String::new(),
        };
        store.save(&record).expect("save");
        assert_eq!(store.load(), record);
    }

    #[test]
    fn round_trips_empty_fields() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);

        let record = CredentialRecord {
            server: "srv".into(),
            ..CredentialRecord::default()
        };
        store.save(&record).expect("save");
        assert_eq!(store.load(), record);
    }

    #[test]
    fn save_overwrites_prior_record() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);

        let first = CredentialRecord {
            server: "old".into(),
            ..CredentialRecord::default()
        };
        let second = CredentialRecord {
            server: "new".into(),
            ..CredentialRecord::default()
        };
        store.save(&first).expect("save");
        store.save(&second).expect("save");
        assert_eq!(store.load().server, "new");

        // Single-row semantics: header + exactly one data row.
        let contents = std::fs::read_to_string(store.path()).expect("read");
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = TempDir::new().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("nested/deeper/credentials.csv"));
        store.save(&CredentialRecord::default()).expect("save");
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "not,a\nvalid\"csv,record,at,all\n\"").expect("write");
        assert_eq!(store.load(), CredentialRecord::default());
    }

    #[test]
    fn header_only_file_degrades_to_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "server_saved,api_version_saved,token_name_saved,token_secret_saved,site_name_saved,site_url_saved\n",
        )
        .expect("write");
        assert_eq!(store.load(), CredentialRecord::default());
    }

    #[test]
    fn blank_api_version_cell_falls_back_to_default() {
        let dir = TempDir::new().expect("tempdir");
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "server_saved,api_version_saved,token_name_saved,token_secret_saved,site_name_saved,site_url_saved\n\
             srv1,,tk,sec,,\n",
        )
        .expect("write");
        let record = store.load();
        assert_eq!(record.api_version, "3.17");
        assert_eq!(record.server, "srv1");
    }

    #[cfg(unix)]
    #[test]
    fn save_to_unwritable_destination_surfaces_an_error() {
        // A path whose "parent directory" is a plain file cannot be created.
        let dir = TempDir::new().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").expect("write");
        let store = CredentialStore::new(blocker.join("credentials.csv"));
        assert!(store.save(&CredentialRecord::default()).is_err());
    }
}
