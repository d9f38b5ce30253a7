//! Contract file resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Trimmed benchmark corpus, checked in next to the harness.
pub const PRIMARY_DATA_DIR: &str = "data/test_contracts";
/// Full CUAD-style corpus, used when the trimmed set is absent.
pub const FALLBACK_DATA_DIR: &str = "full_contract_txt";

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("contract file not found: {name} (looked in: {})", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves contract identifiers to file content.
///
/// The active directory is fixed at construction time: the primary directory
/// if it exists, the fallback otherwise. Lookups try the identifier as given,
/// then with a `.txt` suffix appended.
#[derive(Debug, Clone)]
pub struct ContractStore {
    dir: PathBuf,
}

impl ContractStore {
    pub fn open(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        let primary = primary.into();
        let dir = if primary.is_dir() {
            primary
        } else {
            fallback.into()
        };
        Self { dir }
    }

    pub fn default_dirs() -> Self {
        Self::open(PRIMARY_DATA_DIR, FALLBACK_DATA_DIR)
    }

    /// Use a single directory with no fallback.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the full text of a contract. Lossy UTF-8 decoding, so corpus
    /// files with stray encoding artifacts still load.
    pub fn read(&self, name: &str) -> Result<String, ContractError> {
        let mut path = self.dir.join(name);
        if !path.exists() && !name.ends_with(".txt") {
            path = self.dir.join(format!("{name}.txt"));
        }
        if !path.exists() {
            return Err(ContractError::NotFound {
                name: name.to_string(),
                dir: self.dir.clone(),
            });
        }

        let bytes = std::fs::read(&path).map_err(|source| ContractError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
