//! Raw extraction cache.
//!
//! Records are keyed by the source *file name*, not by its content: a file
//! replaced under the same name keeps returning the first extraction until
//! its record is removed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GpzuError;
use crate::extraction::table::Table;

/// Raw extraction output for one source: page texts and tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArtifacts {
    pub pages: Vec<String>,
    pub tables: Vec<Table>,
}

/// Directory-backed cache of [`RawArtifacts`], one JSON file per source.
#[derive(Debug, Clone)]
pub struct RawCache {
    dir: PathBuf,
}

/// Cache id for a source path: its file name with the extension dropped.
pub fn cache_id(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string_lossy().into_owned())
}

impl RawCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RawCache { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Whether a record exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.record_path(id).is_file()
    }

    /// Load the record for `id`. Missing and unreadable records are both a
    /// miss; the latter is logged.
    pub fn load(&self, id: &str) -> Option<RawArtifacts> {
        let path = self.record_path(id);
        if !path.is_file() {
            return None;
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(GpzuError::from)
            .and_then(|s| serde_json::from_str::<RawArtifacts>(&s).map_err(GpzuError::from));

        match parsed {
            Ok(artifacts) => {
                debug!(id, path = %path.display(), "loaded raw artifacts from cache");
                Some(artifacts)
            }
            Err(e) => {
                warn!(id, path = %path.display(), error = %e, "cannot load cache record");
                None
            }
        }
    }

    /// Persist `artifacts` under `id`. The record is written to a temporary
    /// file next to its destination and renamed into place.
    pub fn store(&self, id: &str, artifacts: &RawArtifacts) -> Result<(), GpzuError> {
        std::fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer(&mut tmp, artifacts)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.record_path(id)).map_err(|e| e.error)?;
        Ok(())
    }

    /// [`RawCache::store`] with failures logged instead of returned.
    pub fn save(&self, id: &str, artifacts: &RawArtifacts) {
        if let Err(e) = self.store(id, artifacts) {
            warn!(id, error = %e, "cannot save raw artifacts to cache");
        }
    }
}
