use std::path::{Path, PathBuf};

use crate::dataset::model::{PosterDataset, today_utc};
use crate::foundation::error::{PosterError, PosterResult};

const LATEST_FILE: &str = "latest.json";
const ARCHIVE_DIR: &str = "archive";
const INDEX_FILE: &str = "index.json";

/// One archived poster, as listed in `archive/index.json`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub date: String,
    #[serde(default)]
    pub display_date: String,
    pub file: String,
}

impl ArchiveEntry {
    pub fn for_dataset(ds: &PosterDataset) -> Self {
        Self {
            date: ds.date.clone(),
            display_date: ds.display_date.clone(),
            file: archive_file_name(&ds.date),
        }
    }
}

/// Archive listing: newest first, at most one entry per date.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ArchiveIndex {
    entries: Vec<ArchiveEntry>,
}

impl ArchiveIndex {
    /// Build from arbitrary entries, keeping the first occurrence of each date.
    pub fn from_entries(entries: impl IntoIterator<Item = ArchiveEntry>) -> Self {
        let mut out = Self::default();
        for e in entries {
            out.insert(e);
        }
        out
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, date: &str) -> bool {
        self.entries.iter().any(|e| e.date == date)
    }

    /// Insert keeping newest-first order. Returns `false` when the date is already listed.
    pub fn insert(&mut self, entry: ArchiveEntry) -> bool {
        if self.contains(&entry.date) {
            return false;
        }
        let at = self
            .entries
            .iter()
            .position(|e| e.date < entry.date)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
        true
    }
}

/// Where a loaded dataset came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    Archived(String),
    Latest,
    Empty,
}

/// Filesystem layout of the daily data mirror:
///
/// ```text
/// <root>/latest.json
/// <root>/archive/index.json
/// <root>/archive/poster-<date>.json
/// ```
#[derive(Clone, Debug)]
pub struct ArchiveStore {
    root: PathBuf,
}

impl ArchiveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn latest_path(&self) -> PathBuf {
        self.root.join(LATEST_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR).join(INDEX_FILE)
    }

    pub fn dataset_path(&self, date: &str) -> PathBuf {
        self.root.join(ARCHIVE_DIR).join(archive_file_name(date))
    }

    /// Load a poster dataset, falling back archived -> latest -> empty. Never fails.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self, date: Option<&str>) -> (PosterDataset, DatasetSource) {
        if let Some(date) = date {
            match PosterDataset::from_path(&self.dataset_path(date)) {
                Ok(ds) => return (ds, DatasetSource::Archived(date.to_string())),
                Err(e) => {
                    tracing::warn!(date, error = %e, "archived dataset unavailable, using latest")
                }
            }
        }

        match PosterDataset::from_path(&self.latest_path()) {
            Ok(ds) => (ds, DatasetSource::Latest),
            Err(e) => {
                tracing::warn!(error = %e, "latest dataset unavailable, rendering empty poster");
                let date = date.map(str::to_string).unwrap_or_else(today_utc);
                (PosterDataset::empty(date), DatasetSource::Empty)
            }
        }
    }

    /// Read `archive/index.json`; a missing file is an empty index.
    pub fn read_index(&self) -> PosterResult<ArchiveIndex> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(ArchiveIndex::default());
        }
        let s = std::fs::read_to_string(&path)
            .map_err(|e| PosterError::io(format!("read {}: {e}", path.display())))?;
        let entries: Vec<ArchiveEntry> =
            serde_json::from_str(&s).map_err(|e| PosterError::serde(e.to_string()))?;
        Ok(ArchiveIndex::from_entries(entries))
    }

    /// Write the dataset into the archive and list it in the index.
    ///
    /// The dataset file is always (re)written; returns whether the index gained an entry.
    #[tracing::instrument(skip(self, ds), fields(date = %ds.date))]
    pub fn record(&self, ds: &PosterDataset) -> PosterResult<bool> {
        ds.validate()?;
        let dir = self.root.join(ARCHIVE_DIR);
        std::fs::create_dir_all(&dir)
            .map_err(|e| PosterError::io(format!("create {}: {e}", dir.display())))?;

        write_text(&self.dataset_path(&ds.date), &ds.to_json_pretty()?)?;

        let mut index = self.read_index()?;
        let added = index.insert(ArchiveEntry::for_dataset(ds));
        if added {
            let json = serde_json::to_string_pretty(&index)
                .map_err(|e| PosterError::serde(e.to_string()))?;
            write_text(&self.index_path(), &json)?;
        }
        tracing::debug!(added, entries = index.len(), "archive updated");
        Ok(added)
    }

    /// Replace `latest.json`.
    pub fn publish_latest(&self, ds: &PosterDataset) -> PosterResult<()> {
        ds.validate()?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| PosterError::io(format!("create {}: {e}", self.root.display())))?;
        write_text(&self.latest_path(), &ds.to_json_pretty()?)
    }
}

pub fn archive_file_name(date: &str) -> String {
    format!("poster-{date}.json")
}

fn write_text(path: &Path, s: &str) -> PosterResult<()> {
    std::fs::write(path, s).map_err(|e| PosterError::io(format!("write {}: {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/archive.rs"]
mod tests;
