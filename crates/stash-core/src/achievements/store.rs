//! Storage for "already announced" achievement flags.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Key-value flags recording which achievements have been announced.
pub trait AchievementStore {
    fn has(&self, id: &str) -> bool;

    /// Record `id` as announced.
    fn set(&mut self, id: &str) -> Result<()>;
}

/// Flags held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryAchievementStore {
    shown: HashSet<String>,
}

impl MemoryAchievementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AchievementStore for MemoryAchievementStore {
    fn has(&self, id: &str) -> bool {
        self.shown.contains(id)
    }

    fn set(&mut self, id: &str) -> Result<()> {
        self.shown.insert(id.to_string());
        Ok(())
    }
}

/// Flags persisted as a JSON array of ids.
///
/// A missing file means nothing has been announced yet. An unreadable or
/// malformed file is treated the same way and overwritten on the next `set`.
#[derive(Debug, Clone)]
pub struct FileAchievementStore {
    path: PathBuf,
    shown: BTreeSet<String>,
}

impl FileAchievementStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let shown = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed achievement store");
                BTreeSet::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable achievement store");
                BTreeSet::new()
            }
        };
        Self { path, shown }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids recorded so far, sorted.
    pub fn shown(&self) -> impl Iterator<Item = &str> {
        self.shown.iter().map(String::as_str)
    }

    fn save(&self, shown: &BTreeSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(shown)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl AchievementStore for FileAchievementStore {
    fn has(&self, id: &str) -> bool {
        self.shown.contains(id)
    }

    /// The flag only counts once it is on disk; a failed write leaves the
    /// store unchanged.
    fn set(&mut self, id: &str) -> Result<()> {
        if self.shown.contains(id) {
            return Ok(());
        }
        let mut next = self.shown.clone();
        next.insert(id.to_string());
        self.save(&next)?;
        self.shown = next;
        Ok(())
    }
}
