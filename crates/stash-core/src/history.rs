//! Saved-song history records.
//!
//! A history is a snapshot handed to us by whoever owns persistence; this
//! module only models the records and reads a snapshot from a JSON file.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{HistoryError, Result};

/// Anything carrying an optional creation timestamp.
///
/// The streak computation only needs this one field, so it works over any
/// record type that can hand it out.
pub trait Timestamped {
    fn created_at(&self) -> Option<&str>;
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn created_at(&self) -> Option<&str> {
        (**self).created_at()
    }
}

impl Timestamped for str {
    fn created_at(&self) -> Option<&str> {
        Some(self)
    }
}

impl Timestamped for String {
    fn created_at(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Timestamped for Option<String> {
    fn created_at(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// One song the user stashed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSong {
    #[serde(default)]
    pub id: String,
    /// Track title
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub artist: String,
    /// Platform the link was pasted from (e.g. "tiktok", "youtube")
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub album_art_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Creation timestamp as received; may be absent or malformed.
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

/// Keeps string timestamps and drops anything else, so one record with a
/// numeric or structured `created_at` does not reject the whole snapshot.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl SavedSong {
    /// Minimal record with only an id and a timestamp.
    pub fn at(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at.into()),
            ..Self::default()
        }
    }
}

impl Timestamped for SavedSong {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryDocument {
    List(Vec<SavedSong>),
    Wrapped { history: Vec<SavedSong> },
}

/// An immutable snapshot of a user's saved songs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    songs: Vec<SavedSong>,
}

impl History {
    pub fn new(songs: Vec<SavedSong>) -> Self {
        Self { songs }
    }

    /// Parse a snapshot from JSON text.
    ///
    /// Accepts either a bare array of songs or an object with a `history`
    /// array, which is the shape the app state is exported in.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let doc: HistoryDocument = serde_json::from_str(text)?;
        let songs = match doc {
            HistoryDocument::List(songs) => songs,
            HistoryDocument::Wrapped { history } => history,
        };
        Ok(Self { songs })
    }

    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::ReadFailed`] if the file cannot be read and
    /// [`HistoryError::Malformed`] if it does not hold a history document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| HistoryError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let history = Self::from_json(&text).map_err(|source| HistoryError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), songs = history.len(), "loaded history");
        Ok(history)
    }

    pub fn songs(&self) -> &[SavedSong] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SavedSong> {
        self.songs.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a SavedSong;
    type IntoIter = std::slice::Iter<'a, SavedSong>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

impl From<Vec<SavedSong>> for History {
    fn from(songs: Vec<SavedSong>) -> Self {
        Self::new(songs)
    }
}
