//! Conversation entity: a named, ordered transcript persisted as one file.
//!
//! The on-disk format is the raw serialized array of `{role, content}`
//! objects, no envelope and no version field, so transcripts written by
//! earlier clients remain loadable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::{Message, StoreError};

/// File extension for persisted conversations.
pub const FILE_EXTENSION: &str = "json";

/// A named, ordered sequence of role-tagged messages.
///
/// The message sequence is append-only during normal chat flow; it is
/// wholesale-replaced only by [`Conversation::load`]. The backing `path`
/// resolves lazily to `<dir>/<name>.json` unless a load pinned it to an
/// explicit file.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Display name; doubles as the on-disk file stem
    name: String,
    /// Backing file, once resolved or explicitly overridden
    path: Option<PathBuf>,
    /// Ordered transcript
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            messages: Vec::new(),
        }
    }

    /// Display name of this conversation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename in memory. Clears the resolved path so the next save
    /// writes under the new stem; the caller removes the old file.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.path = None;
    }

    /// Ordered transcript, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the transcript holds no messages yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append one message. Appending is the only mutation normal chat
    /// flow performs on the transcript.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Resolve the backing file path, computing `<dir>/<name>.json` if
    /// no explicit path is pinned yet.
    fn resolve_path(&mut self, dir: &Path) -> PathBuf {
        self.path
            .get_or_insert_with(|| dir.join(format!("{}.{FILE_EXTENSION}", self.name)))
            .clone()
    }

    /// Persist the transcript, overwriting the backing file.
    ///
    /// Creates `dir` first if absent. The file content is the plain
    /// JSON array of messages.
    pub fn save(&mut self, dir: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Storage {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = self.resolve_path(dir);
        let json = serde_json::to_string(&self.messages).map_err(|source| {
            StoreError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Storage {
            path: path.clone(),
            source,
        })?;
        debug!(name = %self.name, path = ?path, "saved conversation");
        Ok(())
    }

    /// Replace the transcript from a file, pinning `path` as the backing
    /// file.
    ///
    /// A missing file is not an error: the transcript is left empty and
    /// the conversation starts fresh. A file that exists but does not
    /// parse as a message array reports [`StoreError::Malformed`].
    pub fn load(&mut self, path: PathBuf) -> Result<(), StoreError> {
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.path = Some(path);
                self.messages = Vec::new();
                return Ok(());
            }
            Err(source) => return Err(StoreError::Storage { path, source }),
        };
        let messages =
            serde_json::from_str(&json).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?;
        self.path = Some(path);
        self.messages = messages;
        Ok(())
    }

    /// Remove the backing file. Idempotent: an already-absent file is
    /// success.
    pub fn delete_file(&mut self, dir: &Path) -> Result<(), StoreError> {
        let path = self.resolve_path(dir);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Storage { path, source }),
        }
    }
}

// ===== Tests =====
