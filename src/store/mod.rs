//! Conversation store: ordered named conversations plus the active
//! selection.
//!
//! The store owns the mapping from conversation name to transcript,
//! keeps names unique, persists one file per conversation under its
//! directory, and holds the completion backend by composition. All
//! operations are synchronous; one `send` blocks until the backend
//! answers.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::client::CompletionClient;
use crate::model::{Conversation, Message, StoreError, FILE_EXTENSION};

/// Placeholder name for a conversation that has not been named yet.
///
/// Conversations carry this sentinel only while they live outside the
/// mapping; the first `send` replaces it with a model-generated name.
pub const UNSAVED_NAME: &str = "<<new>>";

/// Upper bound on conversation names, matching the limit stated in the
/// naming prompt.
const MAX_NAME_LEN: usize = 25;

/// Fallback name when the model's suggestion sanitizes to nothing.
const DEFAULT_NAME: &str = "Untitled";

/// Instruction sent to the model to name a fresh conversation. The
/// length and character policy lives in this text; the reply is still
/// sanitized before it touches the filesystem.
const NAMING_PROMPT: &str = "Generate a name for this conversation. \
     Max of 25 characters and UpperCamelCase! \
     Your answer should only contain this name! \
     No formatting and no special characters!";

/// Ordered collection of named conversations with an active-selection
/// pointer.
///
/// # Invariants
///
/// - Names are unique; iteration order is insertion order, which is the
///   order surfaced to the UI.
/// - `current`, when `Some`, always names an existing entry. Deleting
///   the current conversation reassigns it to the first remaining entry
///   (or `None`); renaming it follows the new name.
pub struct ConversationStore {
    dir: PathBuf,
    conversations: Vec<Conversation>,
    current: Option<String>,
    client: Box<dyn CompletionClient>,
}

impl ConversationStore {
    /// Open the store rooted at `dir`, creating the directory if absent
    /// and loading every `*.json` conversation file in it.
    ///
    /// Files are scanned in sorted filename order so the surfaced list
    /// is deterministic. A file that fails to parse is skipped with a
    /// warning rather than aborting start-up. The first loaded entry
    /// becomes the active selection.
    pub fn open(
        dir: impl Into<PathBuf>,
        client: Box<dyn CompletionClient>,
    ) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Storage {
            path: dir.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|source| StoreError::Storage {
                path: dir.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == FILE_EXTENSION))
            .collect();
        paths.sort();

        let mut conversations = Vec::new();
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let mut conv = Conversation::new(stem);
            match conv.load(path.clone()) {
                Ok(()) => conversations.push(conv),
                Err(err) => warn!(path = ?path, error = %err, "skipping unreadable conversation"),
            }
        }

        let current = conversations.first().map(|c| c.name().to_string());
        info!(dir = ?dir, count = conversations.len(), "opened conversation store");

        Ok(Self {
            dir,
            conversations,
            current,
            client,
        })
    }

    /// Directory holding the conversation files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Display names in insertion order.
    pub fn list_names(&self) -> Vec<String> {
        self.conversations
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Name of the active conversation, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Make `name` the active conversation.
    pub fn select(&mut self, name: &str) -> Result<(), StoreError> {
        if self.position(name).is_none() {
            return Err(StoreError::NoSuchConversation {
                name: name.to_string(),
            });
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Clear the active selection (a fresh, unnamed chat).
    pub fn deselect(&mut self) {
        self.current = None;
    }

    /// Look up a conversation by name.
    pub fn get(&self, name: &str) -> Option<&Conversation> {
        self.position(name).map(|i| &self.conversations[i])
    }

    /// Insert a new empty conversation under `name`.
    ///
    /// The backing file is not written until the first save. A
    /// colliding name reports [`StoreError::NameCollision`]; histories
    /// are never merged.
    pub fn create_named(&mut self, name: &str) -> Result<&Conversation, StoreError> {
        if self.position(name).is_some() {
            return Err(StoreError::NameCollision {
                name: name.to_string(),
            });
        }
        self.conversations.push(Conversation::new(name));
        self.current = Some(name.to_string());
        Ok(&self.conversations[self.conversations.len() - 1])
    }

    /// Create a conversation held outside the mapping until it acquires
    /// a real name via `send`.
    pub fn create_unsaved(&self) -> Conversation {
        Conversation::new(UNSAVED_NAME)
    }

    /// Rename `old` to (a sanitized form of) `new`, moving the backing
    /// file and following the active-selection pointer.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, StoreError> {
        let index = self.position(old).ok_or_else(|| StoreError::NoSuchConversation {
            name: old.to_string(),
        })?;
        let name = sanitize_name(new);
        if name == old {
            return Ok(name);
        }
        if self.position(&name).is_some() {
            return Err(StoreError::NameCollision { name });
        }
        self.conversations[index].delete_file(&self.dir)?;
        self.conversations[index].set_name(&name);
        self.conversations[index].save(&self.dir)?;
        if self.current.as_deref() == Some(old) {
            self.current = Some(name.clone());
        }
        info!(old, new = %name, "renamed conversation");
        Ok(name)
    }

    /// Delete `name`: remove the backing file (idempotent if already
    /// absent) and the in-memory entry, reassigning the selection if it
    /// pointed here.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let index = self.position(name).ok_or_else(|| StoreError::NoSuchConversation {
            name: name.to_string(),
        })?;
        self.conversations[index].delete_file(&self.dir)?;
        self.conversations.remove(index);
        if self.current.as_deref() == Some(name) {
            self.current = self.conversations.first().map(|c| c.name().to_string());
        }
        info!(name, "deleted conversation");
        Ok(())
    }

    /// Send `prompt` to the conversation under `key` and append the
    /// model's reply.
    ///
    /// A blank prompt is a no-op returning the unchanged key. `None`
    /// targets a fresh unsaved conversation which is named by a second
    /// completion call, sanitized, and inserted into the mapping. The
    /// resolved key becomes the active selection and is returned.
    ///
    /// On completion failure the user message stays appended (no
    /// rollback); for a named conversation the unanswered prompt is
    /// visible in the transcript.
    pub fn send(
        &mut self,
        key: Option<&str>,
        prompt: &str,
    ) -> Result<Option<String>, StoreError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(key.map(String::from));
        }

        match key {
            None => {
                let mut conv = self.create_unsaved();
                conv.push(Message::user(prompt));
                let reply = self.client.complete(conv.messages())?;
                conv.push(Message::assistant(reply));

                let name = self.generate_name(&conv)?;
                conv.set_name(&name);
                conv.save(&self.dir)?;
                self.conversations.push(conv);
                self.current = Some(name.clone());
                info!(name = %name, "named new conversation");
                Ok(Some(name))
            }
            Some(key) => {
                let index = match self.position(key) {
                    Some(index) => index,
                    None => {
                        self.conversations.push(Conversation::new(key));
                        self.conversations.len() - 1
                    }
                };
                self.conversations[index].push(Message::user(prompt));
                let reply = self.client.complete(self.conversations[index].messages())?;
                self.conversations[index].push(Message::assistant(reply));
                self.conversations[index].save(&self.dir)?;
                self.current = Some(key.to_string());
                Ok(Some(key.to_string()))
            }
        }
    }

    /// Ask the model for a conversation name, then sanitize and
    /// de-duplicate the reply before it is used as a file stem.
    fn generate_name(&self, conv: &Conversation) -> Result<String, StoreError> {
        let mut messages = conv.messages().to_vec();
        messages.push(Message::user(NAMING_PROMPT));
        let raw = self.client.complete(&messages)?;
        Ok(self.unique_name(&sanitize_name(&raw)))
    }

    /// Append `-2`, `-3`, ... until the name is free.
    fn unique_name(&self, base: &str) -> String {
        if self.position(base).is_none() {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.position(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.name() == name)
    }
}

/// Reduce an arbitrary string to a safe conversation name.
///
/// The model is *asked* for a short punctuation-free name, but the reply
/// is untrusted: keep only ASCII alphanumerics, spaces, hyphens and
/// underscores, trim, clamp to [`MAX_NAME_LEN`] characters, and fall
/// back to [`DEFAULT_NAME`] when nothing survives.
fn sanitize_name(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let clamped: String = kept.trim().chars().take(MAX_NAME_LEN).collect();
    let clamped = clamped.trim_end();
    if clamped.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        clamped.to_string()
    }
}

// ===== Tests =====
