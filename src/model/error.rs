//! Error types for the conversation store.
//!
//! Errors compose via `thiserror` and propagate with `?`. None of these
//! are fatal to the process: the interactive shell catches all of them
//! at the boundary, reports on the status line, and returns to the idle
//! prompt.

use std::path::PathBuf;
use thiserror::Error;

use crate::client::CompletionError;

/// Failure modes of conversation store operations.
///
/// # Recovery
///
/// - `Completion`: the user message is already appended when this is
///   raised; the caller surfaces the error and the transcript keeps the
///   unanswered prompt (no rollback).
/// - `NoSuchConversation` / `NameCollision`: recoverable; the caller
///   should re-fetch the name list or prompt for a different name.
/// - `Storage` / `Malformed`: abort only the current save/load/delete
///   call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The completion backend failed (transport, auth, quota, empty reply).
    #[error("completion request failed: {0}")]
    Completion(#[from] CompletionError),

    /// An operation referenced a conversation name that is not in the store.
    #[error("no such conversation: {name}")]
    NoSuchConversation {
        /// The name that was looked up
        name: String,
    },

    /// A create or rename target already exists. Histories are never merged.
    #[error("conversation already exists: {name}")]
    NameCollision {
        /// The conflicting name
        name: String,
    },

    /// Filesystem failure while reading or writing a conversation file.
    #[error("storage failure for {path:?}: {source}")]
    Storage {
        /// The file or directory involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A conversation file exists but does not contain a valid message array.
    #[error("malformed conversation file {path:?}: {source}")]
    Malformed {
        /// The offending file
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_error_converts_via_from() {
        fn fails() -> Result<(), StoreError> {
            Err(CompletionError::EmptyResponse)?
        }
        assert!(matches!(fails(), Err(StoreError::Completion(_))));
    }

    #[test]
    fn no_such_conversation_names_the_key() {
        let err = StoreError::NoSuchConversation {
            name: "Missing".to_string(),
        };
        assert_eq!(err.to_string(), "no such conversation: Missing");
    }

    #[test]
    fn name_collision_names_the_key() {
        let err = StoreError::NameCollision {
            name: "Greeting".to_string(),
        };
        assert_eq!(err.to_string(), "conversation already exists: Greeting");
    }
}
