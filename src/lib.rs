//! ttychat
//!
//! Terminal chat client for OpenAI-compatible backends. Conversations
//! persist one JSON file each and render through a pure word-wrap and
//! viewport engine; the interactive shell on top is a thin ratatui
//! layer.
//!
//! The load-bearing pieces are [`store::ConversationStore`] (named
//! conversations, persistence, the active-selection pointer, and the
//! send flow) and [`view::render`] (deterministic transcript-to-lines
//! layout). Everything else collaborates around those two.

pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod store;
pub mod ui;
pub mod view;
