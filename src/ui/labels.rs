//! Display labels, selectable per language.
//!
//! Labels are a plain value chosen once at start-up and passed down
//! into the UI; nothing here is process-global, and the core store and
//! renderer never see this type.

use crate::view::RenderStyle;

/// Display strings for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Title of the conversation-list pane
    pub chat_list_title: &'static str,
    /// Title of the conversation pane
    pub conversation_title: &'static str,
    /// Input-line title in normal prompt mode
    pub prompt_title: &'static str,
    /// Input-line title while renaming a chat
    pub rename_chat_title: &'static str,
    /// Input-line title while confirming a delete
    pub delete_chat_title: &'static str,
    /// Hint shown when a delete needs confirmation
    pub delete_confirm_hint: &'static str,
    /// Key-binding hint line
    pub key_hints: &'static str,
    /// First placeholder line for an empty conversation
    pub new_conversation_line1: &'static str,
    /// Second placeholder line for an empty conversation
    pub new_conversation_line2: &'static str,
}

impl Labels {
    /// English labels.
    pub fn english() -> Self {
        Self {
            chat_list_title: "Chats",
            conversation_title: "Conversation",
            prompt_title: "Prompt",
            rename_chat_title: "Rename Chat",
            delete_chat_title: "Delete Chat",
            delete_confirm_hint: "type in DELETE to confirm",
            key_hints: "^N new  ^R rename  ^D delete  Tab switch  ↑/↓ scroll  ^Q quit",
            new_conversation_line1: "    NEW CONVERSATION",
            new_conversation_line2: "    > waiting for prompt ...",
        }
    }

    /// German labels.
    pub fn german() -> Self {
        Self {
            chat_list_title: "Chats",
            conversation_title: "Konversation",
            prompt_title: "Eingabe",
            rename_chat_title: "Chat umbenennen",
            delete_chat_title: "Chat löschen",
            delete_confirm_hint: "tippe DELETE um zu bestätigen",
            key_hints: "^N neu  ^R umbenennen  ^D löschen  Tab wechseln  ↑/↓ scrollen  ^Q beenden",
            new_conversation_line1: "    NEUE KONVERSATION",
            new_conversation_line2: "    > warte auf Eingabe ...",
        }
    }

    /// French labels.
    pub fn french() -> Self {
        Self {
            chat_list_title: "Chats",
            conversation_title: "Conversation",
            prompt_title: "Prompt",
            rename_chat_title: "Renommer chat",
            delete_chat_title: "Supprimer chat",
            delete_confirm_hint: "tapez DELETE pour confirmer",
            key_hints: "^N nouveau  ^R renommer  ^D supprimer  Tab changer  ↑/↓ défiler  ^Q quitter",
            new_conversation_line1: "    NOUVELLE CONVERSATION",
            new_conversation_line2: "    > en attente de l'invite ...",
        }
    }

    /// Pick a label set by language tag, falling back to English.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "de" => Self::german(),
            "fr" => Self::french(),
            _ => Self::english(),
        }
    }

    /// Build the renderer style from these labels, with optional prefix
    /// overrides from configuration.
    pub fn render_style(
        &self,
        user_prefix: Option<&str>,
        assistant_prefix: Option<&str>,
    ) -> RenderStyle {
        let defaults = RenderStyle::default();
        RenderStyle {
            user_prefix: user_prefix
                .map(str::to_string)
                .unwrap_or(defaults.user_prefix),
            assistant_prefix: assistant_prefix
                .map(str::to_string)
                .unwrap_or(defaults.assistant_prefix),
            placeholder: [
                self.new_conversation_line1.to_string(),
                self.new_conversation_line2.to_string(),
            ],
        }
    }
}
