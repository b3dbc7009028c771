//! Pure viewport renderer.
//!
//! Transforms a message history plus a viewport size and scroll offset
//! into the exact ordered list of display lines. Deterministic and
//! side-effect free: identical inputs always yield identical output, so
//! everything here is unit-testable without a terminal.

use unicode_width::UnicodeWidthStr;

use crate::model::{Message, Role};
use crate::view::wrap::wrap;

/// Fixed horizontal margin reserved beside the role prefix when
/// computing the wrap budget.
pub const MARGIN: usize = 12;

/// Rows reserved for borders and input chrome when windowing.
pub const CHROME_ROWS: usize = 4;

/// Short rule printed after each user message.
const USER_RULE: &str = "──────";

// ===== Viewport =====

/// Terminal viewport size in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Total rows available, including chrome
    pub rows: u16,
    /// Total columns available
    pub cols: u16,
}

impl Viewport {
    /// Create a viewport size.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

// ===== RenderStyle =====

/// Display strings consumed by [`render`].
///
/// Passed in explicitly so the renderer stays independent of any global
/// label or locale state; the UI layer builds one from its label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// Prefix before the first line of a user message
    pub user_prefix: String,
    /// Prefix before the first line of an assistant message
    pub assistant_prefix: String,
    /// Two-line placeholder shown for an empty conversation
    pub placeholder: [String; 2],
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            user_prefix: " ❯❯ ".to_string(),
            assistant_prefix: "    ❮❮ ".to_string(),
            placeholder: [
                "    NEW CONVERSATION".to_string(),
                "    > waiting for prompt ...".to_string(),
            ],
        }
    }
}

// ===== render =====

/// Render a message history into the visible window of display lines.
///
/// The full sequence is: one leading blank line; per message, greedily
/// wrapped content with the role prefix on the first line and
/// equal-width space padding on continuations, followed by a separator
/// (short rule after user, `cols - 3` rule after assistant); one
/// trailing blank line. An empty history substitutes the two placeholder
/// lines for message content.
///
/// Windowing reserves [`CHROME_ROWS`] rows: with `visible = rows - 4`,
/// a sequence that fits is returned whole; otherwise the returned slice
/// starts at `len - visible - scroll_offset`, clamped to
/// `[0, len - visible]`. Offset 0 always shows the tail; larger offsets
/// scroll toward older content.
pub fn render(
    messages: &[Message],
    viewport: Viewport,
    scroll_offset: usize,
    style: &RenderStyle,
) -> Vec<String> {
    let cols = viewport.cols as usize;
    let mut values = vec![String::new()];

    if messages.is_empty() {
        values.push(style.placeholder[0].clone());
        values.push(style.placeholder[1].clone());
    }

    for message in messages {
        let prefix = match message.role() {
            Role::User => &style.user_prefix,
            Role::Assistant => &style.assistant_prefix,
        };
        let pad = prefix.width();
        let mx = cols.saturating_sub(pad + MARGIN).max(1);

        for (i, line) in wrap(message.content(), mx).into_iter().enumerate() {
            if i == 0 {
                values.push(format!("{prefix}{line}"));
            } else {
                values.push(format!("{}{line}", " ".repeat(pad)));
            }
        }

        match message.role() {
            Role::User => values.push(USER_RULE.to_string()),
            Role::Assistant => values.push("─".repeat(cols.saturating_sub(3))),
        }
    }

    values.push(String::new());
    window(values, viewport.rows, scroll_offset)
}

/// Slice the full line sequence down to the visible row count,
/// tail-anchored and clamped at the top.
fn window(values: Vec<String>, rows: u16, scroll_offset: usize) -> Vec<String> {
    let visible = (rows as usize).saturating_sub(CHROME_ROWS);
    if values.len() <= visible {
        return values;
    }
    let max_start = values.len() - visible;
    let start = max_start.saturating_sub(scroll_offset);
    values[start..start + visible].to_vec()
}

// ===== Tests =====
