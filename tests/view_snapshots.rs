//! Snapshot tests pinning the exact rendered line sequences.
//!
//! Line breaks, prefixes, separators, and window placement are all
//! observable; these snapshots freeze them.

use ttychat::model::Message;
use ttychat::view::{render, RenderStyle, Viewport};

#[test]
fn two_turn_conversation_renders_verbatim() {
    let messages = vec![
        Message::user("hello world"),
        Message::assistant("hi there, how can I help you today?"),
    ];

    let lines = render(&messages, Viewport::new(24, 44), 0, &RenderStyle::default());

    insta::assert_debug_snapshot!(lines, @r###"
    [
        "",
        " ❯❯ hello world",
        "──────",
        "    ❮❮ hi there, how can I help",
        "       you today?",
        "─────────────────────────────────────────",
        "",
    ]
    "###);
}

#[test]
fn window_at_offset_zero_shows_the_tail() {
    let messages = vec![
        Message::user("one"),
        Message::user("two"),
        Message::user("three"),
        Message::user("four"),
        Message::user("five"),
    ];

    let lines = render(&messages, Viewport::new(8, 40), 0, &RenderStyle::default());

    insta::assert_debug_snapshot!(lines, @r###"
    [
        "──────",
        " ❯❯ five",
        "──────",
        "",
    ]
    "###);
}

#[test]
fn window_scrolled_up_shows_older_content() {
    let messages = vec![
        Message::user("one"),
        Message::user("two"),
        Message::user("three"),
        Message::user("four"),
        Message::user("five"),
    ];

    let lines = render(&messages, Viewport::new(8, 40), 3, &RenderStyle::default());

    insta::assert_debug_snapshot!(lines, @r###"
    [
        " ❯❯ three",
        "──────",
        " ❯❯ four",
        "──────",
    ]
    "###);
}

#[test]
fn empty_conversation_placeholder_renders_verbatim() {
    let lines = render(&[], Viewport::new(24, 80), 0, &RenderStyle::default());

    insta::assert_debug_snapshot!(lines, @r###"
    [
        "",
        "    NEW CONVERSATION",
        "    > waiting for prompt ...",
        "",
    ]
    "###);
}
