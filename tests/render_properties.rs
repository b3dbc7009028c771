//! Property-based tests for the wrap and viewport-windowing laws.

use proptest::prelude::*;
use ttychat::model::{Message, Role};
use ttychat::view::{render, wrap, RenderStyle, Viewport, CHROME_ROWS, MARGIN};
use unicode_width::UnicodeWidthStr;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant)]
}

fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(
        (arb_role(), "[a-zA-Z0-9 \n]{0,200}")
            .prop_map(|(role, content)| Message::new(role, content)),
        0..=max_len,
    )
}

// ===== Wrap properties =====

proptest! {
    #[test]
    fn wrapped_lines_never_exceed_width(
        content in "[a-zA-Z0-9 \n]{0,300}",
        width in 1usize..80
    ) {
        for line in wrap(&content, width) {
            prop_assert!(
                line.chars().count() <= width,
                "line {line:?} exceeds width {width}"
            );
        }
    }

    #[test]
    fn rewrap_at_same_width_is_identity(
        content in "[a-zA-Z0-9 ]{0,300}",
        width in 2usize..80
    ) {
        let once = wrap(&content, width);
        let again = wrap(&once.join("\n"), width);
        prop_assert_eq!(again, once);
    }

    #[test]
    fn wrap_preserves_all_non_space_characters(
        content in "[a-zA-Z0-9 ]{0,300}",
        width in 1usize..80
    ) {
        let joined: String = wrap(&content, width).join(" ");
        let expect: String = content.chars().filter(|c| *c != ' ').collect();
        let got: String = joined.chars().filter(|c| *c != ' ').collect();
        prop_assert_eq!(got, expect);
    }
}

// ===== Windowing properties =====

proptest! {
    #[test]
    fn render_returns_exactly_min_of_len_and_visible(
        messages in arb_messages(20),
        rows in 0u16..60,
        cols in 30u16..120,
        offset in 0usize..200
    ) {
        let style = RenderStyle::default();
        let full = render(&messages, Viewport::new(u16::MAX, cols), 0, &style);
        let lines = render(&messages, Viewport::new(rows, cols), offset, &style);
        let visible = (rows as usize).saturating_sub(CHROME_ROWS);
        prop_assert_eq!(lines.len(), full.len().min(visible));
    }

    #[test]
    fn offset_zero_always_shows_the_tail(
        messages in arb_messages(20),
        rows in 5u16..40,
        cols in 30u16..120
    ) {
        let full = render(&messages, Viewport::new(u16::MAX, cols), 0, &RenderStyle::default());
        let windowed = render(&messages, Viewport::new(rows, cols), 0, &RenderStyle::default());
        prop_assert_eq!(windowed.last(), full.last());
        let visible = (rows as usize).saturating_sub(CHROME_ROWS);
        prop_assert_eq!(windowed.len(), full.len().min(visible));
    }

    #[test]
    fn every_rendered_line_fits_the_viewport(
        messages in arb_messages(10),
        rows in 5u16..40,
        cols in 40u16..120,
        offset in 0usize..100
    ) {
        let style = RenderStyle::default();
        let lines = render(&messages, Viewport::new(rows, cols), offset, &style);
        for line in lines {
            prop_assert!(
                line.width() <= cols as usize,
                "line {line:?} wider than {cols} columns"
            );
        }
    }

    #[test]
    fn scrolling_by_one_shifts_content_by_one_line(
        messages in arb_messages(20),
        cols in 40u16..120
    ) {
        let style = RenderStyle::default();
        let rows = 10u16;
        let full = render(&messages, Viewport::new(u16::MAX, cols), 0, &style);
        let visible = (rows as usize).saturating_sub(CHROME_ROWS);
        prop_assume!(full.len() > visible + 1);

        let tail = render(&messages, Viewport::new(rows, cols), 0, &style);
        let shifted = render(&messages, Viewport::new(rows, cols), 1, &style);
        prop_assert_eq!(&shifted[1..], &tail[..visible - 1]);
    }
}

// ===== Fixed-point checks the properties lean on =====

#[test]
fn margin_and_chrome_constants_are_stable() {
    // The wrap budget and the reserved chrome rows are observable
    // layout contracts; changing them moves every line break.
    assert_eq!(MARGIN, 12);
    assert_eq!(CHROME_ROWS, 4);
}
