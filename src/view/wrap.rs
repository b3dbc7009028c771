//! Greedy first-fit word wrap.
//!
//! Line-break positions are an observable property of the UI, so the
//! policy here is exact and deliberately simple: no look-ahead, no
//! hyphenation, no re-balancing of earlier lines.

/// Wrap `content` into lines of at most `width` characters.
///
/// Content splits on `\n` first (each piece wraps independently and an
/// empty piece survives as a blank line). Within a piece, space-separated
/// words pack greedily: a word joins the current line only if
/// `line_len + word_len + 1 < width`. A word of `width` characters or
/// more is hard-split into `width`-sized chunks so no emitted line ever
/// exceeds the budget.
///
/// Lengths are counted in characters, not bytes, so multi-byte text
/// never splits inside a code point.
pub fn wrap(content: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for unit in content.split('\n') {
        wrap_unit(unit, width, &mut lines);
    }
    lines
}

fn wrap_unit(unit: &str, width: usize, out: &mut Vec<String>) {
    let start_count = out.len();
    let mut line = String::new();
    let mut line_len = 0usize;
    let mut line_started = false;

    for word in unit.split(' ') {
        let word_len = word.chars().count();
        if line_len + word_len + 1 < width {
            if line_started {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
            line_started = true;
        } else {
            if line_started {
                out.push(std::mem::take(&mut line));
            }
            let rest = push_chunks(word, width, out);
            line_len = rest.chars().count();
            line = rest;
            line_started = true;
        }
    }

    if line_started && !line.is_empty() {
        out.push(line);
    }
    // An empty unit (blank source line) still occupies one display line.
    if out.len() == start_count {
        out.push(String::new());
    }
}

/// Emit `width`-sized chunks of an over-wide word, returning the
/// remainder (at most `width` characters) as the new current line.
fn push_chunks(word: &str, width: usize, out: &mut Vec<String>) -> String {
    let mut rest = word;
    while rest.chars().count() > width {
        let split_at = rest
            .char_indices()
            .nth(width)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        out.push(rest[..split_at].to_string());
        rest = &rest[split_at..];
    }
    rest.to_string()
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_stays_on_one_line() {
        assert_eq!(wrap("hello world", 40), ["hello world"]);
    }

    #[test]
    fn words_pack_greedily_until_budget() {
        // width 10: "aaa bbb" is 7 chars, adding " ccc" would need
        // 7 + 3 + 1 = 11 which is not < 10, so "ccc" starts a new line.
        assert_eq!(wrap("aaa bbb ccc", 10), ["aaa bbb", "ccc"]);
    }

    #[test]
    fn greedy_break_has_no_lookahead() {
        // A smarter wrapper could balance these; the greedy policy
        // must not.
        assert_eq!(wrap("aa bb cccccc", 8), ["aa bb", "cccccc"]);
    }

    #[test]
    fn newlines_are_hard_breaks() {
        assert_eq!(wrap("one\ntwo", 40), ["one", "two"]);
    }

    #[test]
    fn blank_source_lines_survive() {
        assert_eq!(wrap("para one\n\npara two", 40), ["para one", "", "para two"]);
    }

    #[test]
    fn empty_content_is_one_blank_line() {
        assert_eq!(wrap("", 40), [""]);
    }

    #[test]
    fn overlong_word_splits_into_width_chunks() {
        let word = "x".repeat(25);
        assert_eq!(wrap(&word, 10), ["xxxxxxxxxx", "xxxxxxxxxx", "xxxxx"]);
    }

    #[test]
    fn exact_multiple_word_splits_cleanly() {
        let word = "y".repeat(20);
        assert_eq!(wrap(&word, 10), ["yyyyyyyyyy", "yyyyyyyyyy"]);
    }

    #[test]
    fn chunk_remainder_accepts_following_words() {
        // 12-char word at width 10 leaves "zz" as the open line; "a"
        // then joins it.
        assert_eq!(wrap("zzzzzzzzzzzz a", 10), ["zzzzzzzzzz", "zz a"]);
    }

    #[test]
    fn no_line_ever_exceeds_width() {
        let text = "the quick brown fox jumps over the lazy dog and keeps running";
        for width in 1..30 {
            for line in wrap(text, width) {
                assert!(
                    line.chars().count() <= width,
                    "line {line:?} exceeds width {width}"
                );
            }
        }
    }

    #[test]
    fn rewrap_at_same_width_is_identity() {
        let text = "greedy wrapping must be stable when its own output is rejoined and wrapped again at the same width";
        for width in 6..40 {
            let once = wrap(text, width);
            let again = wrap(&once.join("\n"), width);
            assert_eq!(again, once, "rewrap changed boundaries at width {width}");
        }
    }

    #[test]
    fn width_one_degenerates_to_single_chars() {
        assert_eq!(wrap("ab c", 1), ["a", "b", "c"]);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld ünïcödé";
        for line in wrap(text, 7) {
            assert!(line.chars().count() <= 7);
        }
    }
}
