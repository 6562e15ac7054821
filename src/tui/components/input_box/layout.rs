//! Wrapping and cursor geometry for the input box.
//!
//! Pure functions over `(text, width)`; nothing here knows about ratatui.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders.
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the box starts scrolling internally.
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from the area edge to the first content cell (border + padding).
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Width available for text inside the bordered, padded block.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Every display line of `text`, with explicit newlines kept as line breaks.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let options = wrap_options(width);
    let mut lines = Vec::new();
    for logical in text.split('\n') {
        let wrapped = textwrap::wrap(logical, &options);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped.into_iter().map(|line| line.into_owned()));
        }
    }
    lines
}

pub(super) fn line_count(text: &str, width: u16) -> u16 {
    wrapped_lines(text, width).len() as u16
}

/// `(row, column)` of the byte offset `pos` within the wrapped text.
pub(super) fn cursor_position(text: &str, pos: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }

    let before = &text[..pos];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let rows_above = if line_start == 0 {
        0
    } else {
        line_count(&before[..line_start - 1], width)
    };

    let current = &before[line_start..];
    let segments = textwrap::wrap(current, wrap_options(width));
    let row_in_line = segments.len().saturating_sub(1) as u16;
    let consumed: usize = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .map(|segment| segment.width())
        .sum();
    let column = current.width().saturating_sub(consumed) as u16;

    (rows_above + row_in_line, column.min(width))
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}
