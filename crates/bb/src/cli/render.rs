//! Escape-aware text layout for tabular terminal output.
//!
//! Cells handed to the table renderer may already carry SGR color escapes
//! (from [`super::color`]), so width math has to run on the *visible* text.
//! The rules:
//!
//! - Width is measured on the escape-stripped string, one code point per
//!   display column.
//! - Padding wraps the original string, so embedded escapes survive.
//! - Truncation works on the stripped string and appends a `...` suffix;
//!   a truncated cell therefore loses its color rather than risking a
//!   half-emitted escape bleeding into the rest of the line.
//!
//! The only escape grammar recognized is `ESC [ <digits and semicolons> m`,
//! the SGR form this program itself emits. Anything else passes through
//! and counts toward width.
//!
//! All functions are pure; callers own the printing.

use chrono::{DateTime, Utc};
use colored::Colorize;

const ELLIPSIS: &str = "...";
const COLUMN_SEPARATOR: &str = "  ";

/// Text alignment within a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Right-align text (pad on the left).
    Right,
}

/// A table column: header text, width in display columns, alignment.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
            align: Align::Left,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Removes every `ESC [ <digits and semicolons> m` sequence. All other
/// characters, including unrecognized escape sequences, pass through.
pub fn strip_sgr(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == 0x1b {
            if let Some(len) = sgr_len(&bytes[i..]) {
                // ESC is ASCII, so both cut points are char boundaries.
                out.push_str(&text[start..i]);
                i += len;
                start = i;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&text[start..]);
    out
}

/// Byte length of the SGR sequence at the start of `bytes`, if one is there.
fn sgr_len(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return None;
    }
    let mut i = 2;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b';') {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'm' {
        Some(i + 1)
    } else {
        None
    }
}

/// Display columns the string occupies once SGR sequences are removed.
pub fn visible_width(text: &str) -> usize {
    strip_sgr(text).chars().count()
}

/// Fits `text` to exactly `width` visible columns.
///
/// Over-wide text is truncated (on the stripped string) to `width - 3`
/// characters plus `...`; for widths under 3 the result is the ellipsis
/// clipped to `width`. Text that fits is padded with spaces (after it for
/// left alignment, before it for right), preserving any embedded escapes.
pub fn pad_or_truncate(text: &str, width: usize, align: Align) -> String {
    let plain = strip_sgr(text);
    let visible = plain.chars().count();

    if visible > width {
        if width <= ELLIPSIS.len() {
            return ELLIPSIS.chars().take(width).collect();
        }
        let keep = width - ELLIPSIS.len();
        let mut truncated: String = plain.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        return truncated;
    }

    let padding = " ".repeat(width - visible);
    match align {
        Align::Right => format!("{}{}", padding, text),
        Align::Left => format!("{}{}", text, padding),
    }
}

/// Renders an aligned table: bold header line, dashed separator, one line
/// per row, cells joined by a two-space gutter.
///
/// Every row must have exactly `columns.len()` cells; a mismatch is a bug
/// in the caller and panics rather than producing a skewed table.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header = columns
        .iter()
        .map(|col| pad_or_truncate(&col.header, col.width, col.align))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    lines.push(header.bold().to_string());

    let separator = columns
        .iter()
        .map(|col| "-".repeat(col.width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    lines.push(separator);

    for row in rows {
        assert_eq!(
            row.len(),
            columns.len(),
            "table row has {} cells for {} columns",
            row.len(),
            columns.len()
        );
        let line = row
            .iter()
            .zip(columns)
            .map(|(cell, col)| pad_or_truncate(cell, col.width, col.align))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);
        lines.push(line);
    }

    lines
}

/// `Key: value` with a bold key.
pub fn key_value(key: &str, value: &str) -> String {
    format!("{}: {}", key.bold(), value)
}

/// Section heading surrounded by blank lines.
pub fn section(title: &str) -> String {
    format!("\n{}\n", title.bold().cyan())
}

/// Coarse age of a timestamp: `just now`, `{N}m ago`, `{N}h ago`,
/// `{N}d ago`, then an absolute date past a week. Buckets are checked
/// finest-first with exclusive upper bounds, so exactly 60 elapsed minutes
/// reads `1h ago`. Timestamps in the future degrade to `just now`.
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    if days < 7 {
        return format!("{}d ago", days);
    }
    format_date(timestamp)
}

/// Short absolute date, e.g. `Mar 2, 2024`.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// Short absolute date and time, e.g. `Mar 2, 2024, 11:30 AM`.
pub fn format_datetime(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::color::colorize;
    use chrono::{Duration, TimeZone};

    // =====================================================================
    // strip_sgr / visible_width
    // =====================================================================

    #[test]
    fn strip_removes_color_and_reset_sequences() {
        let colored = "\x1b[38;5;196mred\x1b[0m plain";
        assert_eq!(strip_sgr(colored), "red plain");
    }

    #[test]
    fn strip_leaves_plain_text_untouched() {
        assert_eq!(strip_sgr("hello"), "hello");
        assert_eq!(strip_sgr(""), "");
    }

    #[test]
    fn strip_is_idempotent() {
        let colored = "\x1b[1mbold\x1b[0m and \x1b[38;5;42mgreen\x1b[0m";
        let once = strip_sgr(colored);
        assert_eq!(strip_sgr(&once), once);
    }

    #[test]
    fn strip_ignores_non_sgr_sequences() {
        // Cursor movement is not SGR; it passes through untouched.
        assert_eq!(strip_sgr("\x1b[2Jtext"), "\x1b[2Jtext");
        assert_eq!(strip_sgr("lone \x1b esc"), "lone \x1b esc");
    }

    #[test]
    fn strip_handles_unterminated_sequence() {
        assert_eq!(strip_sgr("\x1b[38;5;19"), "\x1b[38;5;19");
    }

    #[test]
    fn visible_width_ignores_escape_bytes() {
        let colored = colorize("OPEN", Some("#2da44e"));
        assert!(colored.len() > 4);
        assert_eq!(visible_width(&colored), 4);
    }

    #[test]
    fn visible_width_counts_code_points() {
        assert_eq!(visible_width("a → b"), 5);
    }

    // =====================================================================
    // pad_or_truncate
    // =====================================================================

    #[test]
    fn pad_reaches_exact_width_for_both_alignments() {
        assert_eq!(pad_or_truncate("42", 4, Align::Right), "  42");
        assert_eq!(pad_or_truncate("42", 4, Align::Left), "42  ");
    }

    #[test]
    fn pad_no_op_at_exact_width() {
        assert_eq!(pad_or_truncate("abcd", 4, Align::Left), "abcd");
    }

    #[test]
    fn padded_colored_text_keeps_escapes_and_width() {
        let colored = colorize("OPEN", Some("#2da44e"));
        let padded = pad_or_truncate(&colored, 12, Align::Left);
        assert_eq!(visible_width(&padded), 12);
        assert!(padded.contains("\x1b[38;5;"));
        assert!(padded.ends_with("        "));
    }

    #[test]
    fn truncation_appends_ellipsis_at_exact_width() {
        let result = pad_or_truncate("a long pull request title", 10, Align::Left);
        assert_eq!(result, "a long ...");
        assert_eq!(visible_width(&result), 10);
    }

    #[test]
    fn truncation_drops_embedded_color() {
        let colored = colorize("a long pull request title", Some("#ff0000"));
        let result = pad_or_truncate(&colored, 10, Align::Left);
        assert_eq!(result, "a long ...");
        assert!(!result.contains('\x1b'));
    }

    #[test]
    fn truncation_never_underflows_tiny_widths() {
        assert_eq!(pad_or_truncate("abcdef", 3, Align::Left), "...");
        assert_eq!(pad_or_truncate("abcdef", 2, Align::Left), "..");
        assert_eq!(pad_or_truncate("abcdef", 1, Align::Left), ".");
        assert_eq!(pad_or_truncate("abcdef", 0, Align::Left), "");
    }

    #[test]
    fn width_invariant_holds_across_inputs() {
        let samples = [
            "".to_string(),
            "short".to_string(),
            "exactly ten".to_string(),
            "something much longer than the target width".to_string(),
            colorize("colored text", Some("#8250df")),
        ];
        for text in &samples {
            for width in [4usize, 10, 20] {
                for align in [Align::Left, Align::Right] {
                    let fitted = pad_or_truncate(text, width, align);
                    assert_eq!(
                        visible_width(&fitted),
                        width,
                        "text={:?} width={}",
                        text,
                        width
                    );
                }
            }
        }
    }

    // =====================================================================
    // render_table
    // =====================================================================

    #[test]
    fn table_renders_header_separator_and_rows() {
        colored::control::set_override(false);
        let columns = [Column::new("ID", 4).align(Align::Right)];
        let rows = vec![vec!["42".to_string()]];
        let lines = render_table(&columns, &rows);
        assert_eq!(lines, vec!["  ID", "----", "  42"]);
    }

    #[test]
    fn table_rows_line_up_across_columns() {
        colored::control::set_override(false);
        let columns = [
            Column::new("ID", 4).align(Align::Right),
            Column::new("Title", 10),
        ];
        let rows = vec![
            vec!["#1".to_string(), "short".to_string()],
            vec!["#23".to_string(), "a very long title".to_string()],
        ];
        let lines = render_table(&columns, &rows);
        assert_eq!(lines[2], "  #1  short     ");
        assert_eq!(lines[3], " #23  a very ...");
        for line in &lines[2..] {
            assert_eq!(visible_width(line), 4 + 2 + 10);
        }
    }

    #[test]
    #[should_panic(expected = "table row has")]
    fn table_panics_on_row_length_mismatch() {
        let columns = [Column::new("ID", 4)];
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        render_table(&columns, &rows);
    }

    // =====================================================================
    // time formatting
    // =====================================================================

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        let cases = [
            (Duration::seconds(0), "just now"),
            (Duration::seconds(30), "just now"),
            (Duration::minutes(1), "1m ago"),
            (Duration::minutes(59), "59m ago"),
            (Duration::minutes(60), "1h ago"),
            (Duration::hours(23), "23h ago"),
            (Duration::hours(24), "1d ago"),
            (Duration::days(6), "6d ago"),
        ];
        for (elapsed, expected) in cases {
            assert_eq!(
                format_relative_time(now - elapsed),
                expected,
                "elapsed {:?}",
                elapsed
            );
        }
    }

    #[test]
    fn relative_time_future_reads_just_now() {
        assert_eq!(
            format_relative_time(Utc::now() + Duration::minutes(5)),
            "just now"
        );
    }

    #[test]
    fn relative_time_past_a_week_is_an_absolute_date() {
        let timestamp = Utc::now() - Duration::days(10);
        assert_eq!(format_relative_time(timestamp), format_date(timestamp));
    }

    #[test]
    fn absolute_date_formats() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 2, 11, 30, 0).unwrap();
        assert_eq!(format_date(timestamp), "Mar 2, 2024");
        assert_eq!(format_datetime(timestamp), "Mar 2, 2024, 11:30 AM");
    }

    #[test]
    fn absolute_datetime_pads_the_hour() {
        let timestamp = Utc.with_ymd_and_hms(2024, 12, 25, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(timestamp), "Dec 25, 2024, 02:05 PM");
    }
}
