//! Common utilities for document generation.
//!
//! Shared helpers for building Typst markup from free text.

use std::path::Path;

/// Typst's forced line break, emitted between the lines of a multi-line cell.
pub const TYPST_LINEBREAK: &str = "#linebreak()";

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
        .replace('\t', r"\t")
}

/// Quote a value as a Typst string literal.
pub fn typst_string(value: &str) -> String {
    format!("\"{}\"", escape_typst_string(value))
}

/// Inline markup for a text value, one string literal per line joined by
/// [`TYPST_LINEBREAK`].
///
/// User text never reaches the markup unescaped, so characters like `*` or `#`
/// are printed as typed.
pub fn typst_text(value: &str) -> String {
    value
        .split('\n')
        .map(|line| format!("#{}", typst_string(line)))
        .collect::<Vec<_>>()
        .join(TYPST_LINEBREAK)
}

/// Content block (`[...]`) for a text value.
pub fn typst_content(value: &str) -> String {
    format!("[{}]", typst_text(value))
}

/// Count the forced line breaks in a piece of generated markup.
pub fn count_linebreaks(markup: &str) -> usize {
    markup.matches(TYPST_LINEBREAK).count()
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
