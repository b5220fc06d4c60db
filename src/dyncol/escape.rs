//! Quoting rules for dynamic column literals
//!
//! Two flavours of quoting are used when building `COLUMN_CREATE` calls:
//!
//! - [`sql_literal`] for every key and scalar value. Quotes are backslash-escaped
//!   first, then the whole string is quoted ASCII-safe, so both layers survive.
//! - [`quote_readable`] for strings inside arrays. The array is later passed
//!   through [`sql_literal`] as one string, so this layer only has to keep the
//!   elements distinguishable.

use std::fmt::Write;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Escape and quote a key or scalar value as a SQL string literal
pub fn sql_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    quote_ascii(&escaped)
}

/// Double-quote a string, escaping everything outside printable ASCII
pub fn quote_ascii(value: &str) -> String {
    quote_with(value, true)
}

/// Double-quote a string, keeping printable non-ASCII characters as they are
pub fn quote_readable(value: &str) -> String {
    quote_with(value, false)
}

fn quote_with(value: &str, ascii_only: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        push_escaped(&mut out, c, ascii_only);
    }
    out.push('"');
    out
}

fn push_escaped(out: &mut String, c: char, ascii_only: bool) {
    if c == '"' || c == '\\' {
        out.push('\\');
        out.push(c);
        return;
    }

    let keep = if ascii_only {
        c.is_ascii() && is_printable(c)
    } else {
        is_printable(c)
    };
    if keep {
        out.push(c);
        return;
    }

    // Writing to a String cannot fail
    let _ = match c {
        '\u{07}' => out.write_str("\\a"),
        '\u{08}' => out.write_str("\\b"),
        '\u{0C}' => out.write_str("\\f"),
        '\n' => out.write_str("\\n"),
        '\r' => out.write_str("\\r"),
        '\t' => out.write_str("\\t"),
        '\u{0B}' => out.write_str("\\v"),
        c if (c as u32) < 0x20 || c == '\u{7F}' => write!(out, "\\x{:02x}", c as u32),
        c if (c as u32) < 0x10000 => write!(out, "\\u{:04x}", c as u32),
        c => write!(out, "\\U{:08x}", c as u32),
    };
}

/// Printable means a letter, mark, number, punctuation or symbol, or the ASCII space.
///
/// Controls, format characters, surrogates, private use, unassigned code
/// points and separators other than ' ' are non-printable.
fn is_printable(c: char) -> bool {
    if c.is_ascii() {
        return (' '..='~').contains(&c);
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quote_is_escaped_twice() {
        assert_eq!(sql_literal("it's"), r#""it\\'s""#);
    }

    #[test]
    fn test_double_quote_is_escaped_twice() {
        assert_eq!(sql_literal(r#"He said "hi""#), r#""He said \\\"hi\\\"""#);
    }

    #[test]
    fn test_plain_ascii() {
        assert_eq!(sql_literal("name"), "\"name\"");
        assert_eq!(sql_literal(""), "\"\"");
    }

    #[test]
    fn test_backslash() {
        assert_eq!(sql_literal(r"C:\tmp"), r#""C:\\tmp""#);
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(quote_ascii("a\tb\nc"), r#""a\tb\nc""#);
        assert_eq!(quote_ascii("\u{01}\u{7F}"), r#""\x01\x7f""#);
        assert_eq!(quote_ascii("\u{07}\u{08}\u{0B}\u{0C}\r"), r#""\a\b\v\f\r""#);
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        assert_eq!(sql_literal("héllo"), r#""h\u00e9llo""#);
        assert_eq!(sql_literal("😀"), r#""\U0001f600""#);
    }

    #[test]
    fn test_readable_keeps_unicode() {
        assert_eq!(quote_readable("héllo"), "\"héllo\"");
        assert_eq!(quote_readable(r#"a"b\"#), r#""a\"b\\""#);
        assert_eq!(quote_readable("no\u{A0}break"), r#""no\u00a0break""#);
        assert_eq!(quote_readable("line\n"), r#""line\n""#);
    }

    #[test]
    fn test_readable_escapes_invisible_and_unassigned() {
        assert_eq!(quote_readable("\u{0378}"), r#""\u0378""#);
        assert_eq!(quote_readable("\u{0600}\u{200B}"), r#""\u0600\u200b""#);
        assert_eq!(quote_readable("\u{E0001}"), r#""\U000e0001""#);
        assert_eq!(quote_readable("\u{E000}\u{2028}"), r#""\ue000\u2028""#);
        assert_eq!(quote_readable("日本"), "\"日本\"");
    }
}
