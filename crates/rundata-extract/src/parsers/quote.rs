//! Double-quoted string literal unquoting
//!
//! Follows Go interpreted string literal rules: `\a \b \f \n \r \t \v \\ \"`,
//! `\xHH`, three-digit octal `\ooo`, `\uHHHH` and `\UHHHHHHHH`. Byte escapes
//! must combine into valid UTF-8.

use std::str::CharIndices;

/// Errors while unquoting a string literal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnquoteError {
    /// Input does not start with `"`
    #[error("missing opening quote")]
    MissingOpeningQuote,

    /// No closing `"`
    #[error("unterminated string literal")]
    Unterminated,

    /// Raw newline inside the literal
    #[error("newline in string literal")]
    Newline,

    /// Unknown or incomplete escape
    #[error("invalid escape sequence: {0}")]
    InvalidEscape(String),

    /// Byte escapes do not form valid UTF-8
    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,

    /// Non-comment text after the closing quote
    #[error("unexpected text after string literal: {0}")]
    TrailingText(String),
}

/// Unquote a complete literal
///
/// Trailing whitespace and a trailing `//` comment are allowed.
///
/// # Errors
/// Any [`UnquoteError`]
pub fn unquote(input: &str) -> Result<String, UnquoteError> {
    let (value, rest) = unquote_prefix(input)?;
    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with("//") {
        Ok(value)
    } else {
        Err(UnquoteError::TrailingText(rest.to_string()))
    }
}

/// Unquote the literal at the start of `input`, returning it and the rest
fn unquote_prefix(input: &str) -> Result<(String, &str), UnquoteError> {
    let mut chars = input.char_indices();
    if !matches!(chars.next(), Some((_, '"'))) {
        return Err(UnquoteError::MissingOpeningQuote);
    }

    let mut out: Vec<u8> = Vec::with_capacity(input.len());
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let value = String::from_utf8(out).map_err(|_| UnquoteError::InvalidUtf8)?;
                return Ok((value, &input[i + 1..]));
            }
            '\n' => return Err(UnquoteError::Newline),
            '\\' => unescape(&mut chars, &mut out)?,
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    Err(UnquoteError::Unterminated)
}

fn unescape(chars: &mut CharIndices<'_>, out: &mut Vec<u8>) -> Result<(), UnquoteError> {
    let (_, esc) = chars.next().ok_or(UnquoteError::Unterminated)?;
    let byte = match esc {
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0c,
        'n' => b'\n',
        'r' => b'\r',
        't' => b'\t',
        'v' => 0x0b,
        '\\' => b'\\',
        '"' => b'"',
        'x' => {
            let value = take_digits(chars, 2, 16, esc)?;
            // Two hex digits always fit
            u8::try_from(value).map_err(|_| UnquoteError::InvalidEscape(format!("\\x{value:x}")))?
        }
        '0'..='7' => {
            let rest = take_digits(chars, 2, 8, esc)?;
            let value = (esc as u32 - '0' as u32) * 64 + rest;
            u8::try_from(value).map_err(|_| UnquoteError::InvalidEscape(format!("\\{value:o}")))?
        }
        'u' | 'U' => {
            let width = if esc == 'u' { 4 } else { 8 };
            let value = take_digits(chars, width, 16, esc)?;
            let c = char::from_u32(value)
                .ok_or_else(|| UnquoteError::InvalidEscape(format!("\\{esc}{value:x}")))?;
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            return Ok(());
        }
        other => return Err(UnquoteError::InvalidEscape(format!("\\{other}"))),
    };
    out.push(byte);
    Ok(())
}

fn take_digits(
    chars: &mut CharIndices<'_>,
    count: usize,
    radix: u32,
    esc: char,
) -> Result<u32, UnquoteError> {
    let mut value = 0u32;
    for _ in 0..count {
        let (_, c) = chars.next().ok_or(UnquoteError::Unterminated)?;
        let digit = c
            .to_digit(radix)
            .ok_or_else(|| UnquoteError::InvalidEscape(format!("\\{esc}..{c}")))?;
        value = value * radix + digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_literal() {
        assert_eq!(unquote(r#""XX-1.1""#).unwrap(), "XX-1.1");
        assert_eq!(unquote(r#""""#).unwrap(), "");
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(
            unquote(r#""a\"b\\c\nd\te""#).unwrap(),
            "a\"b\\c\nd\te"
        );
        assert_eq!(unquote(r#""\a\b\f\r\v""#).unwrap(), "\u{7}\u{8}\u{c}\r\u{b}");
    }

    #[test]
    fn numeric_escapes() {
        assert_eq!(unquote(r#""\x41\102""#).unwrap(), "AB");
        assert_eq!(unquote(r#""é\U0001F600""#).unwrap(), "é😀");
        // UTF-8 bytes of 'é' spelled out
        assert_eq!(unquote(r#""\xc3\xa9""#).unwrap(), "é");
    }

    #[test]
    fn utf8_passthrough() {
        assert_eq!(unquote("\"Größe ✓\"").unwrap(), "Größe ✓");
    }

    #[test]
    fn trailing_comment_allowed() {
        assert_eq!(unquote(r#""v"   // note"#).unwrap(), "v");
        assert_eq!(unquote("\"v\"  \t").unwrap(), "v");
    }

    #[test]
    fn trailing_text_rejected() {
        assert!(matches!(
            unquote(r#""v" + suffix"#),
            Err(UnquoteError::TrailingText(_))
        ));
    }

    #[test]
    fn unterminated() {
        assert_eq!(unquote(r#""unterminated"#), Err(UnquoteError::Unterminated));
        assert_eq!(unquote(r#""ends in escape\"#), Err(UnquoteError::Unterminated));
    }

    #[test]
    fn invalid_escapes() {
        for input in [r#""\q""#, r#""\'""#, r#""\xZZ""#, r#""\400""#, r#""\ud800""#, r#""\0""#] {
            assert!(
                matches!(unquote(input), Err(UnquoteError::InvalidEscape(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn invalid_utf8_bytes() {
        assert_eq!(unquote(r#""\xff""#), Err(UnquoteError::InvalidUtf8));
    }

    #[test]
    fn missing_opening_quote() {
        assert_eq!(unquote("XX-1.1"), Err(UnquoteError::MissingOpeningQuote));
        assert_eq!(unquote(""), Err(UnquoteError::MissingOpeningQuote));
    }

    #[test]
    fn newline_rejected() {
        assert_eq!(unquote("\"a\nb\""), Err(UnquoteError::Newline));
    }
}
