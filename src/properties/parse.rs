//! Parser for the flat `key=value` property file format.
//!
//! Entries are one per logical line, separated by `=`, `:`, or whitespace.
//! A `#` or `!` as the first non-blank character marks a comment line. A
//! physical line ending in a lone backslash continues onto the next one.
//! Keys and values may use backslash escapes, including `\uXXXX`.

/// A malformed escape sequence, reported with the logical line it started on.
#[derive(Debug)]
pub(crate) struct ParseError {
    pub(crate) line: usize,
}

/// Parses property text into key/value pairs in file order.
///
/// File order matters to the caller: merging by repeated insertion makes the
/// last occurrence of a key win.
pub(crate) fn parse(text: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut entries = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        // Assemble the logical line by following trailing-backslash
        // continuations; the next line's leading whitespace is dropped.
        let mut logical = trimmed.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let line_no = idx + 1;
        let (key, value) = split_entry(&logical);
        let key = unescape(key).ok_or(ParseError { line: line_no })?;
        let value = unescape(value).ok_or(ParseError { line: line_no })?;
        entries.push((key, value));
    }

    Ok(entries)
}

/// A line ending in an odd number of backslashes continues onto the next.
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits a logical line into raw (still escaped) key and value parts.
///
/// The key ends at the first unescaped `=`, `:`, or whitespace character.
/// When the key was ended by whitespace, a single `=` or `:` may still
/// follow before the value. The value runs to the end of the line, with its
/// leading whitespace dropped.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut split = None;

    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                split = Some((i, i + 1, true));
                break;
            }
            c if c.is_whitespace() => {
                split = Some((i, i + c.len_utf8(), false));
                break;
            }
            _ => {}
        }
    }

    let Some((key_end, rest_start, explicit)) = split else {
        return (line, "");
    };

    let key = &line[..key_end];
    let mut rest = &line[rest_start..];

    if !explicit {
        rest = rest.trim_start();
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }

    (key, rest.trim_start())
}

/// Resolves backslash escapes. Returns `None` on a malformed `\uXXXX`.
///
/// A backslash before a character without special meaning is dropped, so
/// `\ `, `\=`, and `\:` yield the bare character.
fn unescape(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => {
                let mut code = 0;
                for _ in 0..4 {
                    let digit = chars.next().and_then(|c| c.to_digit(16))?;
                    code = code * 16 + digit;
                }
                out.push(char::from_u32(code)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Some(out)
}
