use std::{iter::Peekable, str::Chars};

/// Decode Java escape sequences in the body of a string or char literal.
///
/// Handles `\b \t \n \f \r \s \" \' \\`, octal escapes, `\uXXXX`
/// (including surrogate pairs and the `\uuuuXXXX` form) and the text block
/// line continuation. Invalid escapes are kept verbatim.
pub fn unescape_java(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            Some('\n') => {}
            Some(q @ ('"' | '\'' | '\\')) => out.push(q),
            Some('u') => match read_unicode_escape(&mut chars) {
                Some(decoded) => out.push(decoded),
                None => out.push_str("\\u"),
            },
            Some(d @ '0'..='7') => out.push(read_octal(d, &mut chars)),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Value of a `"""` text block, delimiters included.
///
/// The opening line is dropped, line terminators become `\n`, the common
/// indentation (closing line included) and trailing spaces are stripped, then
/// escapes are decoded.
pub fn text_block_value(raw: &str) -> String {
    let body = raw.strip_prefix("\"\"\"").unwrap_or(raw);
    let body = body.strip_suffix("\"\"\"").unwrap_or(body);
    let body = body.replace("\r\n", "\n").replace('\r', "\n");
    let content = match body.split_once('\n') {
        Some((opening, rest)) if opening.trim().is_empty() => rest,
        _ => body.as_str(),
    };

    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;
    let indent = lines
        .iter()
        .enumerate()
        .filter(|&(i, line)| i == last || !line.trim().is_empty())
        .map(|(_, line)| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| {
            let skip = line
                .char_indices()
                .nth(indent)
                .map_or(line.len(), |(idx, _)| idx);
            line[skip..].trim_end()
        })
        .collect();

    unescape_java(&stripped.join("\n"))
}

/// Read the rest of a `\u` escape (the `\u` itself already consumed).
fn read_unicode_escape(chars: &mut Peekable<Chars<'_>>) -> Option<char> {
    while chars.next_if_eq(&'u').is_some() {}
    let unit = read_hex4(chars)?;

    if (0xD800..0xDC00).contains(&unit) {
        // Look ahead for the low half of a surrogate pair.
        let mut ahead = chars.clone();
        if ahead.next() == Some('\\') && ahead.next() == Some('u') {
            while ahead.next_if_eq(&'u').is_some() {}
            if let Some(low) = read_hex4(&mut ahead)
                && (0xDC00..0xE000).contains(&low)
            {
                *chars = ahead;
                return char::decode_utf16([unit, low]).next()?.ok();
            }
        }
        return Some(char::REPLACEMENT_CHARACTER);
    }

    Some(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
}

fn read_hex4(chars: &mut Peekable<Chars<'_>>) -> Option<u16> {
    let mut ahead = chars.clone();
    let mut value: u16 = 0;
    for _ in 0..4 {
        let digit = ahead.next()?.to_digit(16)?;
        value = value * 16 + digit as u16;
    }
    *chars = ahead;
    Some(value)
}

/// Octal escapes: up to three digits when the first is 0-3, else up to two.
fn read_octal(first: char, chars: &mut Peekable<Chars<'_>>) -> char {
    let max_digits = if first <= '3' { 3 } else { 2 };
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 1..max_digits {
        match chars.peek().and_then(|c| c.to_digit(8)) {
            Some(d) => {
                value = value * 8 + d;
                chars.next();
            }
            None => break,
        }
    }
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}
