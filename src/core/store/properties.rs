//! `.properties` reader and writer.

use super::ConfigStore;

pub const HEADER: &str = "# 自动生成的国际化配置文件\n# Auto-generated i18n configuration file\n\n";

pub fn parse(text: &str) -> ConfigStore {
    let mut store = ConfigStore::new();

    for line in logical_lines(text) {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = split_entry(line);
        store.insert(unescape(key.trim()), unescape(value.trim()));
    }

    store
}

/// Key of a single physical entry line, `None` for blanks and comments.
pub fn entry_key(line: &str) -> Option<String> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return None;
    }
    Some(unescape(split_entry(line).0.trim()))
}

/// Join physical lines ending in an odd number of backslashes.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let piece = match current {
            Some(_) => raw.trim_start(),
            None => raw,
        };
        let trailing = piece.chars().rev().take_while(|&c| c == '\\').count();
        let continued = trailing % 2 == 1;
        let piece = if continued {
            &piece[..piece.len() - 1]
        } else {
            piece
        };

        let mut line = current.take().unwrap_or_default();
        line.push_str(piece);
        if continued {
            current = Some(line);
        } else {
            lines.push(line);
        }
    }
    lines.extend(current);

    lines
}

/// Split at the first unescaped `=` or `:`, else at the first unescaped
/// whitespace.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut whitespace_at = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], &line[i + 1..]),
            c if c.is_whitespace() && whitespace_at.is_none() => whitespace_at = Some(i),
            _ => {}
        }
    }

    match whitespace_at {
        Some(i) => (&line[..i], &line[i..]),
        None => (line, ""),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().filter(|_| hex.len() == 4) {
                    Some(code) => {
                        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        chars.nth(3);
                    }
                    None => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' | ':' | ' ' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

pub fn render(store: &ConfigStore) -> String {
    let mut out = String::from(HEADER);
    for (key, value) in store.iter() {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}
