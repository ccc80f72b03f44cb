//! `.ini` reader and writer.
//!
//! Keys of the `[DEFAULT]` section are stored bare, keys of any other section
//! as `section.key`. The writer emits a single `[DEFAULT]` section.
//!
//! Multi-line values continue on lines indented by one tab. A carriage return
//! is written as `\r`; a backslash is doubled only where it would otherwise
//! read as part of an escape, so hand-written paths survive unchanged.

use super::ConfigStore;

const DEFAULT_SECTION: &str = "DEFAULT";

pub fn parse(text: &str) -> ConfigStore {
    let mut store = ConfigStore::new();
    let mut section: Option<String> = None;
    // Key and value of the entry that may still receive continuation lines.
    let mut open: Option<(String, String)> = None;

    for raw in text.lines() {
        if raw.starts_with([' ', '\t'])
            && let Some((_, value)) = open.as_mut()
        {
            value.push('\n');
            value.push_str(raw.strip_prefix('\t').unwrap_or_else(|| raw.trim_start()));
            continue;
        }

        if let Some((key, value)) = open.take() {
            store.insert(key, unescape(value.trim_end()));
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = name.trim();
            section = (name != DEFAULT_SECTION).then(|| name.to_string());
            continue;
        }

        let line = raw.trim_start();
        let Some(split) = line.find(['=', ':']) else {
            continue;
        };
        let key = line[..split].trim();
        let value = line[split + 1..].trim_start();
        let key = match &section {
            Some(section) => format!("{}.{}", section, key),
            None => key.to_string(),
        };
        open = Some((key, value.to_string()));
    }

    if let Some((key, value)) = open {
        store.insert(key, unescape(value.trim_end()));
    }

    store
}

pub fn render(store: &ConfigStore) -> String {
    let mut out = format!("[{}]\n", DEFAULT_SECTION);
    for (key, value) in store.iter() {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(&escape(value).replace('\n', "\n\t"));
        out.push('\n');
    }
    out.push('\n');
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => out.push_str("\\r"),
            '\\' if matches!(chars.peek(), Some('r' | '\\' | '\r')) => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

/// Decode `\\` and `\r`; any other backslash is literal.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(next) = chars.next_if(|n| matches!(n, 'r' | '\\'))
        {
            out.push(if next == 'r' { '\r' } else { '\\' });
        } else {
            out.push(c);
        }
    }
    out
}
