//! Key generation.
//!
//! A key is `[module_prefix.]base`. The base comes from a [`KeyStrategy`];
//! the deterministic base is a normalized slug of the value, replaced by a
//! content hash when too short and shortened with a hash suffix when too long.

mod strategy;

pub use strategy::{Deterministic, KeyStrategy, Remote, SuggestKey, Suggestion, sanitize_slug};

pub const DEFAULT_MIN_KEY_LENGTH: usize = 3;
pub const DEFAULT_MAX_KEY_LENGTH: usize = 50;

/// Length bounds for a base key, in characters, module prefix excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for KeyRules {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_KEY_LENGTH,
            max_length: DEFAULT_MAX_KEY_LENGTH,
        }
    }
}

/// Hex MD5 digest of `value`.
fn digest(value: &str) -> String {
    format!("{:x}", md5::compute(value.as_bytes()))
}

/// Lower-case alphanumerics joined by single underscores.
pub fn normalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Deterministic base key for `value`.
///
/// ```
/// use i18n4j::core::keys::{KeyRules, base_key};
///
/// assert_eq!(base_key("用户不存在!", KeyRules::default()), "用户不存在");
/// assert_eq!(base_key("Save & Exit 保存", KeyRules::default()), "save_exit_保存");
/// ```
pub fn base_key(value: &str, rules: KeyRules) -> String {
    let normalized = normalize(value);
    let length = normalized.chars().count();

    if length < rules.min_length {
        return format!("str_{}", &digest(value)[..8]);
    }

    if length > rules.max_length {
        let keep = rules.max_length.saturating_sub(4);
        let head: String = normalized.chars().take(keep).collect();
        return format!("{}_{}", head.trim_end_matches('_'), &digest(value)[..3]);
    }

    normalized
}

/// Join an optional module prefix and a base key.
pub fn qualify(prefix: Option<&str>, base: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}.{}", prefix, base),
        _ => base.to_string(),
    }
}

/// First of `candidate`, `candidate_1`, `candidate_2`, ... not yet taken.
pub fn disambiguate(candidate: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(candidate) {
        return candidate.to_string();
    }
    (1..)
        .map(|n| format!("{}_{}", candidate, n))
        .find(|key| !is_taken(key))
        .unwrap_or_else(|| candidate.to_string())
}
