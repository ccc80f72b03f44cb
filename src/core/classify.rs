//! Human-visible text classifier.
//!
//! Filters run cheapest first; the script test runs last.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::utils::contains_non_ascii;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    PackagePath,
    FilePath,
    Url,
    Sql,
    Regex,
    Keyword,
    LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Blank,
    Identifier,
    Numeric,
    Structural(Shape),
    /// Only ASCII letters, digits and punctuation.
    AsciiOnly,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Blank => write!(f, "blank"),
            RejectReason::Identifier => write!(f, "identifier"),
            RejectReason::Numeric => write!(f, "numeric"),
            RejectReason::Structural(shape) => write!(f, "{:?}", shape),
            RejectReason::AsciiOnly => write!(f, "ascii-only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected(RejectReason),
}

impl Classification {
    pub fn is_accepted(self) -> bool {
        matches!(self, Classification::Accepted)
    }
}

const KEYWORDS: &[&str] = &["true", "false", "null"];
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error", "fatal"];

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.]*$").unwrap());

static CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_]+$").unwrap());

static PACKAGE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(import\s+)?[A-Za-z_$][\w$]*(\.[\w$]+)+(\.\*)?;?$").unwrap()
});

static FILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(/|\./|\.\./|~/|[A-Za-z]:[\\/]|classpath\*?:|file:)\S*$").unwrap()
});

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[^\s/\\]+\.(java|class|jar|xml|properties|json|ya?ml|txt|csv|xlsx?|docx?|pdf|png|jpe?g|gif|svg|html?|js|css|sql|log|zip|ftl|vm|jsp)$",
    )
    .unwrap()
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z][a-z0-9+.-]*://|www\.|mailto:)\S+$").unwrap()
});

static SQL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^\s*(select\s.+\sfrom\s|insert\s+into\s|update\s+\S+\s+set\s|delete\s+from\s|(create|alter|drop)\s+(table|index|view)\s)",
    )
    .unwrap()
});

/// A bare `]{n}` counts only when the class holds a range or an escape;
/// `[标签]{0}` is a bracketed tag followed by a placeholder.
static REGEX_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\^|[^\\]\$$|\\[dDwWsSbB]|\(\?[:=!<]|\[[^\]]*\][+*?]|\[[^\]]*\]\{\d+,\d*\}|\[\^?[^\]\s]*(\\\S|[^\\\s]-[^\s\]])[^\]\s]*\]\{\d+\}",
    )
    .unwrap()
});

/// Decide whether `value` is human-visible text worth extracting.
pub fn classify(value: &str) -> Classification {
    use Classification::Rejected;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Rejected(RejectReason::Blank);
    }

    let lower = trimmed.to_lowercase();
    if KEYWORDS.contains(&lower.as_str()) {
        return Rejected(RejectReason::Structural(Shape::Keyword));
    }
    if LOG_LEVELS.contains(&lower.as_str()) {
        return Rejected(RejectReason::Structural(Shape::LogLevel));
    }

    if IDENTIFIER.is_match(trimmed) || CONSTANT.is_match(trimmed) {
        return Rejected(RejectReason::Identifier);
    }

    if is_numeric(trimmed) {
        return Rejected(RejectReason::Numeric);
    }

    if let Some(shape) = structural_shape(trimmed) {
        return Rejected(RejectReason::Structural(shape));
    }

    if contains_non_ascii(trimmed) {
        Classification::Accepted
    } else {
        Rejected(RejectReason::AsciiOnly)
    }
}

/// Digits (any script) with optional sign, separators and percent.
fn is_numeric(value: &str) -> bool {
    value.chars().any(char::is_numeric)
        && value
            .chars()
            .all(|c| c.is_numeric() || matches!(c, '+' | '-' | '.' | ',' | '%' | ' '))
}

fn structural_shape(value: &str) -> Option<Shape> {
    if URL.is_match(value) {
        Some(Shape::Url)
    } else if FILE_PATH.is_match(value) || FILE_NAME.is_match(value) {
        Some(Shape::FilePath)
    } else if PACKAGE_PATH.is_match(value) {
        Some(Shape::PackagePath)
    } else if SQL.is_match(value) {
        Some(Shape::Sql)
    } else if REGEX_LIKE.is_match(value) {
        Some(Shape::Regex)
    } else {
        None
    }
}
