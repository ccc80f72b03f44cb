//! Byte decoding with a confidence score.

use encoding_rs::{Encoding, GBK, UTF_8};

use crate::issues::CollaboratorFailure;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.70;

#[derive(Debug, Clone, PartialEq)]
pub struct Detected {
    pub text: String,
    pub encoding: &'static Encoding,
    /// Share of plausible characters, 0.0 to 1.0.
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub text: String,
    /// Set when the guess was too weak and lossy UTF-8 was used instead.
    pub failure: Option<CollaboratorFailure>,
}

/// Resolve an encoding label such as `gbk`, `utf-8` or `big5`.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Guess the encoding of `bytes`.
///
/// A BOM wins; valid UTF-8 is taken as is; anything else is decoded with
/// `fallback` (GBK when unset) and scored.
pub fn detect(bytes: &[u8], fallback: Option<&'static Encoding>) -> Detected {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return Detected {
            text: text.into_owned(),
            encoding,
            confidence: 1.0,
        };
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Detected {
            text: text.to_string(),
            encoding: UTF_8,
            confidence: 1.0,
        };
    }

    let encoding = fallback.unwrap_or(GBK);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    let confidence = plausibility(&text);
    Detected {
        text: text.into_owned(),
        encoding,
        confidence,
    }
}

/// Decode `bytes`, falling back to lossy UTF-8 below `threshold`.
pub fn decode(bytes: &[u8], fallback: Option<&'static Encoding>, threshold: f32) -> Decoded {
    let detected = detect(bytes, fallback);
    if detected.confidence >= threshold {
        return Decoded {
            text: detected.text,
            failure: None,
        };
    }

    tracing::debug!(
        encoding = detected.encoding.name(),
        confidence = detected.confidence,
        "low decoding confidence, using lossy UTF-8"
    );
    Decoded {
        text: String::from_utf8_lossy(bytes).into_owned(),
        failure: Some(CollaboratorFailure::LowConfidence {
            encoding: detected.encoding.name().to_string(),
            percent: (detected.confidence * 100.0).round() as u8,
        }),
    }
}

/// Share of characters that are plausible in source text.
pub fn plausibility(text: &str) -> f32 {
    let mut total = 0usize;
    let mut plausible = 0usize;

    for c in text.chars() {
        total += 1;
        if is_plausible(c) {
            plausible += 1;
        }
    }

    if total == 0 {
        1.0
    } else {
        plausible as f32 / total as f32
    }
}

fn is_plausible(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | ' '..='~'
        | '\u{00C0}'..='\u{00FF}'
        | '\u{3000}'..='\u{303F}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{FF00}'..='\u{FFEF}'
    )
}
