//! Token stream over classified regions.
//!
//! Comments and annotations produce no tokens. String, text block and char
//! literal regions produce one token each carrying the decoded value; code regions
//! are split into identifiers, numbers and punctuation.

use super::{Region, RegionKind, text_block_value, unescape_java};
use crate::utils::offset_to_line;

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "...", "->", "::", "++", "--", "&&", "||", "==", "!=", "<=",
    ">=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<",
];

const SINGLE_PUNCT: &str = "(){}[];,.@=<>!~?:+-*/&|^%";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Number,
    StringLit(String),
    CharLit(String),
    Punct(&'static str),
    /// Anything else, e.g. a stray quote left by an unterminated literal.
    Unknown(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset in the source text.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
}

impl Token {
    pub fn is_punct(&self, p: &str) -> bool {
        matches!(&self.kind, TokenKind::Punct(q) if *q == p)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(n) if n == name)
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::StringLit(v) => Some(v),
            _ => None,
        }
    }
}

/// One scanned string literal before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOccurrence {
    /// Unescaped value.
    pub value: String,
    pub line: usize,
    /// Index of the literal in the token stream.
    pub token: usize,
    /// Index of the preceding token, if any.
    pub prev: Option<usize>,
    /// Index of the following token, if any.
    pub next: Option<usize>,
}

/// Tokenize every code and literal region of `text`.
pub fn tokenize(text: &str, regions: &[Region], line_index: &[usize]) -> Vec<Token> {
    let mut tokens = Vec::new();

    for region in regions {
        let body = &text[region.start..region.end];
        match region.kind {
            RegionKind::Code => tokenize_code(body, region.start, line_index, &mut tokens),
            RegionKind::StringLiteral => tokens.push(Token {
                kind: TokenKind::StringLit(unescape_java(strip_quotes(body, '"'))),
                offset: region.start,
                line: offset_to_line(line_index, region.start),
            }),
            RegionKind::TextBlock => tokens.push(Token {
                kind: TokenKind::StringLit(text_block_value(body)),
                offset: region.start,
                line: offset_to_line(line_index, region.start),
            }),
            RegionKind::CharLiteral => tokens.push(Token {
                kind: TokenKind::CharLit(unescape_java(strip_quotes(body, '\''))),
                offset: region.start,
                line: offset_to_line(line_index, region.start),
            }),
            RegionKind::LineComment | RegionKind::BlockComment | RegionKind::Annotation => {}
        }
    }

    tokens
}

fn strip_quotes(body: &str, quote: char) -> &str {
    let body = body.strip_prefix(quote).unwrap_or(body);
    body.strip_suffix(quote).unwrap_or(body)
}

fn tokenize_code(body: &str, base: usize, line_index: &[usize], tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < body.len() {
        let rest = &body[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        let offset = base + i;
        let line = offset_to_line(line_index, offset);

        let (kind, width) = if c.is_alphabetic() || c == '_' || c == '$' {
            let width = rest
                .char_indices()
                .find(|&(_, ch)| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
                .map_or(rest.len(), |(idx, _)| idx);
            (TokenKind::Ident(rest[..width].to_string()), width)
        } else if c.is_ascii_digit() {
            (TokenKind::Number, number_width(rest))
        } else if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            (TokenKind::Punct(*op), op.len())
        } else if let Some(idx) = SINGLE_PUNCT.find(c) {
            (TokenKind::Punct(&SINGLE_PUNCT[idx..idx + 1]), 1)
        } else {
            (TokenKind::Unknown(c), c.len_utf8())
        };

        tokens.push(Token { kind, offset, line });
        i += width;
    }
}

/// Width of a numeric literal: digits, letters (hex, suffixes, exponents),
/// underscores and a decimal point followed by a digit.
fn number_width(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let decimal_point =
            b == b'.' && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit());
        if b.is_ascii_alphanumeric() || b == b'_' || decimal_point {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Collect every string literal token with its neighbours.
pub fn literal_occurrences(tokens: &[Token]) -> Vec<LiteralOccurrence> {
    tokens
        .iter()
        .enumerate()
        .filter_map(|(idx, token)| {
            token.string_value().map(|value| LiteralOccurrence {
                value: value.to_string(),
                line: token.line,
                token: idx,
                prev: idx.checked_sub(1),
                next: (idx + 1 < tokens.len()).then_some(idx + 1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{core::lexer::classify_regions, utils::build_line_index};

    fn lex(text: &str) -> Vec<Token> {
        let regions = classify_regions(text);
        tokenize(text, &regions.regions, &build_line_index(text))
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds(r#"log.info("用户" + id, 42L);"#),
            vec![
                TokenKind::Ident("log".to_string()),
                TokenKind::Punct("."),
                TokenKind::Ident("info".to_string()),
                TokenKind::Punct("("),
                TokenKind::StringLit("用户".to_string()),
                TokenKind::Punct("+"),
                TokenKind::Ident("id".to_string()),
                TokenKind::Punct(","),
                TokenKind::Number,
                TokenKind::Punct(")"),
                TokenKind::Punct(";"),
            ]
        );
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(
            kinds("a += b ++ -> c"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Punct("+="),
                TokenKind::Ident("b".to_string()),
                TokenKind::Punct("++"),
                TokenKind::Punct("->"),
                TokenKind::Ident("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_and_annotations_produce_no_tokens() {
        assert_eq!(
            kinds("@Value(\"${x}\") /* \"c\" */ String s; // \"d\""),
            vec![
                TokenKind::Ident("String".to_string()),
                TokenKind::Ident("s".to_string()),
                TokenKind::Punct(";"),
            ]
        );
    }

    #[test]
    fn test_literal_lines_and_neighbours() {
        let tokens = lex("x = \"a\"\n  + \"b\";");
        let occurrences = literal_occurrences(&tokens);

        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].value, "a");
        assert_eq!(occurrences[0].line, 1);
        assert_eq!(occurrences[0].prev, Some(1));
        assert_eq!(occurrences[1].value, "b");
        assert_eq!(occurrences[1].line, 2);
        assert_eq!(tokens[occurrences[1].prev.unwrap()].kind, TokenKind::Punct("+"));
        assert_eq!(tokens[occurrences[1].next.unwrap()].kind, TokenKind::Punct(";"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1.5e3 0x1F 1_000"),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Number]
        );
    }
}
