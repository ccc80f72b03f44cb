//! Comment/string state machine.
//!
//! The machine is a pure [`transition`] function over [`LexState`]; [`strip`]
//! drives it over a file and turns region boundaries into [`Region`]s.

use super::{RegionKind, Regions, Unclosed, push_region};
use crate::issues::Unterminated;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Code,
    InLineComment,
    InBlockComment,
    InString,
    InTextBlock,
    InChar,
}

impl LexState {
    fn region_kind(self) -> RegionKind {
        match self {
            LexState::Code => RegionKind::Code,
            LexState::InLineComment => RegionKind::LineComment,
            LexState::InBlockComment => RegionKind::BlockComment,
            LexState::InString => RegionKind::StringLiteral,
            LexState::InTextBlock => RegionKind::TextBlock,
            LexState::InChar => RegionKind::CharLiteral,
        }
    }

    /// Byte width of the delimiter that opens this state.
    fn opener_width(self) -> usize {
        match self {
            LexState::Code => 0,
            LexState::InLineComment | LexState::InBlockComment => 2,
            LexState::InString | LexState::InChar => 1,
            LexState::InTextBlock => 3,
        }
    }

    fn unterminated(self) -> Option<Unterminated> {
        match self {
            LexState::InBlockComment => Some(Unterminated::BlockComment),
            LexState::InString => Some(Unterminated::StringLiteral),
            LexState::InTextBlock => Some(Unterminated::TextBlock),
            LexState::InChar => Some(Unterminated::CharLiteral),
            LexState::Code | LexState::InLineComment => None,
        }
    }
}

/// What a transition does to the region being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Stay inside the current region.
    None,
    /// A new region starts at the current character.
    Open,
    /// The current region ends after the consumed characters.
    Close,
    /// The current region ends before the current character.
    CloseBefore,
    /// The current region cannot be terminated on this line.
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: LexState,
    /// Characters consumed: 0 (abandon) up to 3.
    pub width: usize,
    pub boundary: Boundary,
}

impl Transition {
    fn stay(state: LexState) -> Self {
        Self {
            state,
            width: 1,
            boundary: Boundary::None,
        }
    }

    fn to(state: LexState, width: usize, boundary: Boundary) -> Self {
        Self {
            state,
            width,
            boundary,
        }
    }
}

/// The transition function of the lexer.
///
/// `next` and `after` are the two characters following `current`, used for
/// multi-character delimiters and escapes.
pub fn transition(
    state: LexState,
    current: char,
    next: Option<char>,
    after: Option<char>,
) -> Transition {
    use LexState::*;

    let triple_quote = current == '"' && next == Some('"') && after == Some('"');

    match (state, current, next) {
        (Code, '/', Some('/')) => Transition::to(InLineComment, 2, Boundary::Open),
        (Code, '/', Some('*')) => Transition::to(InBlockComment, 2, Boundary::Open),
        (Code, '"', _) if triple_quote => Transition::to(InTextBlock, 3, Boundary::Open),
        (Code, '"', _) => Transition::to(InString, 1, Boundary::Open),
        (Code, '\'', _) => Transition::to(InChar, 1, Boundary::Open),
        (Code, _, _) => Transition::stay(Code),

        (InLineComment, '\n', _) => Transition::to(Code, 1, Boundary::CloseBefore),
        (InLineComment, _, _) => Transition::stay(InLineComment),

        (InBlockComment, '*', Some('/')) => Transition::to(Code, 2, Boundary::Close),
        (InBlockComment, _, _) => Transition::stay(InBlockComment),

        // Escapes in text blocks may span a line break.
        (InTextBlock, '\\', Some(_)) => Transition::to(InTextBlock, 2, Boundary::None),
        (InTextBlock, '"', _) if triple_quote => Transition::to(Code, 3, Boundary::Close),
        (InTextBlock, _, _) => Transition::stay(InTextBlock),

        (InString | InChar, '\\', Some(escaped)) if escaped != '\n' => {
            Transition::to(state, 2, Boundary::None)
        }
        (InString, '"', _) | (InChar, '\'', _) => Transition::to(Code, 1, Boundary::Close),
        (InString | InChar, '\n', _) => Transition::to(Code, 0, Boundary::Abandon),
        (InString | InChar, _, _) => Transition::stay(state),
    }
}

/// Partition `text` into code, comment and literal regions.
///
/// Unterminated strings, text blocks, chars and block comments are recorded in
/// [`Regions::unclosed`]; lexing resumes as code right after their opening
/// delimiter.
pub fn strip(text: &str) -> Regions {
    let mut regions = Vec::new();
    let mut unclosed = Vec::new();

    let mut state = LexState::Code;
    let mut region_start = 0;
    let mut pos = 0;

    loop {
        while pos < text.len() {
            let mut chars = text[pos..].chars();
            let Some(current) = chars.next() else {
                break;
            };
            let next = chars.next();
            let after = chars.next();
            let t = transition(state, current, next, after);

            let width: usize = [Some(current), next, after]
                .into_iter()
                .take(t.width)
                .flatten()
                .map(char::len_utf8)
                .sum();

            match t.boundary {
                Boundary::None => {}
                Boundary::Open => {
                    push_region(&mut regions, state.region_kind(), region_start, pos);
                    region_start = pos;
                }
                Boundary::Close => {
                    push_region(&mut regions, state.region_kind(), region_start, pos + width);
                    region_start = pos + width;
                }
                Boundary::CloseBefore => {
                    push_region(&mut regions, state.region_kind(), region_start, pos);
                    region_start = pos;
                }
                Boundary::Abandon => {
                    pos = abandon(state, region_start, &mut unclosed);
                    state = LexState::Code;
                    continue;
                }
            }

            state = t.state;
            pos += width;
        }

        if state == LexState::Code || state == LexState::InLineComment {
            push_region(&mut regions, state.region_kind(), region_start, text.len());
            break;
        }

        // Unterminated at end of file: resume after the opener.
        pos = abandon(state, region_start, &mut unclosed);
        state = LexState::Code;
    }

    Regions { regions, unclosed }
}

/// Record an unterminated construct and return where lexing resumes.
///
/// The region start is left untouched so the resumed code coalesces with the
/// abandoned opener.
fn abandon(state: LexState, region_start: usize, unclosed: &mut Vec<Unclosed>) -> usize {
    if let Some(construct) = state.unterminated() {
        unclosed.push(Unclosed {
            construct,
            offset: region_start,
        });
    }
    region_start + state.opener_width()
}
