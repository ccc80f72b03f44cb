//! Annotation overlay.
//!
//! An annotation starts at `@` immediately followed by an identifier and runs
//! to the `)` closing its argument list, or ends right after the (qualified)
//! name when no `(` follows. Parentheses are only counted in code regions, so
//! `")"` inside an argument string does not end the annotation.

use std::ops::Range;

use super::{Region, RegionKind, Unclosed, push_region};
use crate::issues::Unterminated;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnnotationState {
    Idle,
    Name { start: usize },
    AfterName { start: usize, name_end: usize },
    Arguments { start: usize, depth: usize },
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

/// Find annotation spans over stripped regions.
pub fn annotation_spans(text: &str, regions: &[Region]) -> (Vec<Range<usize>>, Vec<Unclosed>) {
    let mut spans = Vec::new();
    let mut state = AnnotationState::Idle;

    for region in regions {
        if region.kind != RegionKind::Code {
            state = match state {
                AnnotationState::Name { start } => AnnotationState::AfterName {
                    start,
                    name_end: region.start,
                },
                _ => state,
            };
            if let AnnotationState::AfterName { start, name_end } = state
                && !region.kind.is_comment()
            {
                spans.push(start..name_end);
                state = AnnotationState::Idle;
            }
            continue;
        }

        let slice = &text[region.start..region.end];
        let mut chars = slice.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let pos = region.start + i;
            let next = chars.peek().map(|&(_, n)| n);
            state = step(state, c, pos, next, &mut spans);
        }
    }

    let mut unclosed = Vec::new();
    match state {
        AnnotationState::Idle => {}
        AnnotationState::Name { start } => spans.push(start..text.len()),
        AnnotationState::AfterName { start, name_end } => spans.push(start..name_end),
        AnnotationState::Arguments { start, .. } => {
            spans.push(start..text.len());
            unclosed.push(Unclosed {
                construct: Unterminated::Annotation,
                offset: start,
            });
        }
    }

    (spans, unclosed)
}

/// Advance the annotation machine by one code character.
fn step(
    state: AnnotationState,
    c: char,
    pos: usize,
    next: Option<char>,
    spans: &mut Vec<Range<usize>>,
) -> AnnotationState {
    match state {
        AnnotationState::Idle => {
            if c == '@' && next.is_some_and(is_identifier_start) {
                AnnotationState::Name { start: pos }
            } else {
                AnnotationState::Idle
            }
        }
        AnnotationState::Name { start } => {
            if is_name_char(c) {
                state
            } else {
                step(
                    AnnotationState::AfterName {
                        start,
                        name_end: pos,
                    },
                    c,
                    pos,
                    next,
                    spans,
                )
            }
        }
        AnnotationState::AfterName { start, name_end } => {
            if c.is_whitespace() {
                state
            } else if c == '(' {
                AnnotationState::Arguments { start, depth: 1 }
            } else {
                spans.push(start..name_end);
                step(AnnotationState::Idle, c, pos, next, spans)
            }
        }
        AnnotationState::Arguments { start, depth } => match c {
            '(' => AnnotationState::Arguments {
                start,
                depth: depth + 1,
            },
            ')' if depth == 1 => {
                spans.push(start..pos + 1);
                AnnotationState::Idle
            }
            ')' => AnnotationState::Arguments {
                start,
                depth: depth - 1,
            },
            _ => state,
        },
    }
}

/// Re-partition `regions` so that every annotation span becomes a single
/// [`RegionKind::Annotation`] region.
pub fn overlay_annotations(regions: &[Region], spans: &[Range<usize>]) -> Vec<Region> {
    let mut out = Vec::with_capacity(regions.len());
    let mut spans = spans.iter().peekable();

    for region in regions {
        let mut cursor = region.start;
        while cursor < region.end {
            while spans.next_if(|s| s.end <= cursor).is_some() {}

            match spans.peek() {
                Some(span) if span.start <= cursor => {
                    let stop = span.end.min(region.end);
                    push_region(&mut out, RegionKind::Annotation, cursor, stop);
                    cursor = stop;
                }
                Some(span) if span.start < region.end => {
                    push_region(&mut out, region.kind, cursor, span.start);
                    cursor = span.start;
                }
                _ => {
                    push_region(&mut out, region.kind, cursor, region.end);
                    cursor = region.end;
                }
            }
        }
    }

    out
}
