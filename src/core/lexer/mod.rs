//! Lightweight Java lexer.
//!
//! The lexer does not parse Java. It partitions the source text into tagged
//! regions (code, comments, literals, annotations) and turns the code and
//! literal regions into a flat token stream for the concatenation merger.
//!
//! ## Stages
//!
//! 1. [`stripper`]: comment/string finite-state machine producing base regions
//! 2. [`annotation`]: overlay re-tagging `@Name(...)` spans as annotations
//! 3. [`token`]: token stream and literal occurrences over the final regions

pub mod annotation;
pub mod escape;
pub mod stripper;
pub mod token;

pub use annotation::{annotation_spans, overlay_annotations};
pub use escape::{text_block_value, unescape_java};
pub use stripper::{LexState, strip};
pub use token::{LiteralOccurrence, Token, TokenKind, literal_occurrences, tokenize};

use crate::issues::Unterminated;

/// What a span of source text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
    /// A `"""` text block.
    TextBlock,
    CharLiteral,
    Annotation,
}

impl RegionKind {
    pub fn is_comment(self) -> bool {
        matches!(self, RegionKind::LineComment | RegionKind::BlockComment)
    }
}

/// A half-open byte span `[start, end)` of the source text.
///
/// Regions of one file never overlap and together cover the whole text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(kind: RegionKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A construct that was opened but never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unclosed {
    pub construct: Unterminated,
    /// Byte offset of the opening delimiter.
    pub offset: usize,
}

/// Output of the region pass over one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    pub regions: Vec<Region>,
    pub unclosed: Vec<Unclosed>,
}

/// Run the stripper and the annotation overlay over `text`.
pub fn classify_regions(text: &str) -> Regions {
    let mut stripped = strip(text);
    let (spans, unclosed) = annotation_spans(text, &stripped.regions);
    stripped.unclosed.extend(unclosed);
    stripped.unclosed.sort_by_key(|u| u.offset);

    Regions {
        regions: overlay_annotations(&stripped.regions, &spans),
        unclosed: stripped.unclosed,
    }
}

/// Append a region, skipping empty spans and coalescing adjacent spans of
/// the same kind for code and annotations.
pub(crate) fn push_region(regions: &mut Vec<Region>, kind: RegionKind, start: usize, end: usize) {
    if start >= end {
        return;
    }
    if let Some(last) = regions.last_mut()
        && last.kind == kind
        && last.end == start
        && matches!(kind, RegionKind::Code | RegionKind::Annotation)
    {
        last.end = end;
        return;
    }
    regions.push(Region::new(kind, start, end));
}
