//! Extraction engine.
//!
//! A project run goes through the same stages for every file:
//! - `source`: discover `.java` files, decode them, resolve module prefixes
//! - `lexer`: mark comments, literals and annotations, then tokenize
//! - `merge`: coalesce literal sequences into templates with `{}` placeholders
//! - `classify`: keep human-visible text only
//!
//! Files are scanned in parallel and absorbed in traversal order into an
//! [`ExtractionRun`]; `keys` and `store` then turn the run into a persisted
//! key/value store. `translate` and `prune` work on existing stores.

pub mod classify;
pub mod context;
pub mod keys;
pub mod lexer;
pub mod merge;
pub mod pipeline;
pub mod prune;
pub mod source;
pub mod store;
pub mod translate;

pub use classify::{Classification, RejectReason, classify};
pub use context::{ExtractedString, ExtractionRun, Occurrence};
pub use merge::{MergeRule, MergedLiteral, merge_literals};
pub use pipeline::{ExtractReport, ExtractRequest, extract_project, scan_unit};
pub use prune::{PruneReport, prune_placeholders};
pub use store::{ConfigStore, StoreFormat, read_store, write_store};
pub use translate::{TranslateReport, translate_file, translate_store};
