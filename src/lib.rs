//! i18n4j - extract human-visible strings from Java projects
//!
//! i18n4j is a CLI tool and library that scans Java sources for string
//! literals meant for people, merges concatenations, builder chains and
//! format calls into templates with `{}` placeholders, and appends them to a
//! `.properties` or `.ini` file under stable keys. Existing entries are never
//! touched, so repeated runs only add what is new.
//!
//! ## Module Structure
//!
//! - `ai`: Language-model collaborator for key names and translations
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (lexer, merger, classifier, keys, stores)
//! - `error`: Fatal errors
//! - `issues`: Recoverable issue types and reporting
//! - `utils`: Shared utility functions

pub mod ai;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;
pub mod utils;
