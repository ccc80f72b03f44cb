//! Source collaborators: traversal, module discovery and decoding.

pub mod encoding;
pub mod file_scanner;
pub mod module;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;

pub use encoding::{DEFAULT_CONFIDENCE_THRESHOLD, Decoded, decode, detect, encoding_for_label};
pub use file_scanner::{ScanResult, WalkFailure, scan_java_files};
pub use module::{ModuleResolver, POM_FILE_NAME, module_segment};

use crate::issues::{CollaboratorFailure, UnreadableFileIssue};

/// One Java file ready to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Path relative to the project root, `/`-separated.
    pub path: String,
    pub text: String,
    pub module_prefix: Option<String>,
}

/// A discovered file before it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub display_path: String,
    pub module_prefix: Option<String>,
}

/// How raw bytes are turned into text.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Encoding to try when the bytes are not UTF-8. GBK when unset.
    pub fallback: Option<&'static Encoding>,
    pub confidence_threshold: f32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            fallback: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub files: Vec<SourceFile>,
    /// Paths the walk could not read, in traversal order.
    pub unreadable: Vec<UnreadableFileIssue>,
}

/// List the Java files of a project with their module prefixes.
pub fn discover_sources(
    root: &Path,
    ignores: &[String],
    ignore_test_files: bool,
    module_prefix: bool,
) -> Discovery {
    let scan = scan_java_files(root, ignores, ignore_test_files);
    let mut resolver = ModuleResolver::new(root);

    let files = scan
        .files
        .into_iter()
        .map(|path| {
            let module_prefix = if module_prefix {
                resolver.prefix_for(&path)
            } else {
                None
            };
            SourceFile {
                display_path: display_path(root, &path),
                path,
                module_prefix,
            }
        })
        .collect();

    let unreadable = scan
        .failures
        .into_iter()
        .map(|failure| UnreadableFileIssue {
            path: display_path(root, &failure.path),
            reason: failure.reason,
        })
        .collect();

    Discovery { files, unreadable }
}

fn display_path(root: &Path, path: &Path) -> String {
    if path == root {
        return root.display().to_string();
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read and decode one file.
pub fn load_source(
    file: &SourceFile,
    options: DecodeOptions,
) -> io::Result<(SourceUnit, Option<CollaboratorFailure>)> {
    let bytes = fs::read(&file.path)?;
    let decoded = decode(&bytes, options.fallback, options.confidence_threshold);
    let unit = SourceUnit {
        path: file.display_path.clone(),
        text: decoded.text,
        module_prefix: file.module_prefix.clone(),
    };
    Ok((unit, decoded.failure))
}

/// Decode a persisted store the same way sources are decoded.
pub fn decode_store_text(bytes: &[u8]) -> String {
    decode(bytes, None, DEFAULT_CONFIDENCE_THRESHOLD).text
}
