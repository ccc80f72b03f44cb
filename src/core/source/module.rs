//! Maven module prefixes.
//!
//! Every ancestor directory strictly below the project root that holds a
//! `pom.xml` contributes one segment, outermost first.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub const POM_FILE_NAME: &str = "pom.xml";

const MAX_SEGMENT_LENGTH: usize = 30;

pub struct ModuleResolver {
    root: PathBuf,
    has_pom: HashMap<PathBuf, bool>,
}

impl ModuleResolver {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            has_pom: HashMap::new(),
        }
    }

    /// Dotted module prefix for `file`, or `None` outside any sub-module.
    pub fn prefix_for(&mut self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.root).ok()?;
        let mut dir = self.root.clone();
        let mut segments = Vec::new();

        for component in relative.parent()?.components() {
            dir.push(component);
            if !self.is_module(&dir) {
                continue;
            }
            if let Some(segment) = component.as_os_str().to_str().and_then(module_segment) {
                segments.push(segment);
            }
        }

        (!segments.is_empty()).then(|| segments.join("."))
    }

    fn is_module(&mut self, dir: &Path) -> bool {
        *self
            .has_pom
            .entry(dir.to_path_buf())
            .or_insert_with(|| dir.join(POM_FILE_NAME).is_file())
    }
}

/// Key segment for a module directory name, or `None` if it should be skipped.
pub fn module_segment(name: &str) -> Option<String> {
    if name.is_empty() || name.chars().count() > MAX_SEGMENT_LENGTH || looks_temporary(name) {
        return None;
    }

    Some(
        name.to_lowercase()
            .chars()
            .map(|c| match c {
                'a'..='z' | '0'..='9' | '_' | '-' => c,
                _ => '_',
            })
            .collect(),
    )
}

fn looks_temporary(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let random = name.len() >= 16 && name.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    name.starts_with('.') || lower.starts_with("tmp") || lower.starts_with("temp") || random
}
