//! Persisted key/value stores.
//!
//! A [`ConfigStore`] keeps keys in file order. Values are looked up by key;
//! the reverse value index used for deduplication is built by the merger.

mod ini;
mod merge;
mod properties;

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

pub use merge::{AddedEntry, MergeOutcome, merge_extracted};
pub use properties::entry_key;

use crate::{core::source::decode_store_text, error::ExtractError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Properties,
    Ini,
}

impl StoreFormat {
    /// `.ini` files are INI, everything else is a properties file.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ini") => StoreFormat::Ini,
            _ => StoreFormat::Properties,
        }
    }

    pub fn parse(self, text: &str) -> ConfigStore {
        match self {
            StoreFormat::Properties => properties::parse(text),
            StoreFormat::Ini => ini::parse(text),
        }
    }

    pub fn render(self, store: &ConfigStore) -> String {
        match self {
            StoreFormat::Properties => properties::render(store),
            StoreFormat::Ini => ini::render(store),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update an entry.
    ///
    /// A repeated key keeps its first position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Entries in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(|k| (k.as_str(), self.values[k].as_str()))
    }
}

/// Read a store; a missing file is an empty store.
pub fn read_store(path: &Path) -> Result<ConfigStore, ExtractError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no existing store, starting empty");
        return Ok(ConfigStore::new());
    }

    let bytes = fs::read(path).map_err(|source| ExtractError::StoreReadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_store_text(&bytes);
    Ok(StoreFormat::from_path(path).parse(&text))
}

/// Write a store, creating parent directories as needed.
pub fn write_store(path: &Path, store: &ConfigStore) -> Result<(), ExtractError> {
    let failure = |source| ExtractError::OutputWriteFailure {
        path: PathBuf::from(path),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(failure)?;
    }
    fs::write(path, StoreFormat::from_path(path).render(store)).map_err(failure)
}
