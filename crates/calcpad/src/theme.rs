//! Theme preference and its persistence
//!
//! The widget has two themes. The chosen one lives in a single named slot of
//! a key/value [`PreferenceStore`]; anything other than `"light"` in that slot
//! means dark.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Default preference slot holding the theme name
pub const DEFAULT_THEME_KEY: &str = "calculator-theme";

/// Preference store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file is not a JSON object of strings
    #[error("preference store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The host has no usable storage
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

/// Widget color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    Light,
    /// Dark background
    #[default]
    Dark,
}

impl Theme {
    /// Persisted form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interprets a stored value; missing or unrecognised means dark
    #[must_use]
    pub fn parse_preference(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Class put on `<body>`
    #[must_use]
    pub const fn body_class(&self) -> &'static str {
        match self {
            Self::Light => "light-theme",
            Self::Dark => "dark-theme",
        }
    }

    /// Icon class shown on the toggle button
    #[must_use]
    pub const fn icon_class(&self) -> &'static str {
        match self {
            Self::Light => "fas fa-sun",
            Self::Dark => "fas fa-moon",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque durable key/value storage
pub trait PreferenceStore {
    /// Reads a slot
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a slot
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Raw view of a slot
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file, rewritten on every `set`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Reads, writes and toggles the persisted theme
#[derive(Debug)]
pub struct ThemeStore<S> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeStore<S> {
    /// Wraps `store` using [`DEFAULT_THEME_KEY`]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_THEME_KEY)
    }

    /// Wraps `store` using a custom slot name, starting from its stored theme
    pub fn with_key(store: S, key: &str) -> Self {
        let mut themes = Self {
            store,
            key: key.to_string(),
            current: Theme::default(),
        };
        themes.current = themes.read();
        themes
    }

    /// The persisted theme; store failures fall back to dark
    pub fn read(&self) -> Theme {
        match self.store.get(&self.key) {
            Ok(value) => Theme::parse_preference(value.as_deref()),
            Err(e) => {
                warn!(key = %self.key, error = %e, "theme preference unreadable, using dark");
                Theme::default()
            }
        }
    }

    /// Sets and persists `theme`.
    ///
    /// The in-memory theme changes even when persisting fails.
    pub fn write(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.current = theme;
        self.store.set(&self.key, theme.as_str())
    }

    /// Flips and persists the stored theme, returning the new one
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.read().toggled();
        self.write(next)?;
        info!(theme = %next, "theme toggled");
        Ok(next)
    }

    /// Loads the persisted theme and writes it back normalised
    pub fn init(&mut self) -> Theme {
        let theme = self.read();
        if let Err(e) = self.write(theme) {
            warn!(key = %self.key, error = %e, "theme preference not persisted");
        }
        info!(theme = %theme, "theme initialised");
        theme
    }

    /// Theme currently applied
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Slot name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
