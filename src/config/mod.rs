// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drag-resize settings with lenient loading and atomic writes.
//!
//! The settings record holds the value bounds, the drag span and the
//! shortcut text. Key features:
//!
//! - **Lenient loading**: a missing or malformed field falls back to its
//!   default while the remaining fields are kept
//! - **Atomic writes**: temp-file-then-rename, the file is never half written
//! - **Hot reload**: [`SettingsWatcher`] reports edits made by other programs
//!
//! # Example
//!
//! ```no_run
//! use chord_resize::config::SettingsStore;
//! use std::path::Path;
//!
//! let store = SettingsStore::new(Path::new("~/.config/chord-resize/settings.json"))?;
//! let mut settings = store.load()?;
//! settings.max_size = 200;
//! store.save(&settings)?;
//! # Ok::<(), chord_resize::config::ConfigError>(())
//! ```

pub mod error;
pub mod validator;
pub mod watcher;

use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::core::{ChordError, ChordSet, DragRange, RemapError};

pub use error::ConfigError;
pub use validator::{SettingsValidator, ValidationIssue, ValidationLevel, ValidationReport};
pub use watcher::SettingsWatcher;

/// Upper value bound used when the record has none.
pub const DEFAULT_MAX_BRUSH_SIZE: i64 = 1000;
/// Lower value bound used when the record has none.
pub const DEFAULT_MIN_BRUSH_SIZE: i64 = 0;
/// Drag span (pixels) used when the record has none.
pub const DEFAULT_MAX_SIZE: i64 = 100;
/// Shortcut used when the record has none.
pub const DEFAULT_SHORTCUT: &str = "Shift+Right";
/// Where the CLI keeps settings unless told otherwise.
pub const DEFAULT_SETTINGS_PATH: &str = "~/.config/chord-resize/settings.json";

/// The persisted configuration record.
///
/// Field names match the on-disk JSON keys.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResizeSettings {
    /// Highest value a drag can produce
    pub max_brush_size: i64,
    /// Lowest value a drag can produce
    pub min_brush_size: i64,
    /// Horizontal drag distance covering the whole range
    pub max_size: i64,
    /// Chord text, e.g. "Right+Shift"
    pub shortcut: String,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            max_brush_size: DEFAULT_MAX_BRUSH_SIZE,
            min_brush_size: DEFAULT_MIN_BRUSH_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            shortcut: DEFAULT_SHORTCUT.to_string(),
        }
    }
}

impl ResizeSettings {
    /// Parses a settings record, falling back per field.
    ///
    /// Missing fields, wrongly typed fields and an unparseable shortcut
    /// each take their default; the other fields are kept. A document
    /// that is not a JSON object is treated as empty.
    ///
    /// # Errors
    ///
    /// `ConfigError::Json` if `content` is not JSON at all.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(content)?;
        let defaults = Self::default();

        let Value::Object(fields) = value else {
            warn!("Settings document is not an object, using defaults");
            return Ok(defaults);
        };

        let shortcut = match fields.get("shortcut") {
            Some(Value::String(text)) if ChordSet::parse(text).is_ok() => text.clone(),
            Some(Value::String(text)) => {
                warn!(shortcut = %text, "Ignoring invalid shortcut in settings");
                defaults.shortcut
            }
            Some(other) => {
                warn!(field = "shortcut", value = %other, "Ignoring malformed settings field");
                defaults.shortcut
            }
            None => defaults.shortcut,
        };

        Ok(Self {
            max_brush_size: int_field(&fields, "max_brush_size", defaults.max_brush_size),
            min_brush_size: int_field(&fields, "min_brush_size", defaults.min_brush_size),
            max_size: int_field(&fields, "max_size", defaults.max_size),
            shortcut,
        })
    }

    /// Serialises the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured chord.
    pub fn chord(&self) -> Result<ChordSet, ChordError> {
        ChordSet::parse(&self.shortcut)
    }

    /// The configured value bounds and drag span.
    pub fn drag_range(&self) -> Result<DragRange, RemapError> {
        DragRange::new(
            self.min_brush_size as f64,
            self.max_brush_size as f64,
            self.max_size as f64,
        )
    }

    /// Stores `chord` in its canonical spelling.
    pub fn set_chord(&mut self, chord: &ChordSet) {
        self.shortcut = chord.to_string();
    }
}

/// Reads an integer field, accepting whole floats ("100.0").
fn int_field(fields: &Map<String, Value>, key: &str, default: i64) -> i64 {
    let Some(value) = fields.get(key) else {
        return default;
    };

    let parsed = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    });

    match parsed {
        Some(n) => n,
        None => {
            warn!(field = key, value = %value, "Ignoring malformed settings field");
            default
        }
    }
}

/// Loads and saves [`ResizeSettings`] at a fixed path.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    /// Tilde-expanded path of the settings file.
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store for `path`, expanding a leading `~`.
    ///
    /// The file does not need to exist yet.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidPath` if the path is not valid UTF-8.
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let raw = path
            .to_str()
            .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;
        let expanded = shellexpand::tilde(raw);

        Ok(Self {
            path: PathBuf::from(expanded.as_ref()),
        })
    }

    /// Store at [`DEFAULT_SETTINGS_PATH`].
    pub fn default_location() -> Result<Self, ConfigError> {
        Self::new(Path::new(DEFAULT_SETTINGS_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file exists but cannot be read,
    /// `ConfigError::Json` if it is not JSON.
    pub fn load(&self) -> Result<ResizeSettings, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(ResizeSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        ResizeSettings::from_json(&content)
    }

    /// Writes the settings atomically, creating the parent directory.
    ///
    /// # Errors
    ///
    /// `ConfigError::WriteFailed` if the atomic write cannot complete.
    pub fn save(&self, settings: &ResizeSettings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = settings.to_json()?;
        content.push('\n');

        let mut file = AtomicWriteFile::options()
            .open(&self.path)
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

        file.commit()
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
