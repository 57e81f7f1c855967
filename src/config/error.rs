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

use std::path::PathBuf;
use thiserror::Error;

use crate::core::{ChordError, RemapError};

/// Errors that can occur during settings management.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file content is not valid JSON.
    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The shortcut text does not describe a usable chord.
    #[error("Invalid shortcut: {0}")]
    InvalidChord(#[from] ChordError),
    /// Value bounds or drag span cannot be used for dragging.
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] RemapError),
    /// Settings path is not valid UTF-8 or cannot be expanded.
    #[error("Invalid settings path: {0}")]
    InvalidPath(PathBuf),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// File watcher could not be started.
    #[error("Failed to watch settings file: {0}")]
    Watch(#[from] notify::Error),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
