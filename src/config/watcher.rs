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

//! File system watcher for live settings reloads
//!
//! Uses OS-level file watching via the notify crate. The parent directory
//! is watched rather than the file itself, so atomic saves (which replace
//! the file by renaming a temp file over it) are still seen.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{channel, Receiver},
};

use crate::config::ConfigError;

/// Watches the settings file and reports when it changed
pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(SettingsWatcher {
            _watcher: watcher,
            rx,
            path: path.to_path_buf(),
        })
    }

    /// Drains pending events (non-blocking), true if the settings file
    /// was created or modified since the last call
    pub fn check_for_changes(&self) -> bool {
        let mut changed = false;

        while let Ok(event_result) = self.rx.try_recv() {
            if let Ok(event) = event_result {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && event.paths.iter().any(|p| self.is_settings_file(p))
                {
                    changed = true;
                }
            }
        }

        changed
    }

    fn is_settings_file(&self, candidate: &Path) -> bool {
        candidate == self.path || candidate.file_name() == self.path.file_name()
    }
}
