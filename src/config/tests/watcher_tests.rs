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

use std::{fs, thread, time::Duration};
use tempfile::TempDir;

use crate::config::SettingsWatcher;

#[test]
fn test_no_changes_reported_without_writes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    let watcher = SettingsWatcher::new(&path).unwrap();
    assert!(!watcher.check_for_changes());
}

#[test]
fn test_write_to_settings_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    let watcher = SettingsWatcher::new(&path).unwrap();
    fs::write(&path, r#"{"max_size": 200}"#).unwrap();

    // Event delivery is asynchronous; poll for a while
    let mut seen = false;
    for _ in 0..50 {
        if watcher.check_for_changes() {
            seen = true;
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }
    assert!(seen, "Modification should be reported");
}

#[test]
fn test_other_files_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    let watcher = SettingsWatcher::new(&path).unwrap();
    fs::write(temp_dir.path().join("unrelated.txt"), "hello").unwrap();
    thread::sleep(Duration::from_millis(200));

    assert!(!watcher.check_for_changes());
}
