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

//! Shortcut capture from live input
//!
//! Records the keys and buttons a user presses while editing the shortcut
//! and turns them into a [`ChordSet`].

use std::collections::BTreeSet;

use crate::core::parser::chord_text;
use crate::core::types::{ChordError, ChordSet, Input, Key, MouseButton};

/// Collects pressed inputs into a new chord.
///
/// # Rules
/// - The first key press after [`ChordRecorder::begin`] clears keys kept
///   from an earlier recording
/// - A button press replaces the captured buttons with every button held
///   at that moment
/// - Meta pressed while Shift is held is recorded as Alt (some layouts
///   report Alt as Shift+Meta)
/// - The first release ends the recording; later presses are ignored
///   until the next `begin`
#[derive(Debug, Default)]
pub struct ChordRecorder {
    recording: bool,
    accept_new_keys: bool,
    shift_held: bool,
    held_buttons: BTreeSet<MouseButton>,
    keys: BTreeSet<Key>,
    buttons: BTreeSet<MouseButton>,
}

impl ChordRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new recording, discarding captured buttons.
    pub fn begin(&mut self) {
        self.recording = true;
        self.accept_new_keys = true;
        self.shift_held = false;
        self.held_buttons.clear();
        self.buttons.clear();
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Adds a pressed input to the recording.
    pub fn press(&mut self, input: Input) {
        if !self.recording {
            return;
        }

        match input {
            Input::Key(key) => {
                if self.accept_new_keys {
                    self.keys.clear();
                    self.accept_new_keys = false;
                }
                let key = match key.normalized() {
                    Key::Meta if self.shift_held => Key::Alt,
                    key => key,
                };
                if key == Key::Shift {
                    self.shift_held = true;
                }
                self.keys.insert(key);
            }
            Input::Button(button) => {
                self.held_buttons.insert(button);
                self.buttons = self.held_buttons.clone();
            }
        }
    }

    /// Ends the recording, keeping what was captured.
    ///
    /// A released button stops counting as held.
    pub fn release(&mut self, input: Input) {
        match input {
            Input::Key(Key::Shift) => self.shift_held = false,
            Input::Button(button) => {
                self.held_buttons.remove(&button);
            }
            Input::Key(_) => {}
        }

        self.recording = false;
    }

    /// Current capture as chord text ("None" while empty).
    pub fn label(&self) -> String {
        chord_text(&self.keys, &self.buttons)
    }

    /// Stops recording and returns the captured chord.
    ///
    /// # Errors
    ///
    /// `ChordError::InvalidChordSpec` when nothing was captured.
    pub fn finish(&mut self) -> Result<ChordSet, ChordError> {
        self.recording = false;
        ChordSet::new(self.keys.iter().copied(), self.buttons.iter().copied())
    }
}
