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

//! Chord press-state tracking
//!
//! Keeps one pressed flag per chord member in a HashMap keyed by the typed
//! `Input`. Inputs outside the chord are ignored.
//!
//! # Performance
//! - Press / release: O(1) average case
//! - Completeness check: O(n) where n = chord members (a handful)

use std::collections::HashMap;

use crate::core::types::{ChordSet, Input};

/// Change in chord completeness caused by one event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChordTransition {
    /// The chord just became fully pressed
    Completed,
    /// The chord was fully pressed and no longer is
    Broken,
    /// Completeness did not change
    Unchanged,
}

/// Tracks which members of the configured chord are currently held.
///
/// The map's key set always equals the chord's members: it is rebuilt
/// from scratch whenever the chord is replaced.
#[derive(Debug)]
pub struct ChordTracker {
    chord: ChordSet,
    /// Pressed flag for every chord member
    pressed: HashMap<Input, bool>,
}

impl ChordTracker {
    /// Creates a tracker with every member released.
    pub fn new(chord: ChordSet) -> Self {
        let pressed = Self::released_flags(&chord);
        Self { chord, pressed }
    }

    fn released_flags(chord: &ChordSet) -> HashMap<Input, bool> {
        chord.members().map(|input| (input, false)).collect()
    }

    /// The configured chord.
    pub fn chord(&self) -> &ChordSet {
        &self.chord
    }

    /// Records a press.
    ///
    /// Only a released member changes state; repeated presses (key
    /// auto-repeat) and non-members are no-ops.
    pub fn on_press(&mut self, input: Input) -> ChordTransition {
        let input = input.normalized();
        let was_complete = self.is_complete();

        match self.pressed.get_mut(&input) {
            Some(flag) if !*flag => *flag = true,
            _ => return ChordTransition::Unchanged,
        }

        Self::transition(was_complete, self.is_complete())
    }

    /// Records a release.
    ///
    /// Always clears a member's flag, even if it was already clear, so a
    /// missed press notification cannot leave it stuck.
    pub fn on_release(&mut self, input: Input) -> ChordTransition {
        let input = input.normalized();
        let was_complete = self.is_complete();

        match self.pressed.get_mut(&input) {
            Some(flag) => *flag = false,
            None => return ChordTransition::Unchanged,
        }

        Self::transition(was_complete, self.is_complete())
    }

    /// True iff every chord member is held. Never vacuously true.
    pub fn is_complete(&self) -> bool {
        !self.pressed.is_empty() && self.pressed.values().all(|pressed| *pressed)
    }

    /// Whether one member is currently held.
    pub fn is_pressed(&self, input: &Input) -> bool {
        self.pressed.get(&input.normalized()).copied().unwrap_or(false)
    }

    /// Number of chord members currently held.
    pub fn pressed_count(&self) -> usize {
        self.pressed.values().filter(|pressed| **pressed).count()
    }

    /// Replaces the chord and discards all press state.
    ///
    /// Returns `Broken` if the old chord was complete; the owner must end
    /// any drag that relied on it.
    pub fn set_chord(&mut self, chord: ChordSet) -> ChordTransition {
        let was_complete = self.is_complete();

        self.pressed = Self::released_flags(&chord);
        self.chord = chord;

        Self::transition(was_complete, false)
    }

    /// Releases every member without changing the chord.
    pub fn reset(&mut self) -> ChordTransition {
        let was_complete = self.is_complete();
        self.pressed.values_mut().for_each(|pressed| *pressed = false);
        Self::transition(was_complete, false)
    }

    fn transition(was_complete: bool, is_complete: bool) -> ChordTransition {
        match (was_complete, is_complete) {
            (false, true) => ChordTransition::Completed,
            (true, false) => ChordTransition::Broken,
            _ => ChordTransition::Unchanged,
        }
    }
}
