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

//! Driver wiring the chord tracker and drag session to a host
//!
//! The driver owns one [`ChordTracker`] and one [`DragRemapSession`] and
//! routes raw input events through them:
//!
//! ```text
//! press/release ──► ChordTracker ──Completed──► DragRemapSession::arm
//!                                 └─Broken────► DragRemapSession::disarm
//! pointer move  ──► DragRemapSession::pointer_move ──► ValueHost::set_value
//! ```
//!
//! The host is only borrowed for the duration of one event, so the driver
//! never holds on to document state between events.

pub mod script;

use tracing::{debug, trace, warn};

use crate::config::{ConfigError, ResizeSettings, SettingsValidator};
use crate::core::{ChordSet, ChordTracker, ChordTransition, DragRange, DragRemapSession, Input};

pub use script::{parse_script, InputEvent, ScriptCommand, ScriptError, ScriptLine};

/// The application whose value is being adjusted
pub trait ValueHost {
    /// Value before any drag adjustment (e.g. the current brush size)
    fn current_value(&self) -> f64;

    /// Receives every value produced while a drag is armed
    ///
    /// Values are passed on unrounded and lie within the configured
    /// bounds. A host with integer sizes (such as a brush size) rounds or
    /// truncates here; the driver keeps the exact value for the rest of
    /// the gesture.
    fn set_value(&mut self, value: f64);

    /// Whether a drag may start right now
    ///
    /// A host without an open document or with the wrong tool active
    /// returns false; the chord is still tracked but never arms.
    fn can_adjust(&self) -> bool {
        true
    }
}

/// Lifecycle and value notifications for collaborators such as an overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverEvent {
    /// A drag session started
    Armed { anchor_x: f64, value: f64 },
    /// The pointer moved while armed
    ValueChanged(f64),
    /// The drag session ended
    Disarmed,
}

impl DriverEvent {
    /// Overlay circle size for this event, if it carries a value.
    pub fn overlay_radius(&self) -> Option<f64> {
        match self {
            DriverEvent::Armed { value, .. } | DriverEvent::ValueChanged(value) => Some(overlay_radius(*value)),
            DriverEvent::Disarmed => None,
        }
    }
}

/// The overlay circle is half the value across.
fn overlay_radius(value: f64) -> f64 {
    value * 0.5
}

/// Chord-triggered drag adjustment for a single host
#[derive(Debug)]
pub struct ResizeDriver {
    tracker: ChordTracker,
    session: DragRemapSession,
    range: DragRange,
    /// Last pointer x seen, used as the press point when the chord completes
    pointer_x: f64,
}

impl ResizeDriver {
    /// Creates a driver from a settings record
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidChord` if the shortcut does not parse,
    /// `ConfigError::InvalidRange` if the bounds or span are unusable.
    ///
    /// # Example
    ///
    /// ```
    /// use chord_resize::config::ResizeSettings;
    /// use chord_resize::driver::ResizeDriver;
    ///
    /// let driver = ResizeDriver::new(&ResizeSettings::default())?;
    /// assert!(!driver.is_armed());
    /// # Ok::<(), chord_resize::config::ConfigError>(())
    /// ```
    pub fn new(settings: &ResizeSettings) -> Result<Self, ConfigError> {
        let chord = settings.chord()?;
        let range = settings.drag_range()?;

        Ok(Self::with_parts(chord, range))
    }

    /// Creates a driver from an already parsed chord and range
    pub fn with_parts(chord: ChordSet, range: DragRange) -> Self {
        Self {
            tracker: ChordTracker::new(chord),
            session: DragRemapSession::new(),
            range,
            pointer_x: 0.0,
        }
    }

    pub fn chord(&self) -> &ChordSet {
        self.tracker.chord()
    }

    pub fn range(&self) -> DragRange {
        self.range
    }

    pub fn tracker(&self) -> &ChordTracker {
        &self.tracker
    }

    pub fn session(&self) -> &DragRemapSession {
        &self.session
    }

    pub fn is_armed(&self) -> bool {
        self.session.is_armed()
    }

    /// Radius of the overlay circle while armed
    pub fn overlay_radius(&self) -> Option<f64> {
        self.session.current_value().map(overlay_radius)
    }

    /// Routes one input event
    ///
    /// Returns the resulting lifecycle or value notification, if any.
    pub fn handle<H: ValueHost + ?Sized>(&mut self, event: InputEvent, host: &mut H) -> Option<DriverEvent> {
        match event {
            InputEvent::Press(input) => {
                let transition = self.tracker.on_press(input);
                self.on_transition(transition, host)
            }
            InputEvent::Release(input) => {
                let transition = self.tracker.on_release(input);
                self.on_transition(transition, host)
            }
            InputEvent::PointerMove(x) => self.pointer_move(x, host),
        }
    }

    /// Shorthand for [`InputEvent::Press`]
    pub fn press<H: ValueHost + ?Sized>(&mut self, input: impl Into<Input>, host: &mut H) -> Option<DriverEvent> {
        self.handle(InputEvent::Press(input.into()), host)
    }

    /// Shorthand for [`InputEvent::Release`]
    pub fn release<H: ValueHost + ?Sized>(&mut self, input: impl Into<Input>, host: &mut H) -> Option<DriverEvent> {
        self.handle(InputEvent::Release(input.into()), host)
    }

    fn on_transition<H: ValueHost + ?Sized>(&mut self, transition: ChordTransition, host: &mut H) -> Option<DriverEvent> {
        match transition {
            ChordTransition::Completed => self.arm(host),
            ChordTransition::Broken => self.disarm(),
            ChordTransition::Unchanged => None,
        }
    }

    fn arm<H: ValueHost + ?Sized>(&mut self, host: &mut H) -> Option<DriverEvent> {
        if !host.can_adjust() {
            debug!("Chord complete but host cannot adjust, not arming");
            return None;
        }

        match self.session.arm(host.current_value(), self.pointer_x, self.range) {
            Ok(armed) => {
                debug!(
                    anchor_x = armed.anchor_x,
                    value = armed.value_at_arm,
                    "Drag session armed"
                );
                Some(DriverEvent::Armed {
                    anchor_x: armed.anchor_x,
                    value: armed.value_at_arm,
                })
            }
            Err(e) => {
                warn!(error = %e, "Refusing to arm drag session");
                None
            }
        }
    }

    fn disarm(&mut self) -> Option<DriverEvent> {
        if self.session.disarm() {
            debug!("Drag session disarmed");
            Some(DriverEvent::Disarmed)
        } else {
            None
        }
    }

    fn pointer_move<H: ValueHost + ?Sized>(&mut self, x: f64, host: &mut H) -> Option<DriverEvent> {
        if !x.is_finite() {
            return None;
        }
        self.pointer_x = x;

        let value = self.session.pointer_move(x)?;
        trace!(pointer_x = x, value, "Drag value changed");
        host.set_value(value);

        Some(DriverEvent::ValueChanged(value))
    }

    /// Replaces the chord
    ///
    /// All pressed flags are cleared and a live session is forced to end.
    pub fn set_chord(&mut self, chord: ChordSet) -> Option<DriverEvent> {
        debug!(chord = %chord, "Replacing chord");
        self.tracker.set_chord(chord);
        self.disarm()
    }

    /// Applies a new settings record as one unit
    ///
    /// The record is fully validated before anything changes, so the
    /// driver never runs with the new chord and the old range or the
    /// reverse. A changed chord resets the tracker and ends a live
    /// session; a range-only change applies to the next arm and leaves a
    /// live session on the range it captured.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidChord` or `ConfigError::InvalidRange` if the
    /// record cannot be used; the driver is left unchanged.
    pub fn apply_settings(&mut self, settings: &ResizeSettings) -> Result<Option<DriverEvent>, ConfigError> {
        let report = SettingsValidator::new().validate(settings);
        for issue in report.errors() {
            warn!(field = issue.field, message = %issue.message, "Rejecting settings");
        }

        let chord = settings.chord()?;
        let range = settings.drag_range()?;

        self.range = range;

        if chord == *self.tracker.chord() {
            debug!("Settings applied, chord unchanged");
            Ok(None)
        } else {
            Ok(self.set_chord(chord))
        }
    }
}

#[cfg(test)]
mod tests;
