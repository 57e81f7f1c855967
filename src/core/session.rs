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

//! Drag-to-adjust session state machine
//!
//! # States
//!
//! - **Idle**: no drag in progress, pointer moves produce nothing
//! - **Armed**: the chord is held; pointer moves remap to values
//!
//! # Anchor
//!
//! Arming computes an anchor x so that the pointer position at arm time
//! maps back to the value the host had before the drag. The drag range is
//! `[anchor_x, anchor_x + drag_span]`, mapped linearly onto
//! `[value_min, value_max]`, so pressing the chord never makes the value
//! jump. The anchor is fixed for the whole gesture.

use crate::core::remap::{clamp, remap, DragRange, RemapError};

/// Values captured when a session arms
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmedSession {
    /// Pointer x at which the drag range starts (maps to `value_min`)
    pub anchor_x: f64,
    /// Pointer x at arm time
    pub press_x: f64,
    /// Host value at arm time, clamped into the range
    pub value_at_arm: f64,
    /// Most recent value emitted (or `value_at_arm` before any move)
    pub last_value: f64,
    /// Bounds captured at arm time
    pub range: DragRange,
}

impl ArmedSession {
    /// Value for a pointer at `pointer_x`, clamped to the captured range.
    pub fn value_at(&self, pointer_x: f64) -> Result<f64, RemapError> {
        let start = self.anchor_x;
        let end = self.anchor_x + self.range.drag_span;

        let value = remap(
            pointer_x,
            (start, end),
            (self.range.value_min, self.range.value_max),
        )?;

        Ok(clamp(self.range.value_min, value, self.range.value_max))
    }
}

/// Session state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Armed(ArmedSession),
}

/// Drag session: Idle → Armed on chord completion, back to Idle when the
/// chord breaks.
#[derive(Debug, Default)]
pub struct DragRemapSession {
    state: SessionState,
}

/// Computes the drag anchor for a press at `pointer_x`
///
/// `anchor_x = pointer_x - |pointer_x - remap(value, [min, max], [pointer_x, pointer_x + span])|`
///
/// With `value` inside `[min, max]` the remapped point never lies left of
/// the pointer, so this equals `2 * pointer_x - remapped`.
pub fn anchor_for(value: f64, pointer_x: f64, range: &DragRange) -> Result<f64, RemapError> {
    let remapped = remap(
        value,
        (range.value_min, range.value_max),
        (pointer_x, pointer_x + range.drag_span),
    )?;

    Ok(pointer_x - (pointer_x - remapped).abs())
}

impl DragRemapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, SessionState::Armed(_))
    }

    /// Anchor of the live session, if armed.
    pub fn anchor_x(&self) -> Option<f64> {
        match &self.state {
            SessionState::Armed(armed) => Some(armed.anchor_x),
            SessionState::Idle => None,
        }
    }

    /// Last emitted value of the live session, if armed.
    pub fn current_value(&self) -> Option<f64> {
        match &self.state {
            SessionState::Armed(armed) => Some(armed.last_value),
            SessionState::Idle => None,
        }
    }

    /// Enters Armed from a completed chord.
    ///
    /// `current_value` is clamped into the range before the anchor is
    /// computed. Re-arming an armed session replaces its anchor.
    ///
    /// # Errors
    ///
    /// `RemapError::InvalidRange` for an empty/inverted value range, a
    /// non-positive drag span, or a non-finite value or pointer x; the
    /// session is left Idle.
    pub fn arm(&mut self, current_value: f64, pointer_x: f64, range: DragRange) -> Result<ArmedSession, RemapError> {
        if let Err(e) = range.validate() {
            self.state = SessionState::Idle;
            return Err(e);
        }

        if !current_value.is_finite() || !pointer_x.is_finite() {
            self.state = SessionState::Idle;
            return Err(RemapError::InvalidRange(format!(
                "cannot arm at value {} and pointer x {}",
                current_value, pointer_x
            )));
        }

        let value_at_arm = range.clamp_value(current_value);
        let anchor_x = match anchor_for(value_at_arm, pointer_x, &range) {
            Ok(anchor_x) => anchor_x,
            Err(e) => {
                self.state = SessionState::Idle;
                return Err(e);
            }
        };

        let armed = ArmedSession {
            anchor_x,
            press_x: pointer_x,
            value_at_arm,
            last_value: value_at_arm,
            range,
        };
        self.state = SessionState::Armed(armed);

        Ok(armed)
    }

    /// Remaps a pointer move while armed.
    ///
    /// Returns the new value, or `None` when idle or when `pointer_x` is
    /// not finite. The anchor is not recomputed.
    pub fn pointer_move(&mut self, pointer_x: f64) -> Option<f64> {
        let SessionState::Armed(armed) = &mut self.state else {
            return None;
        };

        if !pointer_x.is_finite() {
            return None;
        }

        // Range was validated at arm time, so the source span is never zero
        let value = armed.value_at(pointer_x).ok()?;
        armed.last_value = value;
        Some(value)
    }

    /// Returns to Idle, discarding the anchor. Returns whether a session
    /// was live.
    pub fn disarm(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.state = SessionState::Idle;
        was_armed
    }
}
