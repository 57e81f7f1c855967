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

//! Linear range remapping
//!
//! The two numeric primitives shared by the drag session: `remap` converts
//! a value between ranges, `clamp` bounds it. `DragRange` bundles the
//! value bounds and the drag span that a session captures when it arms.

use thiserror::Error;

/// Numeric range errors
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RemapError {
    /// A range is empty, inverted or not finite
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Maps `value` from `[src_min, src_max]` onto `[dst_min, dst_max]`
///
/// Computed as `dst_min + (value - src_min) / (src_max - src_min) * (dst_max - dst_min)`.
/// Values outside the source range extrapolate linearly; callers clamp.
///
/// # Errors
///
/// Returns `RemapError::InvalidRange` for a zero-width source range
/// instead of producing infinity or NaN.
///
/// # Example
///
/// ```
/// use chord_resize::core::remap::remap;
///
/// let x = remap(50.0, (0.0, 1000.0), (500.0, 600.0))?;
/// assert!((x - 505.0).abs() < 1e-9);
/// # Ok::<(), chord_resize::core::RemapError>(())
/// ```
pub fn remap(value: f64, src: (f64, f64), dst: (f64, f64)) -> Result<f64, RemapError> {
    let (src_min, src_max) = src;
    let (dst_min, dst_max) = dst;
    let src_span = src_max - src_min;

    if src_span == 0.0 || !src_span.is_finite() {
        return Err(RemapError::InvalidRange(format!(
            "source range [{}, {}] has no width",
            src_min, src_max
        )));
    }

    let scaled = (value - src_min) / src_span;
    Ok(dst_min + scaled * (dst_max - dst_min))
}

/// Limits `value` to `[min_value, max_value]`
///
/// Argument order follows the drag formula: `clamp(min, value, max)`.
pub fn clamp(min_value: f64, value: f64, max_value: f64) -> f64 {
    value.min(max_value).max(min_value)
}

/// Value bounds and drag distance for one drag gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRange {
    /// Lowest value a drag can produce
    pub value_min: f64,
    /// Highest value a drag can produce
    pub value_max: f64,
    /// Horizontal distance (pixels) that covers the whole value range
    pub drag_span: f64,
}

impl DragRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// `RemapError::InvalidRange` when `value_max <= value_min`,
    /// `drag_span <= 0`, or any field is not finite.
    pub fn new(value_min: f64, value_max: f64, drag_span: f64) -> Result<Self, RemapError> {
        let range = Self {
            value_min,
            value_max,
            drag_span,
        };
        range.validate()?;
        Ok(range)
    }

    /// Checks the invariants required for arming.
    pub fn validate(&self) -> Result<(), RemapError> {
        if !(self.value_min.is_finite() && self.value_max.is_finite() && self.drag_span.is_finite()) {
            return Err(RemapError::InvalidRange(format!(
                "non-finite bounds ({}, {}, span {})",
                self.value_min, self.value_max, self.drag_span
            )));
        }
        if self.value_max <= self.value_min {
            return Err(RemapError::InvalidRange(format!(
                "value max {} must be greater than value min {}",
                self.value_max, self.value_min
            )));
        }
        if self.drag_span <= 0.0 {
            return Err(RemapError::InvalidRange(format!(
                "drag span {} must be positive",
                self.drag_span
            )));
        }
        Ok(())
    }

    /// `value` clamped into the value bounds.
    pub fn clamp_value(&self, value: f64) -> f64 {
        clamp(self.value_min, value, self.value_max)
    }
}
