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

//! Settings validation.
//!
//! Collects every problem with a settings record into a report instead of
//! stopping at the first one:
//! - **Errors** make the record unusable (bad shortcut, empty or inverted
//!   range, no drag span); the driver refuses to apply it
//! - **Warnings** flag values outside the bounds the settings panel offers
//!
//! # Example
//! ```
//! use chord_resize::config::{ResizeSettings, SettingsValidator};
//!
//! let report = SettingsValidator::new().validate(&ResizeSettings::default());
//! assert!(!report.has_errors());
//! ```

use std::ops::RangeInclusive;

use crate::config::ResizeSettings;

/// Bounds offered by the settings panel for the drag span.
pub const MAX_SIZE_BOUNDS: RangeInclusive<i64> = 10..=1000;
/// Bounds offered by the settings panel for the upper value.
pub const MAX_BRUSH_SIZE_BOUNDS: RangeInclusive<i64> = 10..=10000;
/// Bounds offered by the settings panel for the lower value.
pub const MIN_BRUSH_SIZE_BOUNDS: RangeInclusive<i64> = 0..=1000;

/// Validation severity level
///
/// - **Error**: the settings cannot be applied
/// - **Warning**: the settings work but are unusual
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationLevel {
    Error,
    Warning,
}

/// A single problem found in a settings record
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    /// JSON key of the offending field
    pub field: &'static str,
    /// Severity level (Error/Warning)
    pub validation_level: ValidationLevel,
    /// Human-readable description of the issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

/// All issues found in one settings record
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any issue blocks applying the settings
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.validation_level == ValidationLevel::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.validation_level == ValidationLevel::Warning)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Adds an Error-level issue to the report
    pub fn add_error(&mut self, field: &'static str, message: String) {
        self.issues.push(ValidationIssue {
            field,
            validation_level: ValidationLevel::Error,
            message,
            suggestion: None,
        });
    }

    /// Adds a Warning-level issue to the report
    pub fn add_warning(&mut self, field: &'static str, message: String, suggestion: Option<String>) {
        self.issues.push(ValidationIssue {
            field,
            validation_level: ValidationLevel::Warning,
            message,
            suggestion,
        });
    }

    /// Error-level issues only
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.validation_level == ValidationLevel::Error)
    }
}

/// Checks settings records for errors and out-of-bounds values
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates every field and cross-field constraint
    pub fn validate(&self, settings: &ResizeSettings) -> ValidationReport {
        let mut report = ValidationReport::new();

        if let Err(e) = settings.chord() {
            report.add_error("shortcut", e.to_string());
        }

        if settings.max_brush_size <= settings.min_brush_size {
            report.add_error(
                "max_brush_size",
                format!(
                    "Maximum size {} must be greater than minimum size {}",
                    settings.max_brush_size, settings.min_brush_size
                ),
            );
        }

        if settings.max_size <= 0 {
            report.add_error(
                "max_size",
                format!("Drag span {} must be positive", settings.max_size),
            );
        }

        Self::check_bounds(&mut report, "max_size", settings.max_size, &MAX_SIZE_BOUNDS);
        Self::check_bounds(&mut report, "max_brush_size", settings.max_brush_size, &MAX_BRUSH_SIZE_BOUNDS);
        Self::check_bounds(&mut report, "min_brush_size", settings.min_brush_size, &MIN_BRUSH_SIZE_BOUNDS);

        report
    }

    fn check_bounds(report: &mut ValidationReport, field: &'static str, value: i64, bounds: &RangeInclusive<i64>) {
        if !bounds.contains(&value) {
            report.add_warning(
                field,
                format!(
                    "{} = {} is outside the usual range {}..={}",
                    field,
                    value,
                    bounds.start(),
                    bounds.end()
                ),
                Some(format!(
                    "Use a value between {} and {}",
                    bounds.start(),
                    bounds.end()
                )),
            );
        }
    }
}
