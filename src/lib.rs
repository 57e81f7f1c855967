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

//! Chord-triggered drag adjustment
//!
//! Hold a configurable combination of keys and mouse buttons (a "chord"),
//! then drag the pointer horizontally to adjust a bounded value such as a
//! brush size. The value never jumps when the drag starts: the drag range
//! is anchored so the press point maps back to the value the host had.
//!
//! # Features
//!
//! - **Order-independent chords:** "Shift+Right" and "Right+Shift" are the same chord
//! - **Idempotent tracking:** key auto-repeat and missed presses are absorbed
//! - **Anchored remapping:** linear, clamped, stable for the whole gesture
//! - **Atomic reconfiguration:** chord and range are swapped together
//! - **Lenient settings:** malformed fields fall back to defaults, saves are atomic
//!
//! # Architecture
//!
//! - **`core`:** Chord types, parsing, press tracking, drag session, shortcut recording
//! - **`config`:** Settings record, store, validation, file watching
//! - **`driver`:** Routes host input through the core, event scripts
//!
//! # Examples
//!
//! ## Parsing a chord
//!
//! ```
//! use chord_resize::ChordSet;
//!
//! let chord = ChordSet::parse("Shift+Right")?;
//! assert_eq!(chord, ChordSet::parse("Right+Shift")?);
//! assert_eq!(chord.to_string(), "Right+Shift");
//! # Ok::<(), chord_resize::core::ChordError>(())
//! ```
//!
//! ## Driving a drag
//!
//! ```
//! use chord_resize::config::ResizeSettings;
//! use chord_resize::core::{Key, MouseButton};
//! use chord_resize::driver::{DriverEvent, InputEvent, ResizeDriver, ValueHost};
//!
//! struct Brush(f64);
//!
//! impl ValueHost for Brush {
//!     fn current_value(&self) -> f64 { self.0 }
//!     fn set_value(&mut self, value: f64) { self.0 = value; }
//! }
//!
//! let mut brush = Brush(50.0);
//! let mut driver = ResizeDriver::new(&ResizeSettings::default())?;
//!
//! driver.handle(InputEvent::PointerMove(500.0), &mut brush);
//! driver.press(Key::Shift, &mut brush);
//! driver.press(MouseButton::Right, &mut brush);
//! assert!(driver.is_armed());
//!
//! let event = driver.handle(InputEvent::PointerMove(600.0), &mut brush);
//! assert_eq!(event, Some(DriverEvent::ValueChanged(1000.0)));
//! assert_eq!(brush.0, 1000.0);
//! # Ok::<(), chord_resize::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;
pub mod driver;

// Re-export commonly used types for convenience
pub use config::{ResizeSettings, SettingsStore};
pub use core::{ChordRecorder, ChordSet, ChordTracker, DragRange, DragRemapSession, Input, Key, MouseButton};
pub use driver::{DriverEvent, InputEvent, ResizeDriver, ValueHost};
