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

//! src/core/mod.rs
//!
//! Core chord and drag logic
//!
//! This module contains the fundamental data structures and algorithms
//! for chord-triggered drag adjustment, including:
//! - Type definitions for keys, mouse buttons and chords
//! - Chord text parsing and canonical formatting
//! - Press-state tracking with HashMap-based O(1) lookup
//! - The anchor-preserving drag session state machine
//! - Shortcut capture from live input
//!
//! All logic here is isolated from I/O and host concerns so it can be
//! unit tested without a windowing system.

pub mod parser;
pub mod recorder;
pub mod remap;
pub mod session;
pub mod tracker;
pub mod types;

pub use recorder::ChordRecorder;
pub use remap::{clamp, remap, DragRange, RemapError};
pub use session::{ArmedSession, DragRemapSession, SessionState};
pub use tracker::{ChordTracker, ChordTransition};
pub use types::*;

#[cfg(test)]
mod tests;
