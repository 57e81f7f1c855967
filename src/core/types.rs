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

//! src/core/types.rs
//!
//! Core type definitions for chord recognition
//!
//! This module defines the fundamental types used throughout the crate:
//! - `MouseButton`: The three mouse buttons a chord can use
//! - `Key`: Keyboard keys (four named modifiers plus ordinary keys)
//! - `Input`: Either a key or a mouse button, as delivered by the host
//! - `ChordSet`: The set of keys and buttons that must be held together
//!
//! Identifiers are opaque: only equality, ordering and set membership are
//! used. The derived ordering is the display order of the chord text.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between tokens in chord text ("Right+Shift").
pub const SEPARATOR: char = '+';

/// Text used for a chord with no members.
pub const EMPTY_CHORD_TEXT: &str = "None";

/// Errors produced while building or parsing a chord.
#[derive(Debug, Error, PartialEq)]
pub enum ChordError {
    /// The chord would contain no keys and no buttons
    #[error("Invalid chord '{0}': a chord needs at least one key or mouse button")]
    InvalidChordSpec(String),

    /// A token did not name any known key or button
    #[error("Unknown key or button '{token}' in chord '{text}'")]
    UnknownInput { token: String, text: String },
}

/// Mouse buttons usable in a chord.
///
/// Declaration order is the fixed display order: Left, Right, Middle.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// All buttons in display order.
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Display name of the button.
    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "Left",
            MouseButton::Right => "Right",
            MouseButton::Middle => "Middle",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Non-character keys that have a key-sequence name.
///
/// The arrow keys Left/Right share their names with mouse buttons and are
/// not representable in chord text.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NamedKey {
    Space,
    Tab,
    Escape,
    Return,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
}

impl NamedKey {
    /// Every named key, used when matching tokens.
    pub const ALL: [NamedKey; 13] = [
        NamedKey::Space,
        NamedKey::Tab,
        NamedKey::Escape,
        NamedKey::Return,
        NamedKey::Backspace,
        NamedKey::Delete,
        NamedKey::Insert,
        NamedKey::Home,
        NamedKey::End,
        NamedKey::PageUp,
        NamedKey::PageDown,
        NamedKey::Up,
        NamedKey::Down,
    ];

    /// Key-sequence text for this key.
    pub fn name(self) -> &'static str {
        match self {
            NamedKey::Space => "Space",
            NamedKey::Tab => "Tab",
            NamedKey::Escape => "Esc",
            NamedKey::Return => "Return",
            NamedKey::Backspace => "Backspace",
            NamedKey::Delete => "Del",
            NamedKey::Insert => "Ins",
            NamedKey::Home => "Home",
            NamedKey::End => "End",
            NamedKey::PageUp => "PgUp",
            NamedKey::PageDown => "PgDown",
            NamedKey::Up => "Up",
            NamedKey::Down => "Down",
        }
    }
}

/// Keyboard keys usable in a chord.
///
/// The four modifiers come first so they are displayed before ordinary
/// keys: Ctrl, Meta, Alt, Shift.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Key {
    Ctrl,
    Meta,
    Alt,
    Shift,
    /// Function key F1..F35
    Function(u8),
    /// Named non-character key
    Named(NamedKey),
    /// Printable character, stored uppercase
    Char(char),
}

impl Key {
    /// Builds a character key, normalising letters to uppercase.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }

    /// Same key with character keys uppercased, so `Key::Char('k')` and
    /// `Key::char('k')` compare equal once normalized.
    pub fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::char(c),
            key => key,
        }
    }

    /// True for Ctrl, Meta, Alt and Shift.
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Ctrl | Key::Meta | Key::Alt | Key::Shift)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Ctrl => write!(f, "Ctrl"),
            Key::Meta => write!(f, "Meta"),
            Key::Alt => write!(f, "Alt"),
            Key::Shift => write!(f, "Shift"),
            Key::Function(n) => write!(f, "F{}", n),
            Key::Named(named) => write!(f, "{}", named.name()),
            // '+' is the separator, so it needs a name of its own
            Key::Char('+') => write!(f, "Plus"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A single key or mouse button, as carried by press/release events.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Input {
    Key(Key),
    Button(MouseButton),
}

impl Input {
    /// See [`Key::normalized`].
    pub fn normalized(self) -> Self {
        match self {
            Input::Key(key) => Input::Key(key.normalized()),
            button => button,
        }
    }
}

impl From<Key> for Input {
    fn from(key: Key) -> Self {
        Input::Key(key)
    }
}

impl From<MouseButton> for Input {
    fn from(button: MouseButton) -> Self {
        Input::Button(button)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Key(key) => write!(f, "{}", key),
            Input::Button(button) => write!(f, "{}", button),
        }
    }
}

/// The keys and mouse buttons that must all be held to form a chord.
///
/// Both halves are sets, so equality is order independent: "Shift+Right"
/// and "Right+Shift" produce equal values. A chord always has at least one
/// member; [`ChordSet::new`] rejects the empty chord. Chords are persisted
/// as text only.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ChordSet {
    keys: BTreeSet<Key>,
    buttons: BTreeSet<MouseButton>,
}

impl ChordSet {
    /// Creates a chord from keys and buttons, removing duplicates.
    ///
    /// Character keys are uppercased.
    ///
    /// # Errors
    ///
    /// Returns `ChordError::InvalidChordSpec` when both are empty.
    pub fn new(
        keys: impl IntoIterator<Item = Key>,
        buttons: impl IntoIterator<Item = MouseButton>,
    ) -> Result<Self, ChordError> {
        let keys: BTreeSet<Key> = keys.into_iter().map(Key::normalized).collect();
        let buttons: BTreeSet<MouseButton> = buttons.into_iter().collect();

        if keys.is_empty() && buttons.is_empty() {
            return Err(ChordError::InvalidChordSpec(EMPTY_CHORD_TEXT.to_string()));
        }

        Ok(Self { keys, buttons })
    }

    /// Parses chord text such as "Right+Shift".
    ///
    /// See [`crate::core::parser::parse_chord`] for the accepted grammar.
    pub fn parse(text: &str) -> Result<Self, ChordError> {
        crate::core::parser::parse_chord(text)
    }

    /// Reports whether `input` is a member of this chord.
    pub fn contains(&self, input: &Input) -> bool {
        match input {
            Input::Key(key) => self.keys.contains(&key.normalized()),
            Input::Button(button) => self.buttons.contains(button),
        }
    }

    pub fn keys(&self) -> &BTreeSet<Key> {
        &self.keys
    }

    pub fn buttons(&self) -> &BTreeSet<MouseButton> {
        &self.buttons
    }

    /// All members, buttons first, in display order.
    pub fn members(&self) -> impl Iterator<Item = Input> + '_ {
        self.buttons
            .iter()
            .copied()
            .map(Input::Button)
            .chain(self.keys.iter().copied().map(Input::Key))
    }

    /// Number of inputs that must be held.
    pub fn len(&self) -> usize {
        self.keys.len() + self.buttons.len()
    }

    /// Always false for a constructed chord; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Canonical chord text: buttons (Left, Right, Middle) then keys, joined by `+`.
impl fmt::Display for ChordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::core::parser::chord_text(&self.keys, &self.buttons))
    }
}

impl FromStr for ChordSet {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
