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

//! src/core/parser.rs
//!
//! Chord text parser and formatter
//!
//! Chord text is a `+`-separated list of tokens, e.g. `Right+Shift` or
//! `Ctrl + Alt + Middle`. It handles:
//! - Mouse buttons by name (Left, Right, Middle)
//! - The four modifiers by name, with common aliases (Control, Super, Win)
//! - Function keys (F1..F35), named keys (Space, Esc, PgUp, ...)
//! - Single printable characters (`K`, `7`), with `Plus` for the `+` key
//!
//! Token matching is case-insensitive. Tokens naming a mouse button always
//! resolve to the button, so the arrow keys Left/Right cannot be bound.
//!
//! # Architecture
//! The token list is split with nom combinators; each token is then
//! resolved on its own. Formatting is the inverse and always produces the
//! canonical order (buttons first, then keys), so the text a user typed and
//! the text a chord displays may differ while describing the same chord.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    multi::separated_list1,
    IResult, Parser,
};
use std::collections::BTreeSet;

use crate::core::types::{
    ChordError, ChordSet, Input, Key, MouseButton, NamedKey, EMPTY_CHORD_TEXT, SEPARATOR,
};

/// Highest function key accepted in chord text.
const MAX_FUNCTION_KEY: u8 = 35;

/// Parse chord text into a [`ChordSet`]
///
/// # Returns
/// The parsed chord, or:
/// - `ChordError::InvalidChordSpec` when the text is empty or `"None"`
/// - `ChordError::UnknownInput` when a token names nothing we know
///
/// # Example
/// ```
/// use chord_resize::core::parser::parse_chord;
///
/// let a = parse_chord("Shift+Right")?;
/// let b = parse_chord("right + shift")?;
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "Right+Shift");
/// # Ok::<(), chord_resize::core::ChordError>(())
/// ```
pub fn parse_chord(text: &str) -> Result<ChordSet, ChordError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EMPTY_CHORD_TEXT) {
        return Err(ChordError::InvalidChordSpec(text.to_string()));
    }

    let (rest, tokens) = chord_tokens(trimmed).map_err(|_| ChordError::InvalidChordSpec(text.to_string()))?;

    // Anything left over is an empty token ("Shift++Right") or a dangling separator
    if !rest.is_empty() {
        return Err(ChordError::UnknownInput {
            token: rest.to_string(),
            text: text.to_string(),
        });
    }

    let mut keys = Vec::new();
    let mut buttons = Vec::new();

    for token in tokens {
        match parse_input(token) {
            Some(Input::Key(key)) => keys.push(key),
            Some(Input::Button(button)) => buttons.push(button),
            None => {
                return Err(ChordError::UnknownInput {
                    token: token.to_string(),
                    text: text.to_string(),
                })
            }
        }
    }

    ChordSet::new(keys, buttons).map_err(|_| ChordError::InvalidChordSpec(text.to_string()))
}

/// Split chord text into raw tokens
///
/// Whitespace around separators is skipped; tokens themselves cannot
/// contain whitespace or the separator.
pub fn chord_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(
        (space0, char(SEPARATOR), space0),
        take_while1(|c: char| c != SEPARATOR && !c.is_whitespace()),
    )
    .parse(input)
}

/// Resolve a single token to a key or mouse button
///
/// Mouse button names are checked first, matching how chord text is
/// displayed (buttons before keys).
pub fn parse_input(token: &str) -> Option<Input> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(button) = parse_button(token) {
        return Some(Input::Button(button));
    }

    parse_key(token).map(Input::Key)
}

/// Resolve a mouse button name ("Left", "Right", "Middle")
pub fn parse_button(token: &str) -> Option<MouseButton> {
    MouseButton::ALL
        .into_iter()
        .find(|button| button.name().eq_ignore_ascii_case(token))
}

/// Resolve a key name
///
/// Handles:
/// - "Ctrl" / "Control" → Ctrl
/// - "Meta" / "Super" / "Win" → Meta
/// - "Alt", "Shift"
/// - "F1".."F35" → Function
/// - named keys and their aliases ("Esc" / "Escape", "PgUp" / "PageUp")
/// - "Plus" → '+'
/// - any other single character
pub fn parse_key(token: &str) -> Option<Key> {
    let upper = token.to_uppercase();

    let key = match upper.as_str() {
        "CTRL" | "CONTROL" => Key::Ctrl,
        "META" | "SUPER" | "WIN" => Key::Meta,
        "ALT" => Key::Alt,
        "SHIFT" => Key::Shift,
        "PLUS" => Key::Char('+'),
        "ESCAPE" => Key::Named(NamedKey::Escape),
        "ENTER" => Key::Named(NamedKey::Return),
        "DELETE" => Key::Named(NamedKey::Delete),
        "INSERT" => Key::Named(NamedKey::Insert),
        "PAGEUP" => Key::Named(NamedKey::PageUp),
        "PAGEDOWN" => Key::Named(NamedKey::PageDown),
        _ => {
            if let Some(named) = NamedKey::ALL
                .into_iter()
                .find(|named| named.name().eq_ignore_ascii_case(token))
            {
                return Some(Key::Named(named));
            }
            if let Some(n) = parse_function_key(&upper) {
                return Some(Key::Function(n));
            }

            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != SEPARATOR && !c.is_control() => Key::char(c),
                _ => return None,
            }
        }
    };

    Some(key)
}

/// "F5" → 5, bounded to F1..F35
fn parse_function_key(upper: &str) -> Option<u8> {
    let digits = upper.strip_prefix('F')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match digits.parse::<u8>() {
        Ok(n) if (1..=MAX_FUNCTION_KEY).contains(&n) => Some(n),
        _ => None,
    }
}

/// Format keys and buttons as canonical chord text
///
/// Buttons come first in the fixed order Left, Right, Middle, then keys
/// (Ctrl, Meta, Alt, Shift, then everything else). An empty selection
/// renders as `"None"`.
pub fn chord_text(keys: &BTreeSet<Key>, buttons: &BTreeSet<MouseButton>) -> String {
    if keys.is_empty() && buttons.is_empty() {
        return EMPTY_CHORD_TEXT.to_string();
    }

    buttons
        .iter()
        .map(|button| button.to_string())
        .chain(keys.iter().map(|key| key.to_string()))
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Parse then re-format, yielding the canonical spelling of `text`
pub fn normalize_chord(text: &str) -> Result<String, ChordError> {
    Ok(parse_chord(text)?.to_string())
}
