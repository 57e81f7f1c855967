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

//! Line-oriented input event scripts
//!
//! Drives the core without a windowing system. One command per line:
//!
//! ```text
//! # comment
//! value 50        host's current value
//! press Shift     key or button by chord token name
//! release Right
//! move 600        pointer x
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Verbs are
//! case-insensitive.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{space0, space1},
    combinator::{all_consuming, value},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult, Parser,
};
use thiserror::Error;

use crate::core::{parser::parse_input, Input};

/// Raw input delivered by the host's input layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Press(Input),
    Release(Input),
    /// Horizontal pointer coordinate
    PointerMove(f64),
}

/// One parsed script command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptCommand {
    /// Sets the host's current value
    SetValue(f64),
    Event(InputEvent),
}

/// A command together with its 1-based line number
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// A script line that could not be parsed
#[derive(Clone, Debug, Error, PartialEq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Verb {
    Value,
    Press,
    Release,
    Move,
}

fn verb(input: &str) -> IResult<&str, Verb> {
    alt((
        value(Verb::Value, tag_no_case("value")),
        value(Verb::Press, tag_no_case("press")),
        value(Verb::Release, tag_no_case("release")),
        value(Verb::Move, tag_no_case("move")),
    ))
    .parse(input)
}

/// `<verb> <argument>` with optional surrounding whitespace
fn statement(input: &str) -> IResult<&str, (Verb, &str)> {
    all_consuming(terminated(
        (
            preceded(space0, verb),
            preceded(space1, take_while1(|c: char| !c.is_whitespace())),
        ),
        space0,
    ))
    .parse(input)
}

fn float(input: &str) -> IResult<&str, f64> {
    double(input)
}

fn number(line: usize, text: &str) -> Result<f64, ScriptError> {
    match all_consuming(float).parse(text) {
        Ok((_, n)) if n.is_finite() => Ok(n),
        _ => Err(ScriptError {
            line,
            message: format!("Expected a number, found '{}'", text),
        }),
    }
}

fn input(line: usize, token: &str) -> Result<Input, ScriptError> {
    parse_input(token).ok_or_else(|| ScriptError {
        line,
        message: format!("Unknown key or button '{}'", token),
    })
}

/// Parses a single line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptLine>, ScriptError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (_, (verb, argument)) = statement(trimmed).map_err(|_| ScriptError {
        line,
        message: format!("Expected 'value N', 'press KEY', 'release KEY' or 'move X', found '{}'", trimmed),
    })?;

    let command = match verb {
        Verb::Value => ScriptCommand::SetValue(number(line, argument)?),
        Verb::Move => ScriptCommand::Event(InputEvent::PointerMove(number(line, argument)?)),
        Verb::Press => ScriptCommand::Event(InputEvent::Press(input(line, argument)?)),
        Verb::Release => ScriptCommand::Event(InputEvent::Release(input(line, argument)?)),
    };

    Ok(Some(ScriptLine { line, command }))
}

/// Parses a whole script, stopping at the first bad line
///
/// # Example
///
/// ```
/// use chord_resize::driver::{parse_script, ScriptCommand};
///
/// let script = parse_script("value 50\npress Shift\n")?;
/// assert_eq!(script.len(), 2);
/// assert_eq!(script[0].command, ScriptCommand::SetValue(50.0));
/// # Ok::<(), chord_resize::driver::ScriptError>(())
/// ```
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut commands = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if let Some(parsed) = parse_line(index + 1, line)? {
            commands.push(parsed);
        }
    }

    Ok(commands)
}
