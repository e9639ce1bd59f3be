//! Dive: plot the submarine's course from a list of commands.

use std::fmt::Display;
use std::str::FromStr;

use lazy_format::lazy_format;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::harness::{ExtractError, RegexExtractor};

lazy_static! {
    static ref COMMAND: Regex = RegexBuilder::new(r"^(forward|down|up)\s+(\d+)$")
        .case_insensitive(true)
        .build()
        .expect("command pattern is valid");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiveError {
    #[error("unrecognized command {0:?}")]
    BadCommand(String),

    #[error("invalid field in command {line:?}: {source}")]
    BadField { line: String, source: ExtractError },

    #[error("line {line}: {source}")]
    AtLine { line: usize, source: Box<DiveError> },

    #[error("position overflowed while applying {0:?}")]
    Overflow(Command),

    #[error("product of {0:?} overflowed")]
    ProductOverflow(Position),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Forward,
    Down,
    Up,
}

impl FromStr for Direction {
    type Err = DiveError;

    fn from_str(s: &str) -> Result<Self, DiveError> {
        use Direction::*;

        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Forward),
            "down" => Ok(Down),
            "up" => Ok(Up),
            _ => Err(DiveError::BadCommand(s.to_owned())),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Command {
    pub direction: Direction,
    pub value: i64,
}

impl FromStr for Command {
    type Err = DiveError;

    fn from_str(line: &str) -> Result<Self, DiveError> {
        let line = line.trim();
        let caps = COMMAND
            .captures(line)
            .ok_or_else(|| DiveError::BadCommand(line.to_owned()))?;

        let bad_field = |source| DiveError::BadField {
            line: line.to_owned(),
            source,
        };

        Ok(Command {
            direction: caps.field(1).map_err(bad_field)?.parse()?,
            value: caps.parse(2).map_err(bad_field)?,
        })
    }
}

pub fn parse_commands(input: &str) -> Result<Vec<Command>, DiveError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.parse::<Command>().map_err(|err| DiveError::AtLine {
                line: index + 1,
                source: Box::new(err),
            })
        })
        .collect()
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub horizontal: i64,
    pub depth: i64,
    pub aim: i64,
}

impl Position {
    #[inline]
    pub fn product(&self) -> Option<i64> {
        self.horizontal.checked_mul(self.depth)
    }

    /// `up` and `down` move the depth directly.
    pub fn steer(self, command: &Command) -> Result<Self, DiveError> {
        use Direction::*;

        let value = command.value;
        let moved = match command.direction {
            Forward => self.horizontal.checked_add(value).map(|horizontal| Position { horizontal, ..self }),
            Down => self.depth.checked_add(value).map(|depth| Position { depth, ..self }),
            Up => self.depth.checked_sub(value).map(|depth| Position { depth, ..self }),
        };

        moved.ok_or(DiveError::Overflow(*command))
    }

    /// `up` and `down` turn the aim; `forward` dives along it.
    pub fn steer_with_aim(self, command: &Command) -> Result<Self, DiveError> {
        use Direction::*;

        let value = command.value;
        let moved = match command.direction {
            Forward => self.horizontal.checked_add(value).and_then(|horizontal| {
                let depth = self.aim.checked_mul(value)?.checked_add(self.depth)?;
                Some(Position {
                    horizontal,
                    depth,
                    ..self
                })
            }),
            Down => self.aim.checked_add(value).map(|aim| Position { aim, ..self }),
            Up => self.aim.checked_sub(value).map(|aim| Position { aim, ..self }),
        };

        moved.ok_or(DiveError::Overflow(*command))
    }
}

pub fn plot_course<'a>(commands: impl IntoIterator<Item = &'a Command>) -> Result<Position, DiveError> {
    commands
        .into_iter()
        .try_fold(Position::default(), Position::steer)
}

pub fn plot_aimed_course<'a>(
    commands: impl IntoIterator<Item = &'a Command>,
) -> Result<Position, DiveError> {
    commands
        .into_iter()
        .try_fold(Position::default(), Position::steer_with_aim)
}

/// `horizontal * depth`, failing rather than wrapping.
fn product_of(position: Position) -> Result<i64, DiveError> {
    position.product().ok_or(DiveError::ProductOverflow(position))
}

pub fn solve(input: &str) -> Result<impl Display, DiveError> {
    let commands = parse_commands(input)?;

    let simple = plot_course(&commands)?;
    let aimed = plot_aimed_course(&commands)?;
    let (simple_product, aimed_product) = (product_of(simple)?, product_of(aimed)?);

    Ok(lazy_format!(
        "horizontal {} * depth {} = {}\nwith aim: horizontal {} * depth {} = {}",
        simple.horizontal,
        simple.depth,
        simple_product,
        aimed.horizontal,
        aimed.depth,
        aimed_product
    ))
}
