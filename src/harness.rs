//! Shared plumbing for the per-day binaries: stdin reading, timing, logging
//! setup, and regex field extraction.

use std::fmt::Display;
use std::io::{self, Read};
use std::process::exit;
use std::str::FromStr;
use std::time::{Duration, Instant};

use regex::Captures;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "ADVENT_LOG";

#[inline(always)]
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    let end = Instant::now();
    (result, end - start)
}

pub trait ReadString: Read {
    fn read_string(&mut self) -> io::Result<String> {
        let mut data = String::new();
        self.read_to_string(&mut data).map(|_| data)
    }
}

impl<T: Read> ReadString for T {}

/// Install a stderr `fmt` subscriber filtered by `ADVENT_LOG` (default
/// `info`). Stdout is reserved for the answer.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read all of stdin, solve it, and print the answer. Any failure is logged
/// and the process exits with status 1 without printing a partial answer.
pub fn run<T, E>(solve: impl FnOnce(&str) -> Result<T, E>)
where
    T: Display,
    E: Display,
{
    init_logging();

    let ((), total_duration) = timed(move || {
        let input = io::stdin().read_string().unwrap_or_else(|err| {
            error!("Error reading input: {}", err);
            exit(1);
        });

        let (solution, duration) = timed(move || solve(input.trim_end()));
        match solution {
            Ok(solution) => println!("{}", solution),
            Err(err) => {
                error!("{}", err);
                exit(1);
            }
        }

        info!("Algorithm duration: {:?}", duration);
    });
    info!("Total duration: {:?}", total_duration);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("group {0} didn't match anything")]
    MissingGroup(usize),

    #[error("failed to parse group {index} {field:?}: {reason}")]
    BadField {
        index: usize,
        field: String,
        reason: String,
    },
}

pub trait RegexExtractor<'t> {
    fn field(&self, index: usize) -> Result<&'t str, ExtractError>;

    fn parse<T: FromStr>(&self, index: usize) -> Result<T, ExtractError>
    where
        T::Err: Display;
}

impl<'t> RegexExtractor<'t> for Captures<'t> {
    #[inline]
    fn field(&self, index: usize) -> Result<&'t str, ExtractError> {
        self.get(index)
            .map(|group| group.as_str())
            .ok_or(ExtractError::MissingGroup(index))
    }

    #[inline]
    fn parse<T: FromStr>(&self, index: usize) -> Result<T, ExtractError>
    where
        T::Err: Display,
    {
        let field = self.field(index)?;

        field.parse().map_err(move |err: T::Err| ExtractError::BadField {
            index,
            field: field.to_owned(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn extracts_and_parses_groups() {
        let pattern = Regex::new(r"(\w+) (\d+)(x)?").unwrap();
        let caps = pattern.captures("down 12").unwrap();

        assert_eq!(caps.field(1), Ok("down"));
        assert_eq!(caps.parse::<u32>(2), Ok(12));
        assert_eq!(caps.field(3), Err(ExtractError::MissingGroup(3)));
    }

    #[test]
    fn reports_unparsable_group() {
        let pattern = Regex::new(r"(\d+)").unwrap();
        let caps = pattern.captures("300").unwrap();

        match caps.parse::<u8>(1) {
            Err(ExtractError::BadField { index, field, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "300");
            }
            other => panic!("expected BadField, got {:?}", other),
        }
    }

    #[test]
    fn timed_returns_result() {
        let (value, _duration) = timed(|| 2 + 2);
        assert_eq!(value, 4);
    }
}
