//! Sonar sweep: how often the sea floor depth increases.

use std::fmt::Display;
use std::num::ParseIntError;

use lazy_format::lazy_format;
use thiserror::Error;

/// Width of the noise-reducing window used by the second answer.
pub const WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SonarError {
    #[error("failed to parse depth {text:?} on line {line}: {source}")]
    BadDepth {
        line: usize,
        text: String,
        source: ParseIntError,
    },
}

pub fn parse_depths(input: &str) -> Result<Vec<u32>, SonarError> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, text)| {
            text.parse::<u32>().map_err(|source| SonarError::BadDepth {
                line,
                text: text.to_owned(),
                source,
            })
        })
        .collect()
}

#[inline]
fn increases<T: PartialOrd>(depths: impl Iterator<Item = T>) -> usize {
    depths
        .fold((None, 0), |(previous, count), depth| match previous {
            Some(previous) if depth > previous => (Some(depth), count + 1),
            _ => (Some(depth), count),
        })
        .1
}

pub fn count_increases(depths: &[u32]) -> usize {
    increases(depths.iter().cloned())
}

/// Compare consecutive sums of `width` measurements instead of single
/// measurements.
pub fn count_window_increases(depths: &[u32], width: usize) -> usize {
    if width == 0 {
        return 0;
    }

    increases(
        depths
            .windows(width)
            .map(|window| window.iter().map(|&depth| u64::from(depth)).sum::<u64>()),
    )
}

pub fn solve(input: &str) -> Result<impl Display, SonarError> {
    let depths = parse_depths(input)?;

    let single = count_increases(&depths);
    let windowed = count_window_increases(&depths, WINDOW);

    Ok(lazy_format!(
        "depth increases: {}\nwindowed depth increases: {}",
        single,
        windowed
    ))
}
