//! Binary diagnostic report: gamma/epsilon rates and the oxygen-generator /
//! CO2-scrubber ratings derived from a rectangular table of bit rows.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use joinery::JoinableIterator;
use lazy_format::lazy_format;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticError {
    #[error("invalid bit {value} in candidate row {row}, column {column}")]
    InvalidBit { row: usize, column: usize, value: u8 },

    #[error("no rows to reduce")]
    EmptyInput,

    #[error("{remaining} candidate rows remain after reducing every column")]
    AmbiguousReduction { remaining: usize },

    #[error("column {column} is out of range for rows of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid character {found:?} at line {line}, column {column}")]
    InvalidDigit {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("{width}-bit value does not fit in 64 bits")]
    TooWide { width: usize },
}

use DiagnosticError::*;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rating {
    Most,
    Least,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct BitColumnCount {
    pub ones: usize,
    pub zeros: usize,
}

impl BitColumnCount {
    /// Tally one column across `rows`.
    pub fn tally<R: AsRef<[u8]>>(rows: &[R], column: usize) -> Result<Self, DiagnosticError> {
        let width = match rows.first() {
            None => return Err(EmptyInput),
            Some(row) => row.as_ref().len(),
        };

        if column >= width {
            return Err(ColumnOutOfRange { column, width });
        }

        rows.iter()
            .enumerate()
            .try_fold(Self::default(), |mut count, (row, cells)| {
                match cells.as_ref()[column] {
                    0 => count.zeros += 1,
                    1 => count.ones += 1,
                    value => return Err(InvalidBit { row, column, value }),
                }
                Ok(count)
            })
    }

    /// Ties go to 1.
    #[inline]
    pub fn majority(&self) -> u8 {
        if self.ones >= self.zeros {
            1
        } else {
            0
        }
    }

    #[inline]
    pub fn is_unanimous(&self) -> bool {
        self.ones == 0 || self.zeros == 0
    }

    pub fn bit_for(&self, rating: Rating) -> u8 {
        match rating {
            Rating::Most => self.majority(),
            // A unanimous column keeps its shared bit, so filtering on it
            // can never empty the candidate set.
            Rating::Least if self.is_unanimous() => self.majority(),
            Rating::Least => 1 - self.majority(),
        }
    }
}

/// Every cell must be 0 or 1, including cells in rows that a reduction
/// would filter out before reaching them.
fn check_bits<R: AsRef<[u8]>>(rows: &[R]) -> Result<(), DiagnosticError> {
    rows.iter().enumerate().try_for_each(|(row, cells)| {
        match cells.as_ref().iter().enumerate().find(|&(_, &value)| value > 1) {
            Some((column, &value)) => Err(InvalidBit { row, column, value }),
            None => Ok(()),
        }
    })
}

pub fn column_majority_bit<R: AsRef<[u8]>>(rows: &[R], column: usize) -> Result<u8, DiagnosticError> {
    BitColumnCount::tally(rows, column).map(|count| count.majority())
}

pub fn column_bit_for_rating<R: AsRef<[u8]>>(
    rows: &[R],
    column: usize,
    rating: Rating,
) -> Result<u8, DiagnosticError> {
    BitColumnCount::tally(rows, column).map(|count| count.bit_for(rating))
}

/// A fixed-length sequence of bits, most significant first.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Bits(Vec<u8>);

impl Bits {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn complement(&self) -> Self {
        Bits(self.0.iter().map(|&bit| if bit == 1 { 0 } else { 1 }).collect())
    }

    /// Interpret as an unsigned base-2 integer.
    pub fn value(&self) -> Result<u64, DiagnosticError> {
        if self.0.len() > 64 {
            return Err(TooWide { width: self.0.len() });
        }

        self.0
            .iter()
            .enumerate()
            .try_fold(0, |acc, (column, &bit)| match bit {
                0 | 1 => Ok((acc << 1) | u64::from(bit)),
                value => Err(InvalidBit {
                    row: 0,
                    column,
                    value,
                }),
            })
    }
}

impl From<&[u8]> for Bits {
    fn from(row: &[u8]) -> Self {
        Bits(row.to_vec())
    }
}

impl From<Vec<u8>> for Bits {
    fn from(bits: Vec<u8>) -> Self {
        Bits(bits)
    }
}

impl AsRef<[u8]> for Bits {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Bits {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0.iter().join_with(""))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct BitMatrix {
    rows: Vec<Vec<u8>>,
    width: usize,
}

impl BitMatrix {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, DiagnosticError> {
        let width = rows.first().map_or(0, Vec::len);

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        Ok(BitMatrix { rows, width })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn column_majority_bit(&self, column: usize) -> Result<u8, DiagnosticError> {
        column_majority_bit(&self.rows, column)
    }

    pub fn column_bit_for_rating(&self, column: usize, rating: Rating) -> Result<u8, DiagnosticError> {
        column_bit_for_rating(&self.rows, column, rating)
    }

    /// Returns `(gamma, epsilon)`.
    pub fn gamma_epsilon(&self) -> Result<(Bits, Bits), DiagnosticError> {
        if self.rows.is_empty() || self.width == 0 {
            return Err(EmptyInput);
        }

        let gamma: Bits = (0..self.width)
            .map(|column| self.column_majority_bit(column))
            .collect::<Result<Vec<u8>, _>>()?
            .into();
        let epsilon = gamma.complement();

        Ok((gamma, epsilon))
    }

    /// Repeatedly narrow the candidate rows by the bit `rating` selects in
    /// each column, until one row remains.
    pub fn diagnostic_rating(&self, rating: Rating) -> Result<Bits, DiagnosticError> {
        let mut candidates: Vec<&[u8]> = self.rows.iter().map(Vec::as_slice).collect();

        match candidates.as_slice() {
            [] => return Err(EmptyInput),
            [row] => return Ok(Bits::from(*row)),
            _ => check_bits(&candidates)?,
        }

        for column in 0..self.width {
            let target = column_bit_for_rating(&candidates, column, rating)?;
            candidates.retain(|row| row[column] == target);

            debug!(?rating, column, bit = target, remaining = candidates.len(), "filtered candidates");

            if let [row] = candidates.as_slice() {
                return Ok(Bits::from(*row));
            }
        }

        Err(AmbiguousReduction {
            remaining: candidates.len(),
        })
    }

    /// Returns `(oxygen, co2)`. Both reductions start from the full matrix
    /// and run in parallel.
    pub fn oxygen_and_co2_ratings(&self) -> Result<(Bits, Bits), DiagnosticError> {
        let (oxygen, co2) = rayon::join(
            || self.diagnostic_rating(Rating::Most),
            || self.diagnostic_rating(Rating::Least),
        );

        Ok((oxygen?, co2?))
    }
}

impl FromStr for BitMatrix {
    type Err = DiagnosticError;

    fn from_str(input: &str) -> Result<Self, DiagnosticError> {
        let rows = input
            .lines()
            .enumerate()
            .map(|(line, text)| {
                text.trim()
                    .chars()
                    .enumerate()
                    .map(|(column, c)| {
                        c.to_digit(10).map(|digit| digit as u8).ok_or(InvalidDigit {
                            line: line + 1,
                            column: column + 1,
                            found: c,
                        })
                    })
                    .collect::<Result<Vec<u8>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        BitMatrix::new(rows)
    }
}

/// A pair of rates and their product, e.g. `10110 (22) * 01001 (9) = 198`.
fn product_line(name: &'static str, a: Bits, b: Bits) -> Result<impl Display, DiagnosticError> {
    let va = a.value()?;
    let vb = b.value()?;
    let product = u128::from(va) * u128::from(vb);

    Ok(lazy_format!("{}: {} ({}) * {} ({}) = {}", name, a, va, b, vb, product))
}

pub fn solve(input: &str) -> Result<impl Display, DiagnosticError> {
    let matrix: BitMatrix = input.parse()?;

    let (gamma, epsilon) = matrix.gamma_epsilon()?;
    let (oxygen, co2) = matrix.oxygen_and_co2_ratings()?;

    let power = product_line("power consumption", gamma, epsilon)?;
    let life_support = product_line("life support", oxygen, co2)?;

    Ok(lazy_format!("{}\n{}", power, life_support))
}
