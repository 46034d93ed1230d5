//! Square coordinates and algebraic labels
//!
//! Squares are stored as zero-based `(row, col)`. Row 0 is White's back rank
//! (rank 1) and column 0 is file A. Labels are converted here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const FILES: &[u8; 8] = b"ABCDEFGH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row > 7 || col > 7 {
            None
        } else {
            Some(Self { row, col })
        }
    }

    /// Parse a two-character label such as `E4` (file is case-insensitive).
    pub fn parse(label: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate(label.to_string());

        let bytes = label.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }

        let file = bytes[0].to_ascii_uppercase();
        let rank = bytes[1];

        let col = FILES.iter().position(|&f| f == file).ok_or_else(invalid)?;
        if !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }

        Self::new(rank - b'1', col as u8).ok_or_else(invalid)
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn file_char(self) -> char {
        FILES[self.col as usize] as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.row) as char
    }

    /// Step by a signed delta, staying on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = (self.row as i8).checked_add(d_row)?;
        let col = (self.col as i8).checked_add(d_col)?;
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// All 64 squares, rank-major from A1.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl TryFrom<String> for Square {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        value.to_string()
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
