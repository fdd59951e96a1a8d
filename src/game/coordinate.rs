//! Board cell references.

use std::{fmt, str::FromStr};

/// Number of rows and columns of a board.
pub const BOARD_SIZE: usize = 10;

/// A board cell such as `A1` or `J10`.
///
/// The letter selects the row (`A` to `J`), the number the column (`1` to
/// `10`). Parsing is strict: lowercase letters, leading zeros, surrounding
/// garbage and out of range values are all rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Zero based row index
    row: usize,
    /// Zero based column index
    column: usize,
}

/// The text is not a valid board cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate {0:?}, expected a row A-J followed by a column 1-10")]
pub struct CoordinateError(pub String);

impl Coordinate {
    /// Zero based row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Zero based column index.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoordinateError(s.to_owned());

        let mut chars = s.chars();
        let row = match chars.next() {
            Some(letter @ 'A'..='J') => letter as usize - 'A' as usize,
            _ => return Err(invalid()),
        };

        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let column: usize = digits.parse().map_err(|_| invalid())?;
        if !(1..=BOARD_SIZE).contains(&column) {
            return Err(invalid());
        }

        Ok(Coordinate {
            row,
            column: column - 1,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = (b'A' + self.row as u8) as char;
        write!(f, "{}{}", letter, self.column + 1)
    }
}
