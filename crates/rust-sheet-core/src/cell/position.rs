//! Cell positions and their spreadsheet locations

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A zero-based grid position
///
/// Positions print and parse as spreadsheet locations: column letters followed by a
/// 1-based row number, so `Position::new(1, 11)` is `"B12"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index (0-based, A=0, B=1, ..., AA=26)
    pub column: u32,
    /// Row index (0-based internally, 1-based in a location)
    pub row: u32,
}

impl Position {
    /// Create a new position
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Parse a position from a location such as `"B12"`
    ///
    /// The location is split into a leading run of letters (the column) and the
    /// remaining digits (the 1-based row). Letters are accepted in either case.
    ///
    /// # Examples
    /// ```
    /// use rust_sheet_core::Position;
    ///
    /// let pos = Position::parse("B12").unwrap();
    /// assert_eq!(pos.column, 1);
    /// assert_eq!(pos.row, 11);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() {
            return Err(Error::location(format!("no column letters in '{}'", s)));
        }
        if digits.is_empty() {
            return Err(Error::location(format!("no row number in '{}'", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::location(format!("invalid row number in '{}'", s)));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| Error::location(format!("row number too large in '{}'", s)))?;

        // Locations are 1-based, positions are 0-based
        if row == 0 {
            return Err(Error::location(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self {
            column: Self::letters_to_column(letters)?,
            row: row - 1,
        })
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// The letters are a bijective base-26 numeral: `A..Z` stand for `1..26` and there
    /// is no zero digit, so the sum is shifted down by one at the end.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::location("empty column letters"));
        }

        let too_large = || Error::location(format!("column '{}' is too large", letters));

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::location(format!("invalid column letter '{}'", c)));
            }
            let digit = c.to_ascii_uppercase() as u64 - 'A' as u64 + 1;
            col = col
                .checked_mul(26)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(too_large)?;
        }

        u32::try_from(col - 1).map_err(|_| too_large())
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1; // 1-based for calculation

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Format as a location string, e.g. `"B12"`
    pub fn to_location(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.column), self.row as u64 + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_location())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
