//! Cell coordinates and the text codec for tokens such as `"1A"` or `"10B"`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::common::GameError;
use super::config::{column_index, column_letter};

/// Zero-based board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    column: usize,
    row: usize,
}

impl Coordinate {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Parse a single token into a coordinate, ignoring the board size.
    /// Returns `None` for anything that is not a well-formed token.
    pub fn parse(token: &str) -> Option<Self> {
        let (row_number, column) = split_token(token)?;
        Some(Self::new(column, row_number.checked_sub(1)?))
    }

    /// Render the coordinate back into its token form, if the column has a letter.
    pub fn format(&self) -> Option<String> {
        column_letter(self.column).map(|letter| format!("{}{}", self.row + 1, letter))
    }

    /// Whether the coordinate lies on a `range`×`range` board.
    pub fn within(&self, range: usize) -> bool {
        self.column < range && self.row < range
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from a `(column, row)` pair.
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match column_letter(self.column) {
            Some(letter) => write!(f, "{}{}", self.row + 1, letter),
            None => write!(f, "({}, {})", self.column, self.row),
        }
    }
}

/// Split a trimmed token into its 1-based row number and column index.
fn split_token(token: &str) -> Option<(usize, usize)> {
    let token = token.trim();
    let len = token.chars().count();
    if !(2..=3).contains(&len) {
        return None;
    }
    let letter = token.chars().last()?;
    let column = column_index(letter)?;
    let digits = &token[..token.len() - letter.len_utf8()];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row_number = digits.parse().ok()?;
    Some((row_number, column))
}

/// Parse a token and check it against a `range`×`range` board.
///
/// Malformed tokens are skipped (`Ok(None)`); well-formed tokens that fall off the
/// board are a bad request naming the token.
pub fn parse_in_range(token: &str, range: usize) -> Result<Option<Coordinate>, GameError> {
    let Some((row_number, column)) = split_token(token) else {
        return Ok(None);
    };
    if row_number == 0 || row_number > range || column >= range {
        return Err(GameError::bad_request(format!(
            "Coordinate '{}' out of range.",
            token.trim()
        )));
    }
    Ok(Some(Coordinate::new(column, row_number - 1)))
}

/// Split `input` on `separator`, trim each entry, drop empty entries.
pub fn split_list(input: &str, separator: char) -> impl Iterator<Item = &str> {
    input.split(separator).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse every token of a separated list, skipping malformed tokens.
pub fn parse_list(input: &str, separator: char, range: usize) -> Result<Vec<Coordinate>, GameError> {
    let mut cells = Vec::new();
    for token in split_list(input, separator) {
        if let Some(c) = parse_in_range(token, range)? {
            cells.push(c);
        }
    }
    Ok(cells)
}
