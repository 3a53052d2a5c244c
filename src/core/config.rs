/// Column letters in board order. J, U and W are not part of the alphabet.
pub const COLUMNS: [char; MAX_RANGE] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T',
    'V', 'X', 'Y', 'Z',
];

/// Smallest board dimension accepted by `start`.
pub const MIN_RANGE: usize = 1;

/// Largest board dimension: one column per letter in [`COLUMNS`].
pub const MAX_RANGE: usize = 23;

/// Separator between ship specs and between the cells of one shot.
pub const LIST_SEPARATOR: char = ',';

/// Separator between the two endpoints of a ship spec.
pub const ENDPOINT_SEPARATOR: char = ' ';

/// Index of a column letter in [`COLUMNS`], if the letter is part of the alphabet.
pub fn column_index(letter: char) -> Option<usize> {
    COLUMNS.iter().position(|&c| c == letter)
}

/// Column letter for a zero-based column index.
pub fn column_letter(index: usize) -> Option<char> {
    COLUMNS.get(index).copied()
}
