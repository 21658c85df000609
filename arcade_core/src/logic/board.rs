use crate::logic::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 8;
pub const SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two players. `First` moves first and sits on the low rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// +1 when `self` is `perspective`, -1 otherwise.
    pub const fn sign_for(self, perspective: Self) -> i32 {
        if self.index() == perspective.index() {
            1
        } else {
            -1
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        Self::new(usize::try_from(row).ok()?, usize::try_from(col).ok()?)
    }

    /// Chebyshev distance (king steps).
    pub const fn distance(self, other: Self) -> u8 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        if dr > dc {
            dr
        } else {
            dc
        }
    }

    /// Steps away from the central four squares, 0 in the centre and 6 in a corner.
    pub const fn centre_distance(self) -> u8 {
        let dr = if self.row < 4 { 3 - self.row } else { self.row - 4 };
        let dc = if self.col < 4 { 3 - self.col } else { self.col - 4 };
        dr + dc
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SQUARES).map(Self::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Parses an 8x8 text grid, first line is row 0. Blank lines and
/// surrounding whitespace are ignored; `cell` maps a character to a cell
/// value or `None` when the character is not part of the alphabet.
pub fn parse_grid<T: Copy>(
    text: &str,
    empty: T,
    mut cell: impl FnMut(char) -> Option<T>,
) -> Result<[T; SQUARES], ParseError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.len() != BOARD_SIZE {
        return Err(ParseError::RowCount {
            expected: BOARD_SIZE,
            got: rows.len(),
        });
    }

    let mut grid = [empty; SQUARES];
    for (row, line) in rows.iter().enumerate() {
        let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != BOARD_SIZE {
            return Err(ParseError::RowLength {
                row,
                expected: BOARD_SIZE,
                got: chars.len(),
            });
        }
        for (col, &character) in chars.iter().enumerate() {
            let value = cell(character).ok_or(ParseError::InvalidCell {
                character,
                row,
                col,
            })?;
            grid[row * BOARD_SIZE + col] = value;
        }
    }
    Ok(grid)
}

/// Inverse of [`parse_grid`]: one line per row, row 0 first.
pub fn render_grid<T: Copy>(grid: &[T; SQUARES], mut glyph: impl FnMut(T) -> char) -> String {
    let mut out = String::with_capacity(SQUARES + BOARD_SIZE);
    for (index, &value) in grid.iter().enumerate() {
        out.push(glyph(value));
        if index % BOARD_SIZE == BOARD_SIZE - 1 {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_offset_bounds() {
        let c = Coord::new(0, 7).unwrap();
        assert_eq!(c.offset(1, -1), Coord::new(1, 6));
        assert_eq!(c.offset(-1, 0), None);
        assert_eq!(c.offset(0, 1), None);
        assert_eq!(Coord::new(8, 0), None);
    }

    #[test]
    fn test_coord_index_round_trip() {
        for c in Coord::all() {
            assert_eq!(Coord::from_index(c.index()), c);
        }
    }

    #[test]
    fn test_centre_distance() {
        assert_eq!(Coord::new(3, 4).unwrap().centre_distance(), 0);
        assert_eq!(Coord::new(0, 0).unwrap().centre_distance(), 6);
        assert_eq!(Coord::new(7, 7).unwrap().centre_distance(), 6);
    }

    #[test]
    fn test_parse_grid_errors() {
        let short = "........\n........";
        assert_eq!(
            parse_grid(short, 0u8, |_| Some(0)),
            Err(ParseError::RowCount {
                expected: 8,
                got: 2
            })
        );

        let text = "........\n".repeat(7) + "...z....";
        let result = parse_grid(&text, 0u8, |c| (c == '.').then_some(0));
        assert_eq!(
            result,
            Err(ParseError::InvalidCell {
                character: 'z',
                row: 7,
                col: 3
            })
        );
    }

    #[test]
    fn test_render_matches_parse() {
        let text = "x.......\n".to_string() + &"........\n".repeat(7);
        let grid = parse_grid(&text, false, |c| match c {
            'x' => Some(true),
            '.' => Some(false),
            _ => None,
        })
        .unwrap();
        assert_eq!(render_grid(&grid, |v| if v { 'x' } else { '.' }), text);
    }
}
