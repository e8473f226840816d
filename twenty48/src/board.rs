use serde::{Deserialize, Serialize};

use crate::InvalidBoard;

/// The number of rows and columns of the board.
pub const BOARD_SIZE: usize = 4;

/// A single row of the board, left to right.
///
/// Columns are handled as rows too, after rotating the board.
pub type Row = [u32; BOARD_SIZE];

/// The raw cell values of a board, row-major.
pub type Cells = [Row; BOARD_SIZE];

/// A 4x4 grid of tiles.
///
/// Every cell is either 0 (empty) or a power of two that is at least 2.
/// This is checked when a board is built from raw cells, see the
/// [`TryFrom`] instance, and preserved by every operation afterwards.
///
/// # Note on immutability
///
/// Like the other value types in this crate, a `Board` is [`Copy`] and its
/// "mutating" methods return a new board instead of changing it in place.
///
/// ```
/// use twenty48::{board, Board};
/// let board = board![
///     [2, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 4, 0],
///     [0, 0, 0, 0],
/// ];
/// assert_eq!(board.get(2, 2), Some(4));
/// assert_eq!(board.get(4, 0), None);
/// assert_eq!(board.count_empty(), 14);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Cells", into = "Cells")]
pub struct Board {
    rows: Cells,
}

impl Board {
    /// A board without any tiles.
    pub const EMPTY: Board = Board {
        rows: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Wraps cells that are already known to be valid, e.g. the output of a slide.
    pub(crate) fn from_valid_rows(rows: Cells) -> Self {
        debug_assert!(rows.iter().flatten().all(|&value| is_valid_cell(value)));
        Self { rows }
    }

    pub fn rows(&self) -> &Cells {
        &self.rows
    }

    /// The value at the given coordinates, or `None` if they are off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Returns a copy of this board with one cell replaced.
    ///
    /// Panics if the coordinates are off the board or the value is not a valid cell.
    #[must_use]
    pub fn with_tile(self, row: usize, col: usize, value: u32) -> Self {
        assert!(is_valid_cell(value), "{} is not a tile value", value);
        let mut rows = self.rows;
        rows[row][col] = value;
        Self { rows }
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.rows[row][col] == 0)
    }

    pub fn count_empty(self) -> usize {
        self.rows.iter().flatten().filter(|&&value| value == 0).count()
    }

    /// Does the board have no tiles at all?
    pub fn is_empty(self) -> bool {
        self == Board::EMPTY
    }

    pub fn contains(self, value: u32) -> bool {
        self.rows.iter().flatten().any(|&cell| cell == value)
    }

    /// The highest tile on the board, or 0 for an empty board.
    pub fn highest_tile(self) -> u32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Are there two equal cells next to each other, horizontally or vertically?
    ///
    /// Empty cells count too, so this is only meaningful for a full board.
    pub fn has_equal_neighbors(self) -> bool {
        let rows = &self.rows;
        let horizontal = rows
            .iter()
            .any(|row| row.windows(2).any(|pair| pair[0] == pair[1]));
        let vertical = rows
            .windows(2)
            .any(|pair| pair[0].iter().zip(&pair[1]).any(|(a, b)| a == b));
        horizontal || vertical
    }

    /// Rotates the board by 90° clockwise.
    ///
    /// The top row becomes the rightmost column:
    /// `new[x][y] = old[BOARD_SIZE - 1 - y][x]`.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        let mut rows = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (x, new_row) in rows.iter_mut().enumerate() {
            for (y, cell) in new_row.iter_mut().enumerate() {
                *cell = self.rows[BOARD_SIZE - 1 - y][x];
            }
        }
        Self { rows }
    }

    /// Rotates the board by 270° clockwise, i.e. three clockwise quarter turns.
    #[must_use]
    pub fn rotate_counterclockwise(self) -> Self {
        self.rotate_clockwise().rotate_clockwise().rotate_clockwise()
    }

    /// Reverses every row, so that the leftmost column becomes the rightmost one.
    #[must_use]
    pub fn mirror(self) -> Self {
        let mut rows = self.rows;
        for row in &mut rows {
            row.reverse();
        }
        Self { rows }
    }
}

fn is_valid_cell(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl TryFrom<Cells> for Board {
    type Error = InvalidBoard;

    fn try_from(rows: Cells) -> Result<Self, Self::Error> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if !is_valid_cell(value) {
                    return Err(InvalidBoard::NotAPowerOfTwo { row, col, value });
                }
            }
        }
        Ok(Self { rows })
    }
}

impl From<Board> for Cells {
    fn from(board: Board) -> Cells {
        board.rows
    }
}

/// Shorthand for creating a board from four row literals.
///
/// This macro is just calling the [`TryFrom`] instance of [`Board`], and
/// panics if a cell is neither 0 nor a power of two.
/// ```
/// # use twenty48::board;
/// let board = board![
///     [2, 2, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 8],
/// ];
/// assert_eq!(board.highest_tile(), 8);
/// ```
#[macro_export]
macro_rules! board {
    ($($row:expr),+ $(,)?) => {
        <$crate::Board as std::convert::TryFrom<$crate::Cells>>::try_from([$($row),+])
            .expect("Invalid cells given to board! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use board;
