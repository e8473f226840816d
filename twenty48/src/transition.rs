use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Board, Cells, ParseDirectionError, Row, BOARD_SIZE};

/// A direction to slide and merge tiles in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// Accepts the direction names and the `w`/`a`/`s`/`d` keys, case-insensitively.
impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(ParseDirectionError {
                input: String::from(s),
            }),
        }
    }
}

/// Summarizes the effect of sliding a board in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    /// The board after sliding, before any new tile is spawned.
    pub board: Board,
    /// Whether any cell differs from the input board.
    pub moved: bool,
    /// The sum of all tiles produced by merges in this move.
    pub score_delta: u64,
}

/// Slides the tiles of one row to the left and merges equal neighbors.
///
/// Merges happen pairwise, leftmost first, and a merged tile is never merged
/// again within the same slide, so `[2, 2, 4, 0]` becomes `[4, 4, 0, 0]`
/// and not `[8, 0, 0, 0]`. Returns the new row and the sum of the merged tiles.
///
/// ```
/// use twenty48::slide_and_merge_row;
/// assert_eq!(slide_and_merge_row([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
/// assert_eq!(slide_and_merge_row([4, 4, 2, 2]), ([8, 4, 0, 0], 12));
/// ```
pub fn slide_and_merge_row(row: Row) -> (Row, u64) {
    let mut new_row = [0; BOARD_SIZE];
    let mut score = 0;
    let mut tiles = row.into_iter().filter(|&value| value != 0).peekable();
    // There are at most BOARD_SIZE tiles, so the cursor stays in bounds
    for slot in new_row.iter_mut() {
        let Some(tile) = tiles.next() else {
            break;
        };
        *slot = if tiles.next_if_eq(&tile).is_some() {
            let merged = tile
                .checked_mul(2)
                .expect("Merged tile does not fit into a u32");
            score += u64::from(merged);
            merged
        } else {
            tile
        };
    }
    (new_row, score)
}

/// Slides all rows to the left.
///
/// This is the only direction that is implemented directly, all others
/// transform the board, slide left and transform back.
pub fn move_left(board: Board) -> MoveResult {
    let mut moved = false;
    let mut score_delta = 0;
    let rows = Cells::from(board).map(|row| {
        let (new_row, score) = slide_and_merge_row(row);
        moved |= new_row != row;
        score_delta += score;
        new_row
    });
    MoveResult {
        board: Board::from_valid_rows(rows),
        moved,
        score_delta,
    }
}

pub fn move_right(board: Board) -> MoveResult {
    board.shift(Direction::Right)
}

pub fn move_up(board: Board) -> MoveResult {
    board.shift(Direction::Up)
}

pub fn move_down(board: Board) -> MoveResult {
    board.shift(Direction::Down)
}

type Transform = fn(Board) -> Board;

impl Direction {
    /// The transform that turns a slide in this direction into a leftward slide,
    /// and its inverse.
    fn transforms(self) -> (Transform, Transform) {
        match self {
            Direction::Left => (std::convert::identity, std::convert::identity),
            Direction::Right => (Board::mirror, Board::mirror),
            Direction::Up => (Board::rotate_counterclockwise, Board::rotate_clockwise),
            Direction::Down => (Board::rotate_clockwise, Board::rotate_counterclockwise),
        }
    }
}

impl Board {
    /// Slides and merges all tiles in `direction`, without spawning a new tile.
    ///
    /// ```
    /// use twenty48::{board, Direction};
    /// let board = board![
    ///     [2, 0, 0, 0],
    ///     [2, 0, 0, 0],
    ///     [4, 0, 0, 0],
    ///     [0, 0, 0, 0],
    /// ];
    /// let result = board.shift(Direction::Down);
    /// assert!(result.moved);
    /// assert_eq!(result.score_delta, 4);
    /// assert_eq!(result.board.get(3, 0), Some(4));
    /// assert_eq!(result.board.get(2, 0), Some(4));
    /// ```
    pub fn shift(self, direction: Direction) -> MoveResult {
        let (into_left, back) = direction.transforms();
        let result = move_left(into_left(self));
        MoveResult {
            board: back(result.board),
            ..result
        }
    }

    /// Would sliding in this direction change the board?
    pub fn can_move(self, direction: Direction) -> bool {
        self.shift(direction).moved
    }

    /// All directions in which sliding changes the board, in the order of [`Direction::ALL`].
    pub fn legal_directions(self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_move(direction))
            .collect()
    }
}
