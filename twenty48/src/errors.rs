/// The error type for building a [`Board`](crate::Board) from raw cells.
///
/// Boards produced by the engine itself are always valid, so this only shows up
/// at the edges, i.e. when cells come from a user or from a persisted snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidBoard {
    NotAPowerOfTwo { row: usize, col: usize, value: u32 },
}

impl std::error::Error for InvalidBoard {}

impl std::fmt::Display for InvalidBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBoard::NotAPowerOfTwo { row, col, value } => write!(
                f,
                "The cell at row {}, column {} holds {}, which is neither empty nor a power of two",
                row, col, value
            ),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Direction`](crate::Direction).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDirectionError {
    pub input: String,
}

impl std::error::Error for ParseDirectionError {}

impl std::fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a direction", self.input)
    }
}
