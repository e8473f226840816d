use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Board, Direction, MoveResult, Snapshot};

/// The tile that wins the game, unless configured otherwise with
/// [`Session::with_win_target()`].
pub const DEFAULT_WIN_TARGET: u32 = 128;

/// Probability that a spawned tile is a 2 rather than a 4.
const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Whether the win target has been reached, and whether the player acknowledged it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WinStatus {
    #[default]
    NotWon,
    /// The win target was reached, and the player has not decided yet
    /// whether to keep going.
    Won,
    /// The player kept playing after winning. Winning is not detected again.
    Continue,
}

/// The phase of a session, as shown to the player.
///
/// Derived from the [`WinStatus`] and the game-over flag. A session that is
/// both won and over reports [`Phase::Won`] first, because that state needs
/// an explicit acknowledgement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Continuing,
    Over,
}

/// Summarizes the outcome of [`Session::make_move()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game was won and the player has not called
    /// [`Session::keep_going()`] or [`Session::reset()`] yet.
    Blocked,
    /// Nothing would slide in this direction. The session is untouched.
    Unchanged,
    Moved { score_delta: u64 },
}

/// A board and the score that went with it, as kept in the undo/redo stacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Checkpoint {
    board: Board,
    score: u64,
}

/// Places a 2 (90%) or a 4 (10%) into a uniformly chosen empty cell.
///
/// A full board is returned unchanged.
pub fn spawn_random_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty_cells: Vec<(usize, usize)> = board.empty_cells().collect();
    let Some(&(row, col)) = empty_cells.choose(rng) else {
        return board;
    };
    let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) {
        2
    } else {
        4
    };
    board.with_tile(row, col, value)
}

/// An empty board with two random tiles, as at the start of a game.
pub fn seed_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let board = spawn_random_tile(Board::EMPTY, rng);
    spawn_random_tile(board, rng)
}

pub fn check_win(board: Board, target: u32) -> bool {
    board.contains(target)
}

/// Is the board full, with no two equal tiles next to each other?
pub fn check_game_over(board: Board) -> bool {
    board.count_empty() == 0 && !board.has_equal_neighbors()
}

/// The mutable state of one game, and the only way to change it.
///
/// All randomness (tile spawns) comes from the `rng`, so a session built
/// from a seeded RNG is fully reproducible.
///
/// The undo stack (`history`) and the redo stack (`future`) only ever change
/// through [`Self::make_move()`], [`Self::undo()`], [`Self::redo()`] and [`Self::reset()`].
#[derive(Clone, Debug)]
pub struct Session<R> {
    rng: R,
    board: Board,
    score: u64,
    /// Invariant: never smaller than `score`, and never decreases.
    best_score: u64,
    win_status: WinStatus,
    is_over: bool,
    win_target: u32,
    history: Vec<Checkpoint>,
    /// The top of this stack is the state that [`Self::redo()`] returns to.
    future: Vec<Checkpoint>,
}

impl<R: Rng> Session<R> {
    /// Starts a game on a fresh board with two random tiles.
    pub fn new(mut rng: R) -> Self {
        let board = seed_board(&mut rng);
        Self {
            rng,
            board,
            score: 0,
            best_score: 0,
            win_status: WinStatus::NotWon,
            is_over: false,
            win_target: DEFAULT_WIN_TARGET,
            history: Vec::new(),
            future: Vec::new(),
        }
    }

    /// Resumes a game from a persisted snapshot.
    ///
    /// A snapshot with an empty board is treated like a new game and gets two
    /// random tiles. The game-over flag is recomputed from the board, and the
    /// best score is raised to the restored score if needed. The undo/redo
    /// history is not part of a snapshot and starts out empty.
    pub fn restore(snapshot: Snapshot, best_score: u64, mut rng: R) -> Self {
        let board = if snapshot.board.is_empty() {
            seed_board(&mut rng)
        } else {
            snapshot.board
        };
        Self {
            rng,
            board,
            score: snapshot.score,
            best_score: best_score.max(snapshot.score),
            win_status: snapshot.win_status,
            is_over: check_game_over(board),
            win_target: DEFAULT_WIN_TARGET,
            history: Vec::new(),
            future: Vec::new(),
        }
    }

    /// Sets the tile value that wins the game.
    ///
    /// A target that is not a power of two can never be reached.
    #[must_use]
    pub fn with_win_target(mut self, win_target: u32) -> Self {
        self.win_target = win_target;
        self
    }

    /// Carries over a best score, e.g. one that was persisted by an earlier process.
    #[must_use]
    pub fn with_best_score(mut self, best_score: u64) -> Self {
        self.best_score = self.best_score.max(best_score);
        self
    }

    /// Slides the tiles in `direction`, then spawns a new tile.
    ///
    /// If nothing slides, or if the game is won and waiting for
    /// [`Self::keep_going()`], this does nothing at all.
    pub fn make_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.win_status == WinStatus::Won {
            return MoveOutcome::Blocked;
        }
        let MoveResult {
            board,
            moved,
            score_delta,
        } = self.board.shift(direction);
        if !moved {
            return MoveOutcome::Unchanged;
        }

        self.history.push(self.checkpoint());
        self.future.clear();

        // Winning is checked before the spawn, so a spawned tile never wins the game
        if self.win_status == WinStatus::NotWon && check_win(board, self.win_target) {
            self.win_status = WinStatus::Won;
        }

        self.board = spawn_random_tile(board, &mut self.rng);
        self.score += score_delta;
        self.best_score = self.best_score.max(self.score);

        // The spawn can fill the last empty cell, so this must look at the final board
        if check_game_over(self.board) {
            self.is_over = true;
        }

        MoveOutcome::Moved { score_delta }
    }

    /// Returns to the state before the last move. Returns `false` if there is nothing to undo.
    ///
    /// This clears the game-over flag, but leaves the [`WinStatus`] alone: a
    /// win that was reached (or acknowledged) stays that way.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.future.push(self.checkpoint());
        self.board = previous.board;
        self.score = previous.score;
        self.is_over = false;
        true
    }

    /// Reapplies the most recently undone move. Returns `false` if there is nothing to redo.
    ///
    /// The game-over flag is recomputed, so redoing the final move ends the game again.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        self.history.push(self.checkpoint());
        self.board = next.board;
        self.score = next.score;
        self.is_over = check_game_over(self.board);
        true
    }

    /// Acknowledges a win and unblocks moves. Returns `false` if the game was not in the won state.
    pub fn keep_going(&mut self) -> bool {
        if self.win_status != WinStatus::Won {
            return false;
        }
        self.win_status = WinStatus::Continue;
        true
    }

    /// Starts over on a fresh board. Only the best score survives.
    pub fn reset(&mut self) {
        self.board = seed_board(&mut self.rng);
        self.score = 0;
        self.is_over = false;
        self.win_status = WinStatus::NotWon;
        self.history.clear();
        self.future.clear();
    }
}

impl<R> Session<R> {
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn win_status(&self) -> WinStatus {
        self.win_status
    }

    /// Whether the last committed board had no possible move left.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn win_target(&self) -> u32 {
        self.win_target
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn phase(&self) -> Phase {
        match (self.win_status, self.is_over) {
            (WinStatus::Won, _) => Phase::Won,
            (_, true) => Phase::Over,
            (WinStatus::NotWon, false) => Phase::Playing,
            (WinStatus::Continue, false) => Phase::Continuing,
        }
    }

    /// The part of the state that is persisted between processes.
    ///
    /// The best score is persisted separately, see [`SnapshotStore`](crate::SnapshotStore).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            score: self.score,
            win_status: self.win_status,
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            board: self.board,
            score: self.score,
        }
    }
}
