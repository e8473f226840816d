use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;
use twenty48::{Phase, Session, WinStatus};

/// The result of one game played by [`play_random_game()`].
#[derive(Clone, Copy, Debug)]
pub struct GameRecord {
    pub score: u64,
    pub highest_tile: u32,
    pub moves: usize,
    pub won: bool,
}

/// Aggregated results of [`play_games()`].
#[derive(Clone, Debug, Default)]
pub struct AutoplaySummary {
    pub games: usize,
    pub wins: usize,
    pub total_score: u64,
    pub best_score: u64,
    pub highest_tile: u32,
    pub total_moves: usize,
}

impl AutoplaySummary {
    fn record(&mut self, game: GameRecord) {
        self.games += 1;
        self.wins += usize::from(game.won);
        self.total_score += game.score;
        self.best_score = self.best_score.max(game.score);
        self.highest_tile = self.highest_tile.max(game.highest_tile);
        self.total_moves += game.moves;
    }

    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }
}

impl std::fmt::Display for AutoplaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "End result:\n- {} games, {} won\n- mean score {:.1}, best score {}\n- highest tile {}\n- {} moves in total",
            self.games,
            self.wins,
            self.mean_score(),
            self.best_score,
            self.highest_tile,
            self.total_moves
        )
    }
}

/// Plays one game to the end, choosing uniformly among the directions that move something.
///
/// A win is acknowledged immediately and play continues until no move is left.
pub fn play_random_game<R: Rng>(session: &mut Session<R>, rng: &mut impl Rng) -> GameRecord {
    let mut moves = 0;
    loop {
        match session.phase() {
            Phase::Won => {
                session.keep_going();
            }
            Phase::Over => break,
            Phase::Playing | Phase::Continuing => {}
        }
        let directions = session.board().legal_directions();
        let Some(&direction) = directions.choose(rng) else {
            break;
        };
        session.make_move(direction);
        moves += 1;
    }
    GameRecord {
        score: session.score(),
        highest_tile: session.board().highest_tile(),
        moves,
        won: session.win_status() != WinStatus::NotWon,
    }
}

/// Plays `num_games` random games. Each game gets its own seed drawn from `rng`.
pub fn play_games(rng: &mut StdRng, num_games: usize, win_target: u32) -> AutoplaySummary {
    let mut summary = AutoplaySummary::default();
    for game_idx in 0..num_games {
        let game_seed: u64 = rng.gen();
        let mut session =
            Session::new(StdRng::seed_from_u64(game_seed)).with_win_target(win_target);
        let game = play_random_game(&mut session, rng);
        debug!(
            game_idx,
            game_seed,
            score = game.score,
            highest_tile = game.highest_tile,
            moves = game.moves,
            won = game.won
        );
        summary.record(game);
    }
    summary
}
