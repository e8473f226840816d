use rand::Rng;
use tracing::{debug, info};
use twenty48::{MoveOutcome, Phase, Session, SnapshotStore};

use crate::command::Command;

/// What the caller should do after a command was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Show the board again.
    Render,
    Help,
    Quit,
}

/// Connects a [`Session`] to the player's commands and, optionally, to durable storage.
///
/// Every change to the session is written to the store right away.
pub struct Console<R, S> {
    session: Session<R>,
    store: Option<S>,
}

impl<R: Rng, S: SnapshotStore> Console<R, S> {
    /// Resumes the game in the store if there is one, otherwise starts a new game.
    pub fn start(rng: R, win_target: u32, mut store: Option<S>) -> anyhow::Result<Self> {
        let session = match &mut store {
            Some(store) => {
                let best_score = store.load_best_score()?;
                match store.load_snapshot()? {
                    Some(snapshot) => {
                        info!(score = snapshot.score, best_score, "Resuming saved game");
                        Session::restore(snapshot, best_score, rng)
                    }
                    None => {
                        info!(best_score, "Starting a new game");
                        Session::new(rng).with_best_score(best_score)
                    }
                }
            }
            None => {
                info!("Starting a new game");
                Session::new(rng)
            }
        };
        let mut console = Self {
            session: session.with_win_target(win_target),
            store,
        };
        console.persist()?;
        Ok(console)
    }

    pub fn apply(&mut self, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::Move(direction) => match self.session.make_move(direction) {
                MoveOutcome::Blocked => {
                    info!("The game is won, type 'k' to keep going or 'n' for a new game");
                }
                MoveOutcome::Unchanged => {
                    debug!(%direction, "Nothing moved");
                }
                MoveOutcome::Moved { score_delta } => {
                    debug!(%direction, score_delta, score = self.session.score());
                    match self.session.phase() {
                        Phase::Won => info!(score = self.session.score(), "Game won"),
                        Phase::Over => info!(score = self.session.score(), "Game over"),
                        Phase::Playing | Phase::Continuing => {}
                    }
                    self.persist()?;
                }
            },
            Command::Undo => {
                if self.session.undo() {
                    debug!(score = self.session.score(), "Undo");
                    self.persist()?;
                } else {
                    info!("Nothing to undo");
                }
            }
            Command::Redo => {
                if self.session.redo() {
                    debug!(score = self.session.score(), "Redo");
                    self.persist()?;
                } else {
                    info!("Nothing to redo");
                }
            }
            Command::KeepGoing => {
                if self.session.keep_going() {
                    debug!("Keep going");
                    self.persist()?;
                }
            }
            Command::NewGame => {
                self.session.reset();
                info!(best_score = self.session.best_score(), "Starting a new game");
                if let Some(store) = &mut self.store {
                    store.clear_snapshot()?;
                }
            }
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Render)
    }

    fn persist(&mut self) -> anyhow::Result<()> {
        if let Some(store) = &mut self.store {
            store.save_snapshot(&self.session.snapshot())?;
            store.save_best_score(self.session.best_score())?;
        }
        Ok(())
    }
}

impl<R, S> Console<R, S> {
    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// The board, the scores and a line about what the player can do next.
    pub fn render(&self) -> String {
        let session = &self.session;
        let hint = match session.phase() {
            Phase::Playing | Phase::Continuing => "",
            Phase::Won => "\nYou win! Type 'k' to keep going or 'n' for a new game.",
            Phase::Over => "\nGame over! Type 'u' to undo or 'n' for a new game.",
        };
        let mut actions = Vec::new();
        if session.can_undo() {
            actions.push("u: undo");
        }
        if session.can_redo() {
            actions.push("r: redo");
        }
        format!(
            "{}\nScore: {}   Best: {}   Goal: {}   {}{}",
            session.board(),
            session.score(),
            session.best_score(),
            session.win_target(),
            actions.join("  "),
            hint
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use twenty48::{board, Direction, Snapshot, WinStatus};

    use super::*;
    use crate::store::tests::test_dir;
    use crate::JsonStore;

    fn start(store: JsonStore, seed: u64) -> Console<StdRng, JsonStore> {
        Console::start(StdRng::seed_from_u64(seed), 128, Some(store)).unwrap()
    }

    #[test]
    fn new_game_is_persisted() {
        let dir = test_dir("console-new-game");
        let console = start(JsonStore::new(dir.clone()).unwrap(), 1);
        let mut store = JsonStore::new(dir).unwrap();
        assert_eq!(
            store.load_snapshot().unwrap(),
            Some(console.session().snapshot())
        );
    }

    #[test]
    fn resumes_saved_game() {
        let dir = test_dir("console-resume");
        let mut store = JsonStore::new(dir.clone()).unwrap();
        let snapshot = Snapshot {
            board: board![
                [2, 2, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            score: 20,
            win_status: WinStatus::NotWon,
        };
        store.save_snapshot(&snapshot).unwrap();
        store.save_best_score(50).unwrap();

        let mut console = start(store, 2);
        assert_eq!(console.session().snapshot(), snapshot);
        assert_eq!(console.session().best_score(), 50);

        assert_eq!(
            console.apply(Command::Move(Direction::Left)).unwrap(),
            Flow::Render
        );
        assert_eq!(console.session().score(), 24);
        let mut store = JsonStore::new(dir).unwrap();
        assert_eq!(
            store.load_snapshot().unwrap(),
            Some(console.session().snapshot())
        );
        assert_eq!(store.load_best_score().unwrap(), 50);
    }

    #[test]
    fn new_game_keeps_best_score() {
        let dir = test_dir("console-reset");
        let mut store = JsonStore::new(dir.clone()).unwrap();
        let snapshot = Snapshot {
            board: board![
                [64, 64, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
            score: 0,
            win_status: WinStatus::NotWon,
        };
        store.save_snapshot(&snapshot).unwrap();

        let mut console = start(store, 3);
        console.apply(Command::Move(Direction::Left)).unwrap();
        assert_eq!(console.session().phase(), Phase::Won);
        assert!(console.render().contains("You win!"));

        let won_board = console.session().board();
        console.apply(Command::Move(Direction::Down)).unwrap();
        assert_eq!(console.session().board(), won_board);

        console.apply(Command::NewGame).unwrap();
        assert_eq!(console.session().score(), 0);
        assert_eq!(console.session().win_status(), WinStatus::NotWon);

        let mut store = JsonStore::new(dir).unwrap();
        assert_eq!(store.load_snapshot().unwrap(), None);
        assert_eq!(store.load_best_score().unwrap(), 128);
    }

    #[test]
    fn without_store() {
        let mut console: Console<StdRng, JsonStore> =
            Console::start(StdRng::seed_from_u64(4), 2048, None).unwrap();
        assert_eq!(console.apply(Command::Undo).unwrap(), Flow::Render);
        assert_eq!(console.apply(Command::Help).unwrap(), Flow::Help);
        assert_eq!(console.apply(Command::Quit).unwrap(), Flow::Quit);
        assert!(console.render().contains("Goal: 2048"));
    }
}
