use std::str::FromStr;

use twenty48::Direction;

pub const HELP: &str = "\
Commands:
  w, a, s, d      slide up, left, down, right (or: up, left, down, right)
  u, undo         undo the last move
  r, redo         redo the last undone move
  k, continue     keep playing after winning
  n, new          start a new game
  h, ?            show this help
  q, quit         quit";

/// One line of input from the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Undo,
    Redo,
    KeepGoing,
    NewGame,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_ascii_lowercase().as_str() {
            "u" | "undo" => Command::Undo,
            "r" | "redo" => Command::Redo,
            "k" | "continue" => Command::KeepGoing,
            "n" | "new" => Command::NewGame,
            "h" | "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => Command::Move(other.parse().map_err(|_| {
                anyhow::anyhow!("Unknown command '{}', type 'h' for help", s.trim())
            })?),
        };
        Ok(command)
    }
}
