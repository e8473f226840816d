use crate::{Board, BOARD_SIZE};

// Wide enough for a six-digit tile with one space of padding on each side
const CELL_WIDTH: usize = 8;

fn horizontal_line(left: char, middle: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for col in 0..BOARD_SIZE {
        if col > 0 {
            line.push(middle);
        }
        line += &"─".repeat(CELL_WIDTH);
    }
    line.push(right);
    line
}

/// Draws the board as a box, with empty cells left blank.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", horizontal_line('╭', '┬', '╮'))?;
        for (idx, row) in self.rows().iter().enumerate() {
            if idx > 0 {
                writeln!(f, "{}", horizontal_line('├', '┼', '┤'))?;
            }
            write!(f, "│")?;
            for &value in row {
                if value == 0 {
                    write!(f, "{:w$}│", "", w = CELL_WIDTH)?;
                } else {
                    write!(f, " {:>w$} │", value, w = CELL_WIDTH - 2)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", horizontal_line('╰', '┴', '╯'))
    }
}
