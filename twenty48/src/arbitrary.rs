use quickcheck::{Arbitrary, Gen};

use crate::{Board, Cells, Direction, BOARD_SIZE};

// Mostly empty cells and small tiles, so that merges are common
const CELL_VALUES: [u32; 12] = [0, 0, 0, 0, 2, 2, 4, 4, 8, 16, 32, 64];

impl Arbitrary for Board {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut cells: Cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        let full = bool::arbitrary(g) && bool::arbitrary(g);
        for cell in cells.iter_mut().flatten() {
            let choices = if full {
                &CELL_VALUES[4..]
            } else {
                &CELL_VALUES[..]
            };
            *cell = *g.choose(choices).unwrap();
        }
        Board::try_from(cells).unwrap()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Remove one tile at a time
        let board = *self;
        Box::new(
            (0..BOARD_SIZE)
                .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
                .filter(move |&(row, col)| board.get(row, col) != Some(0))
                .map(move |(row, col)| board.with_tile(row, col, 0)),
        )
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
