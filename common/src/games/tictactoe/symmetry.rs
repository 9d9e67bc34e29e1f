//! The eight symmetries of the 3x3 grid, used to resolve decision-table
//! keys stored for a rotated or mirrored orientation.

use super::board::Board;
use super::types::{CELL_COUNT, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symmetry {
    /// Clockwise quarter turns, 0..=3.
    pub quarter_turns: u8,
    /// Mirror across the vertical axis before rotating.
    pub reflect: bool,
}

impl Symmetry {
    pub const IDENTITY: Symmetry = Symmetry {
        quarter_turns: 0,
        reflect: false,
    };

    pub fn all() -> [Symmetry; 8] {
        let mut out = [Symmetry::IDENTITY; 8];
        let mut i = 0;
        for quarter_turns in 0..4 {
            for reflect in [false, true] {
                out[i] = Symmetry {
                    quarter_turns,
                    reflect,
                };
                i += 1;
            }
        }
        out
    }

    pub fn transform_index(&self, index: usize) -> usize {
        let (mut row, mut col) = (index / 3, index % 3);
        if self.reflect {
            col = 2 - col;
        }
        for _ in 0..self.quarter_turns {
            let turned_row = col;
            col = 2 - row;
            row = turned_row;
        }
        row * 3 + col
    }

    pub fn apply(&self, board: &Board) -> Board {
        let mut cells = [Mark::Empty; CELL_COUNT];
        for (index, &cell) in board.cells().iter().enumerate() {
            cells[self.transform_index(index)] = cell;
        }
        Board::from_cells(cells)
    }
}
