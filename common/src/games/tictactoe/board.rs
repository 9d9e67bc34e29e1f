use std::fmt;
use std::str::FromStr;

use super::error::GameError;
use super::types::{CELL_COUNT, Mark};

/// Nine cells in row-major order: index `i` is row `i / 3`, column `i % 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Mark::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// Copy of the board with `mark` written at `index`.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Result<Board, GameError> {
        match self.get(index) {
            None => Err(GameError::OutOfBounds { index }),
            Some(Mark::Empty) => {
                let mut next = *self;
                next.cells[index] = mark;
                Ok(next)
            }
            Some(_) => Err(GameError::InvalidMove { index }),
        }
    }

    /// Index of the single cell that differs from `previous`, if exactly one does.
    pub fn placed_since(&self, previous: &Board) -> Option<usize> {
        let mut changed = self
            .cells
            .iter()
            .zip(previous.cells.iter())
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(index, _)| index);
        let first = changed.next()?;
        if changed.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Serialization over the alphabet `0` empty, `1` for cells of `mark`,
    /// `2` for the other marker.
    pub fn perspective_key(&self, mark: Mark) -> String {
        self.cells
            .iter()
            .map(|&cell| {
                if cell == Mark::Empty {
                    '0'
                } else if cell == mark {
                    '1'
                } else {
                    '2'
                }
            })
            .collect()
    }
}

pub fn row_col(index: usize) -> (usize, usize) {
    (index / 3, index % 3)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let start = row * 3;
            writeln!(
                f,
                "{} {} {}",
                self.cells[start], self.cells[start + 1], self.cells[start + 2]
            )?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELL_COUNT {
            return Err(format!(
                "Board needs {} cells, got {}",
                CELL_COUNT,
                symbols.len()
            ));
        }
        let mut cells = [Mark::Empty; CELL_COUNT];
        for (index, symbol) in symbols.into_iter().enumerate() {
            cells[index] = match symbol {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '_' | '-' => Mark::Empty,
                other => return Err(format!("Unexpected cell symbol '{}'", other)),
            };
        }
        Ok(Self { cells })
    }
}
