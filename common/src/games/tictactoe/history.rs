use super::board::{Board, row_col};
use super::error::GameError;

/// Board snapshots, one per move, starting with the empty board. Entries are
/// only ever appended; rewinding builds a shorter record instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    snapshots: Vec<Board>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRecord {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
        }
    }

    pub fn push(&mut self, board: Board) {
        self.snapshots.push(board);
    }

    /// Number of moves played, not counting the starting board.
    pub fn move_count(&self) -> usize {
        self.snapshots.len() - 1
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// `true` until the first move; the starting board is always held.
    pub fn is_empty(&self) -> bool {
        self.move_count() == 0
    }

    pub fn latest(&self) -> Board {
        self.snapshots.last().copied().unwrap_or_default()
    }

    pub fn get(&self, move_number: usize) -> Option<&Board> {
        self.snapshots.get(move_number)
    }

    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    pub fn truncated(&self, move_number: usize) -> Result<GameRecord, GameError> {
        if move_number >= self.snapshots.len() {
            return Err(GameError::UnknownMove {
                requested: move_number,
                available: self.move_count(),
            });
        }
        Ok(Self {
            snapshots: self.snapshots[..=move_number].to_vec(),
        })
    }

    pub fn describe_move(&self, move_number: usize) -> Option<String> {
        if move_number == 0 {
            return self.get(0).map(|_| "Game start".to_string());
        }
        let before = self.get(move_number - 1)?;
        let after = self.get(move_number)?;
        let index = after.placed_since(before)?;
        let mark = after.get(index)?;
        let (row, col) = row_col(index);
        Some(format!("{} on ({},{})", mark, row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::Mark;

    fn record_of(moves: &[(usize, Mark)]) -> GameRecord {
        let mut record = GameRecord::new();
        for &(index, mark) in moves {
            let next = record.latest().with_mark(index, mark).unwrap();
            record.push(next);
        }
        record
    }

    #[test]
    fn test_new_record_holds_empty_board() {
        let record = GameRecord::new();
        assert_eq!(record.len(), 1);
        assert_eq!(record.move_count(), 0);
        assert!(record.is_empty());
        assert_eq!(record.latest(), Board::new());
        assert!(!record_of(&[(4, Mark::X)]).is_empty());
    }

    #[test]
    fn test_truncated_leaves_original() {
        let record = record_of(&[(4, Mark::X), (0, Mark::O), (8, Mark::X)]);
        let rewound = record.truncated(1).unwrap();
        assert_eq!(rewound.move_count(), 1);
        assert_eq!(rewound.latest().occupied_count(), 1);
        assert_eq!(record.move_count(), 3);
    }

    #[test]
    fn test_truncated_past_end_fails() {
        let record = record_of(&[(4, Mark::X)]);
        assert_eq!(
            record.truncated(5),
            Err(GameError::UnknownMove { requested: 5, available: 1 })
        );
    }

    #[test]
    fn test_describe_move() {
        let record = record_of(&[(4, Mark::X), (2, Mark::O)]);
        assert_eq!(record.describe_move(0).as_deref(), Some("Game start"));
        assert_eq!(record.describe_move(1).as_deref(), Some("X on (1,1)"));
        assert_eq!(record.describe_move(2).as_deref(), Some("O on (0,2)"));
        assert_eq!(record.describe_move(3), None);
    }
}
