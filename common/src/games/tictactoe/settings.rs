use std::path::PathBuf;
use std::time::Duration;

use super::types::{FirstPlayerMode, Strategy};

pub const DEFAULT_OPPONENT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct TicTacToeSessionSettings {
    pub first_player_mode: FirstPlayerMode,
    pub strategy: Strategy,
    /// Pause before the opponent's reply lands on the board.
    pub opponent_delay: Duration,
    pub decision_table: Option<PathBuf>,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            first_player_mode: FirstPlayerMode::Human,
            strategy: Strategy::Opening,
            opponent_delay: DEFAULT_OPPONENT_DELAY,
            decision_table: None,
        }
    }
}
