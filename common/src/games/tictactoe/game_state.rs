use std::sync::Arc;

use crate::games::SessionRng;
use crate::identifiers::GameId;
use crate::{log_debug, log_warn};
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::decision_table::DecisionTable;
use super::error::GameError;
use super::history::GameRecord;
use super::types::{FirstPlayerMode, GameOverReason, Line, Mark, Phase, Strategy};
use super::win_detector::{find_winning_line, game_over_reason};

/// Everything a renderer needs after a change: the board, the status line
/// and the line to highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub board: Board,
    pub phase: Phase,
    pub status_text: String,
    pub winning_line: Option<Line>,
    pub human_mark: Mark,
    pub history: GameRecord,
}

/// Sole owner of the board. Sequences human and opponent turns and stops
/// at the first win or draw.
#[derive(Debug)]
pub struct TurnCoordinator {
    game_id: GameId,
    record: GameRecord,
    phase: Phase,
    human_mark: Mark,
    opponent_mark: Mark,
    first_player_mode: FirstPlayerMode,
    strategy: Strategy,
    rng: SessionRng,
    table: Option<Arc<DecisionTable>>,
}

impl TurnCoordinator {
    pub fn new(first_player_mode: FirstPlayerMode, strategy: Strategy, rng: SessionRng) -> Self {
        let mut coordinator = Self {
            game_id: GameId::next(),
            record: GameRecord::new(),
            phase: Phase::AwaitingHumanMove,
            human_mark: Mark::X,
            opponent_mark: Mark::O,
            first_player_mode,
            strategy,
            rng,
            table: None,
        };
        coordinator.assign_marks();
        coordinator
    }

    /// The player moving first gets `X`.
    fn assign_marks(&mut self) {
        let human_first = match self.first_player_mode {
            FirstPlayerMode::Human => true,
            FirstPlayerMode::Opponent => false,
            FirstPlayerMode::Random => self.rng.random_bool(),
        };
        (self.human_mark, self.opponent_mark) = if human_first {
            (Mark::X, Mark::O)
        } else {
            (Mark::O, Mark::X)
        };
        self.phase = self.phase_for(&Board::new());
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn board(&self) -> Board {
        self.record.latest()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn opponent_mark(&self) -> Mark {
        self.opponent_mark
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn history(&self) -> &[Board] {
        self.record.snapshots()
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    pub fn handle_cell_activated(&mut self, index: usize) -> Result<GameSnapshot, GameError> {
        match self.phase {
            Phase::GameOver(_) => return Err(GameError::GameOver),
            Phase::AwaitingOpponentMove => return Err(GameError::NotHumanTurn),
            Phase::AwaitingHumanMove => {}
        }

        self.apply_move(index, self.human_mark)?;
        Ok(self.snapshot())
    }

    /// Lets the selector move for the opponent. `Ok(None)` when it had no
    /// cell to play, which only happens on a board that is already a draw.
    pub fn play_opponent_turn(&mut self) -> Result<Option<GameSnapshot>, GameError> {
        match self.phase {
            Phase::GameOver(_) => return Err(GameError::GameOver),
            Phase::AwaitingHumanMove => return Err(GameError::NotOpponentTurn),
            Phase::AwaitingOpponentMove => {}
        }

        let input = BotInput::new(self.board(), self.opponent_mark);
        let table = self.table.as_deref();
        let Some(index) = calculate_move(self.strategy, &input, &mut self.rng, table) else {
            log_debug!("[{}] opponent has no move, confirming draw", self.game_id);
            let reason = game_over_reason(&input.board).unwrap_or(GameOverReason::Draw);
            self.phase = Phase::GameOver(reason);
            return Ok(None);
        };

        log_debug!("[{}] opponent ({}) plays {}", self.game_id, self.strategy, index);
        self.apply_move(index, self.opponent_mark)?;
        Ok(Some(self.snapshot()))
    }

    fn apply_move(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        let next = self.board().with_mark(index, mark)?;
        self.record.push(next);
        self.phase = self.phase_for(&next);
        Ok(())
    }

    /// Whose turn it is follows from the marker count: `X` moves on even counts.
    fn phase_for(&self, board: &Board) -> Phase {
        if let Some(reason) = game_over_reason(board) {
            return Phase::GameOver(reason);
        }
        let to_move = if board.occupied_count() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        };
        if to_move == self.human_mark {
            Phase::AwaitingHumanMove
        } else {
            Phase::AwaitingOpponentMove
        }
    }

    /// New board, new game id, first player rolled again. The table stays.
    pub fn restart(&mut self) -> GameSnapshot {
        self.game_id = GameId::next();
        self.record = GameRecord::new();
        self.phase = Phase::AwaitingHumanMove;
        self.assign_marks();
        self.snapshot()
    }

    pub fn jump_to(&mut self, move_number: usize) -> Result<GameSnapshot, GameError> {
        self.record = self.record.truncated(move_number)?;
        self.phase = self.phase_for(&self.board());
        Ok(self.snapshot())
    }

    /// Installs a table loaded on behalf of `game_id`. Refused when a
    /// restart has started a different game since the load was issued.
    pub fn install_table(&mut self, game_id: GameId, table: Arc<DecisionTable>) -> bool {
        if game_id != self.game_id {
            log_warn!(
                "Discarding decision table loaded for {}, current game is {}",
                game_id,
                self.game_id
            );
            return false;
        }
        self.table = Some(table);
        true
    }

    pub fn status_text(&self) -> String {
        match self.phase {
            Phase::GameOver(GameOverReason::Win(mark)) => format!("{} wins", mark),
            Phase::GameOver(GameOverReason::Draw) => "Draw".to_string(),
            Phase::AwaitingHumanMove => format!("{} to move", self.human_mark),
            Phase::AwaitingOpponentMove => format!("{} to move", self.opponent_mark),
        }
    }

    pub fn winning_line(&self) -> Option<Line> {
        match self.phase {
            Phase::GameOver(GameOverReason::Win(mark)) => find_winning_line(&self.board(), mark),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.game_id,
            board: self.board(),
            phase: self.phase,
            status_text: self.status_text(),
            winning_line: self.winning_line(),
            human_mark: self.human_mark,
            history: self.record.clone(),
        }
    }
}
