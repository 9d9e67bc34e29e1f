use super::board::Board;
use super::error::GameError;
use super::types::{GameOverReason, LINES, Line, Mark, MoveOutcome};

pub fn find_winning_line(board: &Board, mark: Mark) -> Option<Line> {
    if mark == Mark::Empty {
        return None;
    }
    LINES
        .iter()
        .find(|line| line.cells().iter().all(|&index| board.get(index) == Some(mark)))
        .copied()
}

pub fn is_win(board: &Board, mark: Mark) -> bool {
    find_winning_line(board, mark).is_some()
}

/// Full board with no completed line. A full board can still hold a win,
/// so both markers are checked first.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !is_win(board, Mark::X) && !is_win(board, Mark::O)
}

pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O].into_iter().find(|&mark| is_win(board, mark))
}

pub fn game_over_reason(board: &Board) -> Option<GameOverReason> {
    if let Some(mark) = winner(board) {
        return Some(GameOverReason::Win(mark));
    }
    if is_draw(board) {
        return Some(GameOverReason::Draw);
    }
    None
}

/// Plays `mark` at `index` on a copy and looks one reply ahead: `Loss` when
/// the opponent can then complete a line with a single move.
pub fn evaluate_move(board: &Board, index: usize, mark: Mark) -> Result<MoveOutcome, GameError> {
    if mark == Mark::Empty {
        return Err(GameError::InvalidMove { index });
    }
    let placed = board.with_mark(index, mark)?;

    if is_win(&placed, mark) {
        return Ok(MoveOutcome::Win);
    }
    if placed.is_full() {
        return Ok(MoveOutcome::Draw);
    }

    let Some(opponent) = mark.opponent() else {
        return Ok(MoveOutcome::Neutral);
    };

    for reply in placed.empty_cells() {
        let replied = placed.with_mark(reply, opponent)?;
        if is_win(&replied, opponent) {
            return Ok(MoveOutcome::Loss);
        }
    }

    Ok(MoveOutcome::Neutral)
}
