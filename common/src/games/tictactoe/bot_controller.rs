use crate::games::SessionRng;
use super::board::Board;
use super::decision_table::DecisionTable;
use super::types::{CENTER, CORNERS, Mark, MoveOutcome, Strategy};
use super::win_detector::evaluate_move;

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark) -> Self {
        Self { board, bot_mark }
    }
}

/// Picks a cell for the bot. `None` means the board is full.
pub fn calculate_move(
    strategy: Strategy,
    input: &BotInput,
    rng: &mut SessionRng,
    table: Option<&DecisionTable>,
) -> Option<usize> {
    if input.board.is_full() {
        return None;
    }

    match strategy {
        Strategy::Naive => calculate_naive_move(input),
        Strategy::RandomEmpty => calculate_random_move(input, rng),
        Strategy::WinThenRandom => calculate_win_then_random_move(input, rng),
        Strategy::Opening => calculate_opening_move(input, rng),
        Strategy::TableLookup => calculate_table_move(input, rng, table),
    }
}

fn calculate_naive_move(input: &BotInput) -> Option<usize> {
    input.board.empty_cells().into_iter().next()
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&input.board.empty_cells())
}

fn calculate_win_then_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    if let Some(index) = find_winning_move(&input.board, input.bot_mark) {
        return Some(index);
    }
    calculate_safe_random_move(input, rng)
}

fn calculate_opening_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    if input.board.occupied_count() != 1 {
        return calculate_win_then_random_move(input, rng);
    }

    let corner_taken = CORNERS.iter().any(|&corner| !input.board.is_empty_at(corner));
    if corner_taken {
        return Some(CENTER);
    }

    let free_corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&corner| input.board.is_empty_at(corner))
        .collect();
    rng.choose(&free_corners)
        .or_else(|| calculate_win_then_random_move(input, rng))
}

fn calculate_table_move(
    input: &BotInput,
    rng: &mut SessionRng,
    table: Option<&DecisionTable>,
) -> Option<usize> {
    if let Some(index) = find_winning_move(&input.board, input.bot_mark) {
        return Some(index);
    }
    if let Some(index) = table.and_then(|table| find_best_table_move(&input.board, input.bot_mark, table)) {
        return Some(index);
    }
    calculate_random_move(input, rng)
}

/// First empty cell, in index order, that completes a line for `mark`.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    board
        .empty_cells()
        .into_iter()
        .find(|&index| evaluate_move(board, index, mark) == Ok(MoveOutcome::Win))
}

/// Uniform over the cells that do not hand the opponent an immediate win;
/// uniform over every empty cell when all of them do.
fn calculate_safe_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let empty = input.board.empty_cells();
    let safe: Vec<usize> = empty
        .iter()
        .copied()
        .filter(|&index| {
            !matches!(
                evaluate_move(&input.board, index, input.bot_mark),
                Ok(MoveOutcome::Loss)
            )
        })
        .collect();

    if safe.is_empty() {
        rng.choose(&empty)
    } else {
        rng.choose(&safe)
    }
}

fn find_best_table_move(board: &Board, mark: Mark, table: &DecisionTable) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for index in board.empty_cells() {
        let Ok(next) = board.with_mark(index, mark) else {
            continue;
        };
        let Some(value) = table.value_of(&next, mark) else {
            continue;
        };
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
