use std::fmt;

use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::decision_table::DecisionTable;
use super::types::{GameOverReason, Mark, Strategy};
use super::win_detector::game_over_reason;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchTally {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    fn record(&mut self, reason: GameOverReason, side: Mark) {
        match reason {
            GameOverReason::Win(mark) if mark == side => self.wins += 1,
            GameOverReason::Win(_) => self.losses += 1,
            GameOverReason::Draw => self.draws += 1,
        }
    }
}

impl fmt::Display for MatchTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: {} won, {} lost, {} drawn",
            self.games(),
            self.wins,
            self.losses,
            self.draws
        )
    }
}

/// Plays one game between two selectors, `X` moving first.
pub fn play_match(
    x_strategy: Strategy,
    o_strategy: Strategy,
    rng: &mut SessionRng,
    table: Option<&DecisionTable>,
) -> GameOverReason {
    let mut board = Board::new();
    let mut mover = Mark::X;
    loop {
        if let Some(reason) = game_over_reason(&board) {
            return reason;
        }
        let strategy = if mover == Mark::X { x_strategy } else { o_strategy };
        let Some(index) = calculate_move(strategy, &BotInput::new(board, mover), rng, table) else {
            return GameOverReason::Draw;
        };
        board = match board.with_mark(index, mover) {
            Ok(next) => next,
            Err(_) => return GameOverReason::Draw,
        };
        mover = mover.opponent().unwrap_or(Mark::X);
    }
}

/// Counts results from `strategy`'s side. The opening move alternates so
/// neither selector keeps the first-move advantage.
pub fn simulate(
    games: u32,
    strategy: Strategy,
    rival: Strategy,
    rng: &mut SessionRng,
    table: Option<&DecisionTable>,
) -> MatchTally {
    let mut tally = MatchTally::default();
    for game in 0..games {
        if game % 2 == 0 {
            tally.record(play_match(strategy, rival, rng, table), Mark::X);
        } else {
            tally.record(play_match(rival, strategy, rng, table), Mark::O);
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_against_naive_x_wins() {
        // both fill the lowest empty cell: X gets 0, 2, 4, 6
        let mut rng = SessionRng::new(7);
        let reason = play_match(Strategy::Naive, Strategy::Naive, &mut rng, None);
        assert_eq!(reason, GameOverReason::Win(Mark::X));
    }

    #[test]
    fn test_simulate_counts_every_game() {
        let mut rng = SessionRng::new(3);
        let tally = simulate(50, Strategy::Opening, Strategy::RandomEmpty, &mut rng, None);
        assert_eq!(tally.games(), 50);
    }

    #[test]
    fn test_heuristic_beats_random_more_often() {
        let mut rng = SessionRng::new(11);
        let tally = simulate(200, Strategy::WinThenRandom, Strategy::RandomEmpty, &mut rng, None);
        assert!(tally.wins > tally.losses, "{}", tally);
    }

    #[test]
    fn test_same_seed_same_tally() {
        let first = simulate(20, Strategy::Opening, Strategy::RandomEmpty, &mut SessionRng::new(5), None);
        let second = simulate(20, Strategy::Opening, Strategy::RandomEmpty, &mut SessionRng::new(5), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tally_display() {
        let tally = MatchTally { wins: 3, losses: 1, draws: 2 };
        assert_eq!(tally.to_string(), "6 games: 3 won, 1 lost, 2 drawn");
    }
}
