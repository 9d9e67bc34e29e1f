use std::fmt;
use serde::{Deserialize, Serialize};

pub const CELL_COUNT: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Three cell indices that win when they hold the same marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Line(pub [usize; 3]);

impl Line {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

pub const LINES: [Line; 8] = [
    Line([0, 1, 2]),
    Line([3, 4, 5]),
    Line([6, 7, 8]),
    Line([0, 3, 6]),
    Line([1, 4, 7]),
    Line([2, 5, 8]),
    Line([0, 4, 8]),
    Line([2, 4, 6]),
];

/// Result of trying a cell and looking one reply ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Win,
    Draw,
    Loss,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    Win(Mark),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingHumanMove,
    AwaitingOpponentMove,
    GameOver(GameOverReason),
}

impl Phase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FirstPlayerMode {
    #[default]
    Human,
    Opponent,
    Random,
}

impl std::str::FromStr for FirstPlayerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(FirstPlayerMode::Human),
            "opponent" | "bot" => Ok(FirstPlayerMode::Opponent),
            "random" => Ok(FirstPlayerMode::Random),
            other => Err(format!("Unknown first player: {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Strategy {
    /// First empty cell in scan order.
    Naive,
    /// Uniform over empty cells.
    RandomEmpty,
    /// Immediate win if any, else random.
    WinThenRandom,
    /// Centre or corner on the opponent's first reply, then win-then-random.
    #[default]
    Opening,
    /// Win first, then the best value from the decision table.
    TableLookup,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Naive => "naive",
            Strategy::RandomEmpty => "random",
            Strategy::WinThenRandom => "win-then-random",
            Strategy::Opening => "opening",
            Strategy::TableLookup => "table",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(Strategy::Naive),
            "random" | "easy" => Ok(Strategy::RandomEmpty),
            "win-then-random" | "win" => Ok(Strategy::WinThenRandom),
            "opening" | "hard" => Ok(Strategy::Opening),
            "table" => Ok(Strategy::TableLookup),
            other => Err(format!("Unknown strategy: {}", other)),
        }
    }
}
