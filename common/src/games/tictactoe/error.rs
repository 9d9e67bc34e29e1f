use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidMove { index: usize },
    OutOfBounds { index: usize },
    GameOver,
    NotHumanTurn,
    NotOpponentTurn,
    UnknownMove { requested: usize, available: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidMove { index } => write!(f, "Cell {} is already marked", index),
            GameError::OutOfBounds { index } => write!(f, "Cell {} is out of bounds", index),
            GameError::GameOver => write!(f, "Game is already over"),
            GameError::NotHumanTurn => write!(f, "Not your turn"),
            GameError::NotOpponentTurn => write!(f, "Not the opponent's turn"),
            GameError::UnknownMove { requested, available } => write!(
                f,
                "Move {} is not in the history ({} moves recorded)",
                requested, available
            ),
        }
    }
}

impl std::error::Error for GameError {}
