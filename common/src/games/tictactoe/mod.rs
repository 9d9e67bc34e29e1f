pub mod board;
pub mod bot_controller;
pub mod decision_table;
pub mod error;
pub mod game_state;
pub mod history;
pub mod session;
pub mod settings;
pub mod simulation;
pub mod symmetry;
pub mod types;
pub mod win_detector;

pub use board::{Board, row_col};
pub use bot_controller::{BotInput, calculate_move, find_winning_move};
pub use decision_table::{DecisionTable, TableError};
pub use error::GameError;
pub use game_state::{GameSnapshot, TurnCoordinator};
pub use history::GameRecord;
pub use session::{SessionCommand, SessionHandle, TicTacToeSession};
pub use settings::{DEFAULT_OPPONENT_DELAY, TicTacToeSessionSettings};
pub use simulation::{MatchTally, play_match, simulate};
pub use symmetry::Symmetry;
pub use types::*;
pub use win_detector::{evaluate_move, find_winning_line, game_over_reason, is_draw, is_win, winner};
