use std::fmt::Write;

use tictactoe_common::games::GameBroadcaster;
use tictactoe_common::games::tictactoe::{GameSnapshot, Mark, Phase};

/// Prints every snapshot to stdout. Logging goes to stderr so the two
/// never interleave mid-line.
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl GameBroadcaster for TerminalRenderer {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        println!("{}", render_snapshot(&snapshot));
    }
}

pub fn render_snapshot(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    let highlighted = |index: usize| {
        snapshot
            .winning_line
            .is_some_and(|line| line.contains(index))
    };

    let _ = writeln!(out, "{} (you play {})", snapshot.game_id, snapshot.human_mark);
    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                match snapshot.board.get(index).unwrap_or_default() {
                    Mark::Empty => format!(" {} ", index + 1),
                    mark if highlighted(index) => format!("[{}]", mark),
                    mark => format!(" {} ", mark),
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("|"));
    }

    let moves = snapshot.history.move_count();
    if moves > 0 {
        let described: Vec<String> = (1..=moves)
            .filter_map(|n| {
                snapshot
                    .history
                    .describe_move(n)
                    .map(|text| format!("{}. {}", n, text))
            })
            .collect();
        let _ = writeln!(out, "Moves: {}", described.join(", "));
    }

    let status = match snapshot.phase {
        Phase::AwaitingOpponentMove => format!("{} (thinking...)", snapshot.status_text),
        _ => snapshot.status_text.clone(),
    };
    let _ = write!(out, "{}", status);
    out
}
