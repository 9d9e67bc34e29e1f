use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, sleep_until};

use crate::games::{GameBroadcaster, SessionRng};
use crate::identifiers::GameId;
use crate::{log, log_debug, log_warn};
use super::decision_table::{DecisionTable, TableError};
use super::game_state::TurnCoordinator;
use super::settings::TicTacToeSessionSettings;
use super::types::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    CellActivated(usize),
    RestartRequested,
    JumpTo(usize),
    Shutdown,
}

/// What the UI holds to drive a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn new(command_tx: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self { command_tx }
    }

    /// `false` once the session has stopped.
    pub fn cell_activated(&self, index: usize) -> bool {
        self.send(SessionCommand::CellActivated(index))
    }

    pub fn restart(&self) -> bool {
        self.send(SessionCommand::RestartRequested)
    }

    pub fn jump_to(&self, move_number: usize) -> bool {
        self.send(SessionCommand::JumpTo(move_number))
    }

    pub fn shutdown(&self) -> bool {
        self.send(SessionCommand::Shutdown)
    }

    fn send(&self, command: SessionCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }
}

type TableResult = Result<Result<DecisionTable, TableError>, JoinError>;

struct TableLoad {
    game_id: GameId,
    handle: JoinHandle<Result<DecisionTable, TableError>>,
}

impl TableLoad {
    fn spawn(game_id: GameId, path: PathBuf) -> Self {
        log_debug!("[{}] loading decision table from {}", game_id, path.display());
        let handle = tokio::spawn(async move { DecisionTable::load_async(&path).await });
        Self { game_id, handle }
    }
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Spawns the session on the current runtime. The join handle yields the
    /// coordinator once the session shuts down.
    pub fn start<B: GameBroadcaster>(
        settings: TicTacToeSessionSettings,
        rng: SessionRng,
        broadcaster: B,
    ) -> (SessionHandle, JoinHandle<TurnCoordinator>) {
        let coordinator = TurnCoordinator::new(settings.first_player_mode, settings.strategy, rng);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(Self::run(coordinator, settings, broadcaster, command_rx));
        (SessionHandle::new(command_tx), handle)
    }

    /// Single event loop: commands from the UI, the delayed opponent reply
    /// and the decision-table load all land here, one at a time.
    pub async fn run<B: GameBroadcaster>(
        mut coordinator: TurnCoordinator,
        settings: TicTacToeSessionSettings,
        broadcaster: B,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    ) -> TurnCoordinator {
        let mut table_load = settings
            .decision_table
            .clone()
            .map(|path| TableLoad::spawn(coordinator.game_id(), path));
        let mut opponent_due: Option<Instant> = None;

        log!(
            "[{}] started, strategy {}, human plays {}",
            coordinator.game_id(),
            coordinator.strategy(),
            coordinator.human_mark()
        );
        broadcaster.broadcast_state(coordinator.snapshot()).await;
        schedule_opponent(&coordinator, &settings, &mut opponent_due);

        loop {
            tokio::select! {
                command = command_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    match command {
                        SessionCommand::CellActivated(index) => {
                            match coordinator.handle_cell_activated(index) {
                                Ok(snapshot) => {
                                    broadcaster.broadcast_state(snapshot).await;
                                    schedule_opponent(&coordinator, &settings, &mut opponent_due);
                                }
                                Err(e) => {
                                    log!("[{}] ignored move at {}: {}", coordinator.game_id(), index, e);
                                }
                            }
                        }
                        SessionCommand::RestartRequested => {
                            let previous = coordinator.game_id();
                            let snapshot = coordinator.restart();
                            opponent_due = None;
                            if let Some(load) = table_load.take() {
                                load.handle.abort();
                                if let Some(path) = settings.decision_table.clone() {
                                    table_load = Some(TableLoad::spawn(coordinator.game_id(), path));
                                }
                            }
                            log!("[{}] restarted as {}", previous, coordinator.game_id());
                            broadcaster.broadcast_state(snapshot).await;
                            schedule_opponent(&coordinator, &settings, &mut opponent_due);
                        }
                        SessionCommand::JumpTo(move_number) => {
                            match coordinator.jump_to(move_number) {
                                Ok(snapshot) => {
                                    opponent_due = None;
                                    broadcaster.broadcast_state(snapshot).await;
                                    schedule_opponent(&coordinator, &settings, &mut opponent_due);
                                }
                                Err(e) => {
                                    log!("[{}] ignored jump: {}", coordinator.game_id(), e);
                                }
                            }
                        }
                        SessionCommand::Shutdown => break,
                    }
                }
                _ = sleep_until(opponent_due.unwrap_or_else(Instant::now)), if opponent_due.is_some() => {
                    opponent_due = None;
                    match coordinator.play_opponent_turn() {
                        Ok(_) => {
                            broadcaster.broadcast_state(coordinator.snapshot()).await;
                            schedule_opponent(&coordinator, &settings, &mut opponent_due);
                        }
                        Err(e) => {
                            log_warn!("[{}] opponent could not move: {}", coordinator.game_id(), e);
                        }
                    }
                }
                (game_id, result) = next_table_result(&mut table_load), if table_load.is_some() => {
                    table_load = None;
                    handle_table_result(&mut coordinator, game_id, result);
                }
            }
        }

        if let Some(load) = table_load.take() {
            load.handle.abort();
        }
        log!("[{}] session stopped", coordinator.game_id());
        coordinator
    }
}

fn schedule_opponent(
    coordinator: &TurnCoordinator,
    settings: &TicTacToeSessionSettings,
    opponent_due: &mut Option<Instant>,
) {
    *opponent_due = match coordinator.phase() {
        Phase::AwaitingOpponentMove => Some(Instant::now() + settings.opponent_delay),
        _ => None,
    };
}

async fn next_table_result(table_load: &mut Option<TableLoad>) -> (GameId, TableResult) {
    match table_load.as_mut() {
        Some(load) => (load.game_id, (&mut load.handle).await),
        None => std::future::pending().await,
    }
}

/// A restart replaces the in-flight load before its result can be polled,
/// so `install_table` only refuses here if that ordering is ever broken.
fn handle_table_result(coordinator: &mut TurnCoordinator, game_id: GameId, result: TableResult) {
    match result {
        Ok(Ok(table)) => {
            let entries = table.len();
            if coordinator.install_table(game_id, Arc::new(table)) {
                log!("[{}] decision table ready ({} entries)", game_id, entries);
            }
        }
        Ok(Err(e)) => {
            log_warn!("[{}] {}; continuing with heuristics", game_id, e);
        }
        Err(e) if e.is_cancelled() => {
            log_debug!("[{}] decision table load cancelled", game_id);
        }
        Err(e) => {
            log_warn!("[{}] decision table load failed: {}", game_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::games::ChannelBroadcaster;
    use crate::games::tictactoe::board::Board;
    use crate::games::tictactoe::game_state::GameSnapshot;
    use crate::games::tictactoe::types::{CENTER, FirstPlayerMode, Mark, Strategy};

    fn settings(delay_ms: u64, strategy: Strategy) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            first_player_mode: FirstPlayerMode::Human,
            strategy,
            opponent_delay: Duration::from_millis(delay_ms),
            decision_table: None,
        }
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<GameSnapshot>) -> GameSnapshot {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for snapshot")
            .expect("session closed")
    }

    #[tokio::test]
    async fn test_opponent_replies_after_delay() {
        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let (handle, join) =
            TicTacToeSession::start(settings(10, Strategy::Opening), SessionRng::new(1), broadcaster);

        let initial = next(&mut rx).await;
        assert_eq!(initial.board, Board::new());
        assert_eq!(initial.status_text, "X to move");

        assert!(handle.cell_activated(0));
        let after_human = next(&mut rx).await;
        assert_eq!(after_human.phase, Phase::AwaitingOpponentMove);

        let after_opponent = next(&mut rx).await;
        assert_eq!(after_opponent.board.get(CENTER), Some(Mark::O));
        assert_eq!(after_opponent.phase, Phase::AwaitingHumanMove);
        assert_eq!(after_opponent.history.len(), 3);

        handle.shutdown();
        let coordinator = join.await.unwrap();
        assert_eq!(coordinator.board().occupied_count(), 2);
    }

    #[tokio::test]
    async fn test_human_input_ignored_while_opponent_pending() {
        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let (handle, join) =
            TicTacToeSession::start(settings(100, Strategy::Naive), SessionRng::new(1), broadcaster);
        next(&mut rx).await;

        handle.cell_activated(4);
        handle.cell_activated(8);
        next(&mut rx).await;
        let after_opponent = next(&mut rx).await;
        assert_eq!(after_opponent.board.get(0), Some(Mark::O));
        assert_eq!(after_opponent.board.get(8), Some(Mark::Empty));

        handle.shutdown();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_cancels_pending_opponent_move() {
        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let (handle, join) =
            TicTacToeSession::start(settings(50, Strategy::Naive), SessionRng::new(1), broadcaster);
        next(&mut rx).await;

        handle.cell_activated(4);
        handle.restart();
        let after_human = next(&mut rx).await;
        assert_eq!(after_human.board.occupied_count(), 1);
        let after_restart = next(&mut rx).await;
        assert_eq!(after_restart.board, Board::new());
        assert_ne!(after_restart.game_id, after_human.game_id);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(rx.try_recv().is_err());

        handle.shutdown();
        let coordinator = join.await.unwrap();
        assert_eq!(coordinator.board(), Board::new());
        assert_eq!(coordinator.history().len(), 1);
    }

    #[tokio::test]
    async fn test_opponent_moves_first_when_configured() {
        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let mut s = settings(5, Strategy::Naive);
        s.first_player_mode = FirstPlayerMode::Opponent;
        let (handle, join) = TicTacToeSession::start(s, SessionRng::new(1), broadcaster);

        let initial = next(&mut rx).await;
        assert_eq!(initial.phase, Phase::AwaitingOpponentMove);
        assert_eq!(initial.human_mark, Mark::O);
        let after_opponent = next(&mut rx).await;
        assert_eq!(after_opponent.board.get(0), Some(Mark::X));
        assert_eq!(after_opponent.status_text, "O to move");

        handle.shutdown();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn test_jump_to_rewinds_board() {
        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let (handle, join) =
            TicTacToeSession::start(settings(0, Strategy::Naive), SessionRng::new(1), broadcaster);
        next(&mut rx).await;
        handle.cell_activated(4);
        next(&mut rx).await;
        next(&mut rx).await;

        handle.jump_to(0);
        let rewound = next(&mut rx).await;
        assert_eq!(rewound.board, Board::new());
        assert_eq!(rewound.phase, Phase::AwaitingHumanMove);

        handle.shutdown();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn test_decision_table_is_installed() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_session_table_{}.json", random_number));
        std::fs::write(&path, r#"{"100000000": 0.0}"#).unwrap();

        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let mut s = settings(0, Strategy::TableLookup);
        s.decision_table = Some(path.clone());
        let (handle, join) = TicTacToeSession::start(s, SessionRng::new(1), broadcaster);
        next(&mut rx).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.shutdown();
        let coordinator = join.await.unwrap();
        assert!(coordinator.has_table());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_restart_during_table_load_reloads_for_new_game() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_session_table_restart_{}.json", random_number));
        std::fs::write(&path, r#"{"100000000": 0.0}"#).unwrap();

        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let mut s = settings(0, Strategy::TableLookup);
        s.decision_table = Some(path.clone());
        let (handle, join) = TicTacToeSession::start(s, SessionRng::new(1), broadcaster);
        handle.restart();
        handle.restart();

        let initial = next(&mut rx).await;
        let first_restart = next(&mut rx).await;
        let second_restart = next(&mut rx).await;
        assert_ne!(initial.game_id, first_restart.game_id);
        assert_ne!(first_restart.game_id, second_restart.game_id);

        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.shutdown();
        let mut coordinator = join.await.unwrap();
        assert_eq!(coordinator.game_id(), second_restart.game_id);
        assert!(coordinator.has_table());
        assert!(!coordinator.install_table(initial.game_id, Arc::new(DecisionTable::default())));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_missing_table_does_not_block_play() {
        let (broadcaster, mut rx) = ChannelBroadcaster::new();
        let mut s = settings(0, Strategy::TableLookup);
        s.decision_table = Some(PathBuf::from("no_such_decision_table.json"));
        let (handle, join) = TicTacToeSession::start(s, SessionRng::new(1), broadcaster);
        next(&mut rx).await;

        handle.cell_activated(4);
        next(&mut rx).await;
        let after_opponent = next(&mut rx).await;
        assert_eq!(after_opponent.board.occupied_count(), 2);

        handle.shutdown();
        let coordinator = join.await.unwrap();
        assert!(!coordinator.has_table());
    }
}
