use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one game between two restarts. Late results (a decision
/// table finishing its load, a delayed opponent reply) carry the id of the
/// game that asked for them and are dropped when it no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn next() -> Self {
        Self(NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<GameId> for u64 {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game-{}", self.0)
    }
}
