use std::future::Future;

use tokio::sync::mpsc;

use super::tictactoe::GameSnapshot;

/// Receives every snapshot the session produces: at start, after each
/// accepted move, after a restart or a history jump.
pub trait GameBroadcaster: Send + Sync + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

/// Forwards snapshots to a channel so a renderer can subscribe from its
/// own task.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    sender: mpsc::UnboundedSender<GameSnapshot>,
}

impl ChannelBroadcaster {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameSnapshot>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl GameBroadcaster for ChannelBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        // a closed receiver means the renderer is gone
        let _ = self.sender.send(snapshot);
    }
}
