//! Server Event System
//!
//! Fan-out of supervisor notifications. Every subscriber gets its own
//! receiver and consumes events on whatever executor it likes; the
//! supervisor never waits for subscribers.

use tokio::sync::broadcast;

use crate::models::{LogLevel, ServerStatus};

/// Which pipe a line was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
        }
    }
}

/// One accepted line of server output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    /// Timestamp text, empty when the line had none
    pub time: String,
    pub level: LogLevel,
    /// Level token as printed (`INFO`, `WARNING`, ...)
    pub level_name: String,
    pub text: String,
    pub stream: OutputStream,
}

/// Events published by the supervisor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// The session moved to a new status
    StatusChanged(ServerStatus),
    /// Informational text about the session lifecycle
    Notice(String),
    /// A line of server output that was not suppressed
    Message(ServerMessage),
    /// A player joined (`joined == true`) or left
    PlayerChanged { joined: bool, name: String },
}

/// Subscription handle for receiving server events.
///
/// A subscriber that falls more than the bus capacity behind loses the
/// oldest events, status changes included. [`missed`](Self::missed)
/// reports how many were lost; after it grows, re-read the current state
/// from `ProcessSupervisor::status()` and `online_players()` instead of
/// replaying events.
pub struct ServerEventSubscription {
    receiver: broadcast::Receiver<ServerEvent>,
    missed: u64,
}

impl ServerEventSubscription {
    /// Receive the next event, waiting if necessary.
    ///
    /// Returns `None` once the bus is gone. Events dropped because this
    /// subscriber lagged are skipped and counted in [`missed`](Self::missed).
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => self.lagged(count),
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Option<ServerEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
                Err(broadcast::error::TryRecvError::Lagged(count)) => self.lagged(count),
            }
        }
    }

    /// Total number of events this subscriber lost by lagging
    pub fn missed(&self) -> u64 {
        self.missed
    }

    fn lagged(&mut self, count: u64) {
        self.missed += count;
        warn!("Server event subscriber lagged by {} events", count);
    }

    /// Drain every event that is already queued
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

/// Event bus for publishing and subscribing to server events
#[derive(Clone)]
pub struct ServerEventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl ServerEventBus {
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create a new event bus with the specified per-subscriber capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to server events published from now on
    pub fn subscribe(&self) -> ServerEventSubscription {
        ServerEventSubscription {
            receiver: self.sender.subscribe(),
            missed: 0,
        }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: ServerEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ServerEventBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
