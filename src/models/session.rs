//! Session State Model
//!
//! Tracks one spawn-to-exit lifetime of a server process: its status
//! and the players currently connected. Instances are created fresh for
//! every spawned process and mutated only by the supervisor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of the supervised server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// Process spawned, still loading
    Opening,
    /// Server finished loading and accepts players
    Open,
    /// Stop command sent, waiting for exit
    Closing,
    /// No process attached
    #[default]
    Closed,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerStatus::Opening => "opening",
            ServerStatus::Open => "open",
            ServerStatus::Closing => "closing",
            ServerStatus::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Inputs that drive the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    /// Spawn requested
    Start,
    /// Ready line detected
    Ready,
    /// Stop command sent
    StopRequested,
    /// Output reached end-of-stream, the process exited or was killed
    ProcessExited,
}

/// A status change produced by [`SessionState::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ServerStatus,
    pub to: ServerStatus,
}

impl Transition {
    /// Informational notice published alongside this transition, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self.to {
            ServerStatus::Opening => Some("Initializing server..."),
            ServerStatus::Closed => Some("The server has closed"),
            _ => None,
        }
    }
}

/// Status and online players of one supervised process
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Identifier used to correlate log output of one session
    pub id: Uuid,
    status: ServerStatus,
    online_players: Vec<String>,
    /// When the session reached `Open`
    pub opened_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Create a new session in the `Closed` state
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: ServerStatus::Closed,
            online_players: Vec::new(),
            opened_at: None,
        }
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// Feed an input into the state machine.
    ///
    /// Returns the transition when the status changed, `None` when the
    /// input does not apply to the current status.
    pub fn apply(&mut self, input: SessionInput) -> Option<Transition> {
        let next = match (self.status, input) {
            (ServerStatus::Closed, SessionInput::Start) => ServerStatus::Opening,
            (ServerStatus::Opening, SessionInput::Ready) => ServerStatus::Open,
            (ServerStatus::Open, SessionInput::StopRequested) => ServerStatus::Closing,
            (ServerStatus::Closed, SessionInput::ProcessExited) => return None,
            (_, SessionInput::ProcessExited) => ServerStatus::Closed,
            _ => return None,
        };

        let transition = Transition {
            from: self.status,
            to: next,
        };
        self.status = next;

        match next {
            ServerStatus::Open => self.opened_at = Some(Utc::now()),
            ServerStatus::Closed => {
                self.online_players.clear();
                self.opened_at = None;
            }
            _ => {}
        }

        Some(transition)
    }

    /// Record a player joining. Returns `false` if already online.
    pub fn player_joined(&mut self, name: &str) -> bool {
        if self.online_players.iter().any(|p| p == name) {
            return false;
        }
        self.online_players.push(name.to_string());
        true
    }

    /// Record a player leaving. Returns `false` if the player was not online.
    pub fn player_left(&mut self, name: &str) -> bool {
        match self.online_players.iter().position(|p| p == name) {
            Some(index) => {
                self.online_players.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the online players in join order
    pub fn online_players(&self) -> Vec<String> {
        self.online_players.clone()
    }

    pub fn player_count(&self) -> usize {
        self.online_players.len()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.status, ServerStatus::Closed)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, ServerStatus::Open)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
