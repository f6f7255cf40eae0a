//! Session Driver
//!
//! The single control path that mutates [`SessionState`]. Reader tasks
//! hand it raw lines, the exit watcher reports process exit, and the
//! supervisor reports start/stop/kill. All of it is serialized by one
//! mutex, and events are published while that mutex is held so that
//! every subscriber sees the same order of status, player and message
//! events.
//!
//! Each started process gets a new generation number. Work tagged with
//! an older generation (lines still in flight from a killed process, a
//! late exit notification) is dropped.

use std::sync::{Mutex, MutexGuard};

use crate::classifier::{ClassifyContext, LogLineClassifier};
use crate::models::{
    LineEvent, ProcessPriority, ServerConfiguration, ServerStatus, SessionInput, SessionState,
    Transition,
};
use crate::platform::Platform;

use super::events::{OutputStream, ServerEvent, ServerEventBus, ServerMessage};

struct DriverState {
    session: SessionState,
    generation: u64,
    classifier: LogLineClassifier,
    ignore_command_blocks: bool,
    priority: ProcessPriority,
    pid: Option<u32>,
}

/// Serializes every state change of the supervised session
pub struct SessionDriver {
    state: Mutex<DriverState>,
    events: ServerEventBus,
}

impl SessionDriver {
    pub fn new(events: ServerEventBus) -> Self {
        Self {
            state: Mutex::new(DriverState {
                session: SessionState::new(),
                generation: 0,
                classifier: LogLineClassifier::new(),
                ignore_command_blocks: true,
                priority: ProcessPriority::Normal,
                pid: None,
            }),
            events,
        }
    }

    pub fn events(&self) -> &ServerEventBus {
        &self.events
    }

    fn lock(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish_transition(&self, transition: Transition) {
        debug!("Server status {} -> {}", transition.from, transition.to);
        if let Some(notice) = transition.notice() {
            self.events.publish(ServerEvent::Notice(notice.to_string()));
        }
        self.events.publish(ServerEvent::StatusChanged(transition.to));
    }

    /// Start a new session for a freshly spawned process.
    ///
    /// Returns the session generation, or `None` when a session is
    /// already running.
    pub fn begin(&self, config: &ServerConfiguration, pid: Option<u32>) -> Option<u64> {
        let mut state = self.lock();
        if !state.session.is_closed() {
            return None;
        }

        state.generation += 1;
        state.session = SessionState::new();
        state.classifier = LogLineClassifier::with_server_identities(
            config.server_identities.iter().cloned(),
        );
        state.ignore_command_blocks = config.ignore_command_blocks;
        state.priority = config.priority;
        state.pid = pid;

        let transition = state.session.apply(SessionInput::Start)?;
        info!(
            "Session {} started (generation {}, pid {:?})",
            state.session.id, state.generation, pid
        );
        self.publish_transition(transition);
        Some(state.generation)
    }

    /// Feed one line read from the process's output
    pub fn process_line(&self, generation: u64, stream: OutputStream, line: &str) {
        let mut priority_target = None;
        {
            let mut state = self.lock();
            if state.generation != generation || state.session.is_closed() {
                return;
            }

            let ctx = ClassifyContext::new(state.session.status(), state.ignore_command_blocks);
            let parsed = state.classifier.classify(line, &ctx);
            if parsed.rejected {
                trace!("Suppressed command block echo: {}", line);
                return;
            }

            match &parsed.event {
                Some(LineEvent::Ready) => {
                    if let Some(transition) = state.session.apply(SessionInput::Ready) {
                        info!("Server is ready");
                        self.publish_transition(transition);
                        priority_target = state.pid.map(|pid| (pid, state.priority));
                    }
                }
                Some(LineEvent::PlayerJoined(name)) => {
                    if state.session.player_joined(name) {
                        info!("Player joined: {}", name);
                        self.events.publish(ServerEvent::PlayerChanged {
                            joined: true,
                            name: name.clone(),
                        });
                    }
                }
                Some(LineEvent::PlayerLeft(name)) => {
                    if state.session.player_left(name) {
                        info!("Player left: {}", name);
                        self.events.publish(ServerEvent::PlayerChanged {
                            joined: false,
                            name: name.clone(),
                        });
                    }
                }
                None => {}
            }

            self.events.publish(ServerEvent::Message(ServerMessage {
                time: parsed.timestamp_text,
                level: parsed.level,
                level_name: parsed.level_name_raw,
                text: parsed.message,
                stream,
            }));
        }

        if let Some((pid, priority)) = priority_target {
            apply_priority(pid, priority);
        }
    }

    /// The process of `generation` exited or both its streams ended
    pub fn process_exited(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            return false;
        }
        self.close(&mut state)
    }

    /// Stop accepting lines and exit notifications from the current process
    pub fn detach(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.generation
    }

    /// Detach the current process and close the session immediately
    pub fn force_close(&self) -> bool {
        let mut state = self.lock();
        state.generation += 1;
        self.close(&mut state)
    }

    fn close(&self, state: &mut DriverState) -> bool {
        let Some(transition) = state.session.apply(SessionInput::ProcessExited) else {
            return false;
        };
        state.pid = None;
        info!("Session {} closed", state.session.id);
        self.publish_transition(transition);
        true
    }

    /// Record that the stop command was sent
    pub fn request_stop(&self) -> bool {
        let mut state = self.lock();
        match state.session.apply(SessionInput::StopRequested) {
            Some(transition) => {
                self.publish_transition(transition);
                true
            }
            None => false,
        }
    }

    pub fn status(&self) -> ServerStatus {
        self.lock().session.status()
    }

    /// Snapshot of the online players
    pub fn online_players(&self) -> Vec<String> {
        self.lock().session.online_players()
    }

    /// Generation of the current (or last) session
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}

fn apply_priority(pid: u32, priority: ProcessPriority) {
    if priority == ProcessPriority::Normal {
        return;
    }
    match Platform::priority().set_priority(pid, priority) {
        Ok(()) => info!("Set process {} to {:?} priority", pid, priority),
        Err(e) => warn!("{}", crate::error::Error::from(e)),
    }
}
