//! Server Process Supervision
//!
//! [`ProcessSupervisor`] owns the lifecycle of one Minecraft server
//! process at a time: it spawns the JVM, pumps stdout and stderr through
//! the log classifier, keeps the session state current and fans out
//! [`ServerEvent`]s to any number of subscribers.
//!
//! ```no_run
//! use mcstarter::{ProcessSupervisor, ServerConfiguration, ServerEvent};
//!
//! # async fn run() -> mcstarter::Result<()> {
//! let supervisor = ProcessSupervisor::new();
//! let mut events = supervisor.subscribe();
//!
//! supervisor
//!     .start(&ServerConfiguration::new("java", "/srv/mc/server.jar"))
//!     .await?;
//!
//! while let Some(event) = events.recv().await {
//!     if let ServerEvent::Message(message) = event {
//!         println!("{} {}", message.time, message.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod driver;
pub mod events;
pub mod process;
pub mod streams;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;

use crate::error::Result;
use crate::models::{ServerConfiguration, ServerStatus};

pub use commands::ServerCommand;
pub use driver::SessionDriver;
pub use events::{
    OutputStream, ServerEvent, ServerEventBus, ServerEventSubscription, ServerMessage,
};
pub use process::{JavaLauncher, LaunchCommand, Launcher};

/// Handles to the running process's tasks
struct AttachedProcess {
    pid: Option<u32>,
    commands: mpsc::UnboundedSender<String>,
    kill: Option<oneshot::Sender<()>>,
    readers: Vec<AbortHandle>,
}

/// Supervises one server process at a time
pub struct ProcessSupervisor {
    driver: Arc<SessionDriver>,
    launcher: Box<dyn Launcher>,
    process: Mutex<Option<AttachedProcess>>,
}

impl ProcessSupervisor {
    /// Create a supervisor launching servers with Java
    pub fn new() -> Self {
        Self::with_event_capacity(ServerEventBus::DEFAULT_CAPACITY)
    }

    /// Create a supervisor whose subscribers buffer up to `capacity` events
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            driver: Arc::new(SessionDriver::new(ServerEventBus::new(capacity))),
            launcher: Box::new(JavaLauncher),
            process: Mutex::new(None),
        }
    }

    /// Builder: use a different launcher
    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    fn lock_process(&self) -> MutexGuard<'_, Option<AttachedProcess>> {
        self.process
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start the server described by `config`.
    ///
    /// Does nothing unless the session is `Closed`. A spawn failure is
    /// returned and leaves the session `Closed`. Must be called from
    /// within a Tokio runtime.
    pub async fn start(&self, config: &ServerConfiguration) -> Result<()> {
        let mut process = self.lock_process();
        if self.driver.status() != ServerStatus::Closed {
            debug!("Start ignored: server is {}", self.driver.status());
            return Ok(());
        }

        config.validate()?;
        if config.accept_eula {
            crate::eula::ensure_eula_accepted(&config.effective_working_directory())?;
        }

        let command = self.launcher.command(config);
        let spawned = process::spawn(&command)?;
        let pid = spawned.pid();

        let Some(generation) = self.driver.begin(config, pid) else {
            return Ok(());
        };

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = oneshot::channel();

        let stdout = streams::spawn_line_reader(
            spawned.stdout,
            OutputStream::Stdout,
            generation,
            self.driver.clone(),
        );
        let stderr = streams::spawn_line_reader(
            spawned.stderr,
            OutputStream::Stderr,
            generation,
            self.driver.clone(),
        );
        let readers = vec![stdout.abort_handle(), stderr.abort_handle()];

        streams::spawn_stdin_writer(spawned.stdin, commands_rx);
        process::watch_exit(
            spawned.child,
            kill_rx,
            vec![stdout, stderr],
            generation,
            self.driver.clone(),
        );

        *process = Some(AttachedProcess {
            pid,
            commands: commands_tx,
            kill: Some(kill_tx),
            readers,
        });
        Ok(())
    }

    /// Forcibly terminate the server and close the session.
    ///
    /// No-op when already `Closed`.
    pub fn kill(&self) {
        let mut process = self.lock_process();
        if self.driver.status() == ServerStatus::Closed {
            return;
        }

        // Late lines and the exit notification of the killed process are
        // dropped from here on.
        self.driver.detach();

        if let Some(mut attached) = process.take() {
            for reader in &attached.readers {
                reader.abort();
            }
            if let Some(kill) = attached.kill.take() {
                let _ = kill.send(());
            }
            info!("Killing server process {:?}", attached.pid);
        }

        self.driver.force_close();
    }

    /// Queue `text` as a console command.
    ///
    /// Ignored when no server process is running.
    pub fn send_command(&self, text: &str) {
        let process = self.lock_process();
        let attached = match process.as_ref() {
            Some(attached) if self.driver.status() != ServerStatus::Closed => attached,
            _ => {
                debug!("Command ignored, server is not running: {}", text);
                return;
            }
        };

        if attached.commands.send(text.to_string()).is_err() {
            warn!("Command dropped, server stdin is closed: {}", text);
        }
    }

    fn send(&self, command: ServerCommand) {
        self.send_command(&command.to_string());
    }

    /// Ask the server to shut down gracefully
    pub fn stop(&self) {
        self.send(ServerCommand::Stop);
        self.driver.request_stop();
    }

    /// Broadcast a message to every player
    pub fn say(&self, message: &str) {
        self.send(ServerCommand::Say(message.to_string()));
    }

    pub fn kick(&self, player: &str) {
        self.send(ServerCommand::Kick(player.to_string()));
    }

    pub fn ban(&self, player: &str) {
        self.send(ServerCommand::Ban(player.to_string()));
    }

    pub fn pardon(&self, player: &str) {
        self.send(ServerCommand::Pardon(player.to_string()));
    }

    pub fn op(&self, player: &str) {
        self.send(ServerCommand::Op(player.to_string()));
    }

    pub fn deop(&self, player: &str) {
        self.send(ServerCommand::Deop(player.to_string()));
    }

    pub fn toggle_rain(&self) {
        self.send(ServerCommand::ToggleRain);
    }

    pub fn set_day(&self) {
        self.send(ServerCommand::SetDay);
    }

    pub fn set_night(&self) {
        self.send(ServerCommand::SetNight);
    }

    /// Flush the world to disk
    pub fn save(&self) {
        self.send(ServerCommand::SaveAll);
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> ServerEventSubscription {
        self.driver.events().subscribe()
    }

    pub fn status(&self) -> ServerStatus {
        self.driver.status()
    }

    /// Snapshot of the players currently online
    pub fn online_players(&self) -> Vec<String> {
        self.driver.online_players()
    }

    /// Process id of the running server
    pub fn pid(&self) -> Option<u32> {
        if self.driver.status() == ServerStatus::Closed {
            return None;
        }
        self.lock_process().as_ref().and_then(|attached| attached.pid)
    }
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcessSupervisor {
    fn drop(&mut self) {
        self.kill();
    }
}
