//! Server Process Launching
//!
//! Builds the command line for a [`ServerConfiguration`], spawns it with
//! piped stdio and watches it until it exits or is killed.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::models::ServerConfiguration;

use super::driver::SessionDriver;

/// How long the exit watcher waits for buffered output after exit
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// A fully resolved program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_directory: PathBuf,
}

impl LaunchCommand {
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<String>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_directory: working_directory.into(),
        }
    }

    /// Human-readable form for logs and errors
    pub fn display(&self) -> String {
        let mut text = self.program.display().to_string();
        for arg in &self.args {
            text.push(' ');
            text.push_str(arg);
        }
        text
    }
}

/// Turns a run configuration into the command that gets spawned
pub trait Launcher: Send + Sync {
    fn command(&self, config: &ServerConfiguration) -> LaunchCommand;
}

/// Launches the server jar with the configured Java runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaLauncher;

impl Launcher for JavaLauncher {
    fn command(&self, config: &ServerConfiguration) -> LaunchCommand {
        LaunchCommand::new(
            config.java_path.clone(),
            config.java_args(),
            config.effective_working_directory(),
        )
    }
}

/// A spawned child with its pipes taken out
pub struct SpawnedProcess {
    pub child: Child,
    pub stdin: ChildStdin,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

impl SpawnedProcess {
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }
}

/// Spawn `command` with piped stdio and no console window
pub fn spawn(command: &LaunchCommand) -> Result<SpawnedProcess> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .current_dir(&command.working_directory)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(windows)]
    {
        use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    let mut child = cmd.spawn().map_err(|e| Error::SpawnFailed {
        command: command.display(),
        reason: e.to_string(),
    })?;

    let stdin = child.stdin.take().ok_or_else(|| Error::StreamUnavailable {
        stream: "stdin".to_string(),
    })?;
    let stdout = child.stdout.take().ok_or_else(|| Error::StreamUnavailable {
        stream: "stdout".to_string(),
    })?;
    let stderr = child.stderr.take().ok_or_else(|| Error::StreamUnavailable {
        stream: "stderr".to_string(),
    })?;

    info!(
        "Spawned server process {:?}: {}",
        child.id(),
        command.display()
    );

    Ok(SpawnedProcess {
        child,
        stdin,
        stdout,
        stderr,
    })
}

/// Watch `child` until it exits, its output ends, or a kill is requested.
///
/// Natural exit waits (bounded) for the readers to drain before the
/// session is closed, so no trailing output is lost.
pub fn watch_exit(
    mut child: Child,
    kill_rx: oneshot::Receiver<()>,
    readers: Vec<JoinHandle<()>>,
    generation: u64,
    driver: Arc<SessionDriver>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let readers_done = async {
            for reader in readers {
                let _ = reader.await;
            }
        };
        tokio::pin!(readers_done);

        tokio::select! {
            status = child.wait() => {
                log_exit(status);
                if tokio::time::timeout(DRAIN_TIMEOUT, &mut readers_done).await.is_err() {
                    warn!("Server output still open {:?} after exit", DRAIN_TIMEOUT);
                }
            }
            _ = &mut readers_done => {
                debug!("Server output streams closed");
                terminate(&mut child).await;
            }
            _ = kill_rx => {
                terminate(&mut child).await;
                return;
            }
        }

        driver.process_exited(generation);
    })
}

async fn terminate(child: &mut Child) {
    match child.kill().await {
        Ok(()) => debug!("Server process killed"),
        Err(e) => warn!("Failed to kill server process: {}", e),
    }
}

fn log_exit(status: std::io::Result<ExitStatus>) {
    match status {
        Ok(status) => info!("Server process exited with {}", status),
        Err(e) => warn!("Failed to wait for server process: {}", e),
    }
}
