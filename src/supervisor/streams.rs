//! Server I/O Streams
//!
//! One task per output pipe turns bytes into lines for the session
//! driver; one task drains the command queue into the server's stdin so
//! callers never wait on the pipe.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::error::Error;

use super::driver::SessionDriver;
use super::events::OutputStream;

/// Read `reader` line by line and hand each line to the driver.
///
/// Bytes that are not valid UTF-8 are replaced rather than dropped. A read
/// error ends the stream exactly like end-of-file does.
pub fn spawn_line_reader<R>(
    reader: R,
    stream: OutputStream,
    generation: u64,
    driver: Arc<SessionDriver>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::with_capacity(256);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    debug!("Server {} reached end of stream", stream.as_str());
                    break;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']);
                    driver.process_line(generation, stream, line);
                }
                Err(e) => {
                    warn!("Error reading server {}: {}", stream.as_str(), e);
                    break;
                }
            }
        }
    })
}

/// Write every queued command, newline-terminated, to `stdin`.
///
/// The task ends when the queue closes or the pipe breaks; queued
/// commands after a broken pipe are discarded.
pub fn spawn_stdin_writer<W>(stdin: W, mut commands: UnboundedReceiver<String>) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut stdin = stdin;
        while let Some(command) = commands.recv().await {
            if let Err(e) = write_line(&mut stdin, &command).await {
                warn!(
                    "{}",
                    Error::CommandWriteFailed {
                        command,
                        reason: e.to_string(),
                    }
                );
                break;
            }
            trace!("Sent command: {}", command);
        }
        debug!("Server stdin writer finished");
    })
}

async fn write_line<W>(stdin: &mut W, command: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    stdin.write_all(command.as_bytes()).await?;
    stdin.write_all(b"\n").await?;
    stdin.flush().await
}
