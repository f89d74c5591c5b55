//! The log server's accept loop (§4.7), grounded on `logserver.py`'s
//! `LogRecordStreamHandler`/`LogRecordSocketReceiver`: a 4-byte big-endian
//! length prefix, then that many bytes of a serialized record, repeated
//! until the prefix comes up short or the peer closes. Every record
//! received is written; there is no filtering by level here (the emitting
//! actor's own `tracing` level filter already decided what gets sent).
//!
//! Per §4.6/§4.7 the log server sits below the actor framework and must
//! never connect to the bus: its only I/O is this TCP accept loop and the
//! append-only log file.

// Layer 1: Standard library imports
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::Local;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// Layer 3: Internal module imports
use super::error::LoggingError;
use super::record::LogRecord;

/// The platform-conventional port for a framed-length-prefix log transport
/// of this shape (matches Python's `logging.handlers.DEFAULT_TCP_LOGGING_PORT`,
/// which every actor connects to without it appearing anywhere in
/// `config.ini`, §6).
pub const DEFAULT_LOG_PORT: u16 = 9020;

/// An unbound log server: the output file and timestamp format it was
/// configured with (§4.3 `logfile`, `logdatefmt`).
pub struct LogServer {
    logfile: PathBuf,
    datefmt: String,
}

impl LogServer {
    /// Configure a log server writing to `logfile`, formatting each
    /// record's timestamp with the strftime-compatible `datefmt`.
    pub fn new(logfile: impl Into<PathBuf>, datefmt: impl Into<String>) -> Self {
        Self {
            logfile: logfile.into(),
            datefmt: datefmt.into(),
        }
    }

    /// Rotate any pre-existing file at `logfile` by renaming it with the
    /// current timestamp (§4.7 "prepending any existing file... with the
    /// current timestamp"), open the (now fresh) file for append, and bind
    /// the listener. Both are fatal failures (§7); nothing is accepted
    /// until both succeed.
    pub async fn bind(self, bind_addr: &str) -> Result<BoundLogServer, LoggingError> {
        rotate_existing(&self.logfile)?;

        let file = File::options()
            .create(true)
            .append(true)
            .open(&self.logfile)
            .await
            .map_err(|source| LoggingError::LogFileUnavailable {
                path: self.logfile.clone(),
                source,
            })?;

        let listener =
            TcpListener::bind(bind_addr)
                .await
                .map_err(|source| LoggingError::BindFailed {
                    addr: bind_addr.to_string(),
                    source,
                })?;

        Ok(BoundLogServer {
            listener,
            file: Arc::new(Mutex::new(file)),
            datefmt: Arc::new(self.datefmt),
        })
    }
}

fn rotate_existing(logfile: &PathBuf) -> Result<(), LoggingError> {
    if !logfile.exists() {
        return Ok(());
    }
    let stem = logfile
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("orover");
    let suffix = Local::now().format("%Y%m%d%H%M%S");
    let rotated = logfile.with_file_name(format!("{stem}_{suffix}.log"));
    fs::rename(logfile, &rotated).map_err(|source| LoggingError::LogFileUnavailable {
        path: logfile.clone(),
        source,
    })
}

/// A log server with its listener already bound, ready to [`serve`](Self::serve).
pub struct BoundLogServer {
    listener: TcpListener,
    file: Arc<Mutex<File>>,
    datefmt: Arc<String>,
}

impl BoundLogServer {
    /// The address actually bound (useful when `bind_addr` requested an
    /// ephemeral port, e.g. in tests).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever; each is handled concurrently on its own
    /// task (§4.7 "connections are handled concurrently") and serialized
    /// against every other connection only at the final file write.
    pub async fn serve(self) -> Result<(), LoggingError> {
        info!(addr = ?self.local_addr().ok(), "log server accepting connections");
        loop {
            match self.listener.accept().await {
                Ok((socket, peer)) => {
                    debug!(%peer, "log connection accepted");
                    tokio::spawn(handle_connection(socket, self.file.clone(), self.datefmt.clone()));
                }
                Err(e) => warn!(error = %e, "log server accept failed"),
            }
        }
    }
}

async fn handle_connection(mut socket: TcpStream, file: Arc<Mutex<File>>, datefmt: Arc<String>) {
    loop {
        let mut len_buf = [0u8; 4];
        if socket.read_exact(&mut len_buf).await.is_err() {
            break; // short length prefix or closed connection (§4.7)
        }
        let len = u32::from_be_bytes(len_buf) as usize;
        let mut payload = vec![0u8; len];
        if socket.read_exact(&mut payload).await.is_err() {
            break;
        }

        let record: LogRecord = match serde_json::from_slice(&payload) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "malformed log record, dropped");
                continue;
            }
        };

        let line = format_line(&record, &datefmt);
        let mut file = file.lock().await;
        if let Err(e) = file.write_all(line.as_bytes()).await {
            warn!(error = %e, "failed to write log record");
        }
    }
}

/// One formatted output line: `<timestamp> <logger> <LEVEL> <message>`.
///
/// A simplification of the Python original's arbitrary `%(name)s`-style
/// `logformat` string (§4.3 `logformat`): only the timestamp portion
/// (`logdatefmt`) is configurable here, via `chrono`'s strftime-compatible
/// formatter; the field order and padding are fixed. An implementer wanting
/// the original's fully free-form layout would parse `logformat` into a
/// sequence of field references instead.
fn format_line(record: &LogRecord, datefmt: &str) -> String {
    format!(
        "{} {:<15} {:<8} {}\n",
        record.ts.format(datefmt),
        record.logger,
        record.level.as_str(),
        record.message
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::logging::record::Severity;
    use tokio::io::AsyncWriteExt as _;

    fn sample_record(message: &str) -> LogRecord {
        LogRecord {
            logger: "boss".to_string(),
            level: Severity::Info,
            message: message.to_string(),
            ts: Local::now(),
        }
    }

    fn encode_frame(record: &LogRecord) -> Vec<u8> {
        let payload = serde_json::to_vec(record).unwrap();
        let mut frame = (payload.len() as u32).to_be_bytes().to_vec();
        frame.extend(payload);
        frame
    }

    #[test]
    fn rotate_existing_renames_prior_file() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = dir.path().join("orover.log");
        fs::write(&logfile, b"previous run").unwrap();

        rotate_existing(&logfile).unwrap();

        assert!(!logfile.exists());
        let rotated: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("orover_") && name.ends_with(".log"))
            .collect();
        assert_eq!(rotated.len(), 1);
    }

    #[test]
    fn rotate_existing_is_noop_without_a_prior_file() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = dir.path().join("orover.log");
        rotate_existing(&logfile).unwrap();
        assert!(!logfile.exists());
    }

    #[test]
    fn format_line_includes_every_field() {
        let record = sample_record("hello");
        let line = format_line(&record, "%Y-%m-%d");
        assert!(line.contains("boss"));
        assert!(line.contains("INFO"));
        assert!(line.contains("hello"));
        assert!(line.ends_with('\n'));
    }

    #[tokio::test]
    async fn two_records_in_one_segment_are_both_written() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = dir.path().join("orover.log");
        let server = LogServer::new(&logfile, "%Y-%m-%d %H:%M:%S")
            .bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.serve());

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let mut combined = encode_frame(&sample_record("first"));
        combined.extend(encode_frame(&sample_record("second")));
        stream.write_all(&combined).await.unwrap();
        stream.shutdown().await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let contents = fs::read_to_string(&logfile).unwrap();
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));
        assert!(contents.find("first").unwrap() < contents.find("second").unwrap());
    }

    #[tokio::test]
    async fn records_split_across_writes_still_parse() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = dir.path().join("orover.log");
        let server = LogServer::new(&logfile, "%Y-%m-%d %H:%M:%S")
            .bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.serve());

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let frame = encode_frame(&sample_record("split-message"));
        let (first_half, second_half) = frame.split_at(frame.len() / 2);
        stream.write_all(first_half).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        stream.write_all(second_half).await.unwrap();
        stream.shutdown().await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let contents = fs::read_to_string(&logfile).unwrap();
        assert!(contents.contains("split-message"));
    }
}
