//! Bounded-time stdin reads
//!
//! The host may hold stdin open; a hook must never hang waiting for it. The
//! payload is read on a helper thread and collected until EOF or the
//! deadline, whichever comes first.

use std::io::{self, Read};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{HookError, Result};

const CHUNK_SIZE: usize = 8 * 1024;

/// Read all of stdin, giving up after `timeout`
pub fn read_stdin_with_timeout(timeout: Duration) -> Result<String> {
    read_with_timeout(io::stdin(), timeout)
}

/// Read `reader` to EOF or until `timeout` elapses.
///
/// On timeout whatever arrived so far is returned; `HookError::Timeout` only
/// when nothing arrived at all.
pub fn read_with_timeout<R>(mut reader: R, timeout: Duration) -> Result<String>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<io::Result<Vec<u8>>>();

    thread::spawn(move || {
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(Ok(buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });

    let deadline = Instant::now() + timeout;
    let mut data = Vec::new();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(Ok(chunk)) => data.extend_from_slice(&chunk),
            Ok(Err(e)) => return Err(HookError::Io(e)),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                if data.is_empty() {
                    return Err(HookError::Timeout(timeout));
                }
                break;
            }
        }
    }

    Ok(String::from_utf8_lossy(&data).into_owned())
}
