//! Blocking TCP connect-with-retry and line-reader helpers, translated from `seidr`'s
//! `RobotConnection::try_connect` backoff loop and `control`'s receive-loop shape onto
//! `std::net`/`std::thread`: no async runtime, plain OS threads.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

const RETRY_BACKOFF: Duration = Duration::from_millis(500);
const MAX_ATTEMPTS: u32 = 10;

/// Retries a blocking `connect` up to [`MAX_ATTEMPTS`] times, sleeping [`RETRY_BACKOFF`] between
/// attempts, mirroring `seidr::connection::connect::RobotConnection::try_connect`.
pub fn connect_with_retry(addr: &str) -> std::io::Result<TcpStream> {
    let mut last_error = None;
    for attempt in 1..=MAX_ATTEMPTS {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                info!(addr, attempt, "sim sink: connected");
                return Ok(stream);
            }
            Err(error) => {
                warn!(addr, attempt, %error, "sim sink: connect failed, retrying");
                last_error = Some(error);
                thread::sleep(RETRY_BACKOFF);
            }
        }
    }
    Err(last_error.expect("at least one connect attempt recorded an error"))
}

/// Spawns a thread that reads newline-delimited messages from `stream` and passes each line to
/// `on_line`, stopping when the peer closes the connection. Mirrors `control`'s receive loop,
/// which likewise hands each decoded message to a callback rather than returning it.
pub fn spawn_line_reader(stream: TcpStream, mut on_line: impl FnMut(String) + Send + 'static) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            match line {
                Ok(line) if !line.trim().is_empty() => on_line(line),
                Ok(_) => {}
                Err(error) => {
                    warn!(%error, "sim sink: reader thread stopping");
                    break;
                }
            }
        }
        info!("sim sink: reader thread stopped, peer closed connection");
    })
}

/// Writes `payload` followed by a newline, flushing immediately (sim protocols read one JSON
/// object per line).
pub fn send_line(stream: &mut TcpStream, payload: &str) -> std::io::Result<()> {
    stream.write_all(payload.as_bytes())?;
    stream.write_all(b"\n")?;
    stream.flush()
}
