//! `TestGsproServer` mode: a throwaway TCP listener that speaks just enough of the GSPro
//! Connect v1 protocol to exercise [`sim_sink::GsProSink`] without a real copy of GSPro
//! running — accepts one connection, always reports `Code: 200` (armed), and logs every
//! shot line it receives.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;

use tracing::info;

use crate::error::Result;

pub fn run(addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)?;
    info!(addr, "test gspro server: listening");

    loop {
        let (mut stream, peer) = listener.accept()?;
        info!(%peer, "test gspro server: accepted connection");
        let reader_stream = stream.try_clone()?;

        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            loop {
                writeln!(stream, "{{\"Code\":200,\"Message\":\"ok\"}}")?;
                stream.flush()?;
                std::thread::sleep(std::time::Duration::from_secs(1));
            }
        });

        let reader = BufReader::new(reader_stream);
        for line in reader.lines() {
            match line {
                Ok(line) => info!(line, "test gspro server: received"),
                Err(_) => break,
            }
        }
        let _ = writer.join();
    }
}
