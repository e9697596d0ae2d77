//! Connection-level HTTP server.
//!
//! This module only deals with networking: accepting TCP connections and
//! wiring each of them to one parse-then-respond cycle. Request parsing lives
//! in [`http::parser`](crate::http::parser), response serialization in
//! [`http::response`](crate::http::response), and what to answer in
//! [`handler`](crate::handler).
//!
//! ## Connection lifecycle
//!
//! 1. Accept a TCP connection and spawn a task for it
//! 2. Incrementally read and parse one request
//!    (see [`request_from_reader`])
//! 3. Hand the request and a [`ResponseWriter`] to the handler
//! 4. Close the connection
//!
//! A request that fails to parse is answered with a best-effort `400` before
//! closing. I/O errors and timeouts close the connection without an answer.

use async_std::future;
use async_std::io::{Read, Write};
use async_std::net::TcpListener;
use async_std::prelude::*;
use async_std::task;
use tracing::{debug, info, warn};

use crate::config::config;
use crate::handler;
use crate::http::parser::{ReadError, request_from_reader};
use crate::http::response::ResponseWriter;

pub struct Server;

impl Server {
    /// Binds to the configured address and port and serves connections forever.
    ///
    /// Each accepted connection gets its own task; tasks share no state.
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind((config().address, config().port)).await?;
        info!("Server started on {}", listener.local_addr()?);

        let mut incoming = listener.incoming();
        while let Some(stream) = incoming.next().await {
            match stream {
                Ok(stream) => {
                    let peer = stream.peer_addr().ok();
                    debug!(?peer, "connection accepted");
                    task::spawn(async move {
                        handle_connection(stream).await;
                        debug!(?peer, "connection closed");
                    });
                }
                Err(err) => warn!("Error accepting connection: {err}"),
            }
        }

        Ok(())
    }
}

/// Serves exactly one request on `stream`.
///
/// Generic over the transport so it can be driven by anything that reads and
/// writes bytes.
pub async fn handle_connection<S>(mut stream: S)
where
    S: Read + Write + Unpin,
{
    let cfg = config();

    let read =
        future::timeout(cfg.read_timeout, request_from_reader(&mut stream, &cfg.parser)).await;

    let mut writer = ResponseWriter::new(&mut stream);

    let result = match read {
        Ok(Ok(req)) => {
            future::timeout(cfg.write_timeout, handler::handle_request(&mut writer, &req)).await
        }
        Ok(Err(ReadError::Io(err))) => {
            warn!("I/O error while reading request: {err}");
            return;
        }
        Ok(Err(ReadError::ConnectionClosed)) => {
            debug!("connection closed before a complete request was received");
            return;
        }
        Ok(Err(err)) => {
            info!("Rejecting malformed request: {err}");
            future::timeout(cfg.write_timeout, handler::handle_error(&mut writer, &err)).await
        }
        Err(_) => {
            warn!("Timed out after {:?} waiting for request", cfg.read_timeout);
            return;
        }
    };

    match result {
        Ok(Ok(())) => {
            if let Err(err) = writer.flush().await {
                warn!("Failed to flush response: {err}");
            }
        }
        Ok(Err(err)) => warn!("Failed to write response: {err}"),
        Err(_) => warn!("Timed out after {:?} writing response", cfg.write_timeout),
    }
}
