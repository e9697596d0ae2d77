//! Order-enforcing HTTP/1.1 response writer.
//!
//! A response is written in this order, each step forwarded straight to the
//! underlying sink:
//!
//! ```text
//! status line -> headers (1..n) -> body or chunks (0..n) -> [chunked end -> trailers (1..n)]
//! ```
//!
//! Any call made out of order fails with [`WriteError::WrongWriteOrder`] before
//! a single byte is written, so the writer can never put a malformed message on
//! the wire by itself. Nothing is buffered: once a write has been issued it
//! cannot be taken back, so the state advances even when the sink fails.

use async_std::io::Write;
use async_std::prelude::*;
use thiserror::Error;

use crate::http::headers::Headers;
use crate::http::status::StatusCode;
use crate::http::{CRLF, HTTP_VERSION};

/// Terminal zero-length chunk followed by the empty line closing the message.
const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Initialized,
    StatusLineDone,
    Headers,
    Body,
    BodyDone,
    Trailers,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{operation} called out of order (writer state: {state:?})")]
    WrongWriteOrder {
        operation: &'static str,
        state: WriterState,
    },

    #[error("i/o error while writing response: {0}")]
    Io(#[from] std::io::Error),
}

pub struct ResponseWriter<W> {
    state: WriterState,
    writer: W,
}

impl<W: Write + Unpin> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: WriterState::Initialized,
            writer,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Moves to `next` if the current state is one of `allowed`.
    fn advance(
        &mut self,
        operation: &'static str,
        allowed: &[WriterState],
        next: WriterState,
    ) -> Result<(), WriteError> {
        if !allowed.contains(&self.state) {
            return Err(WriteError::WrongWriteOrder {
                operation,
                state: self.state,
            });
        }
        self.state = next;
        Ok(())
    }

    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        self.advance(
            "write_status_line",
            &[WriterState::Initialized],
            WriterState::StatusLineDone,
        )?;

        // HTTP/1.1 <code> <reason>\r\n
        let line = format!("{} {} {}\r\n", HTTP_VERSION, status, status.reason_phrase());
        self.writer.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Writes one block of header lines followed by its own empty line.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        self.advance(
            "write_headers",
            &[WriterState::StatusLineDone, WriterState::Headers],
            WriterState::Headers,
        )?;
        self.write_field_block(headers).await
    }

    /// Writes raw body bytes, unframed.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, WriteError> {
        self.advance("write_body", &[WriterState::Headers, WriterState::Body], WriterState::Body)?;
        self.writer.write_all(body).await?;
        Ok(body.len())
    }

    /// Writes `body` as a single chunk: `<HEX-LEN>\r\n<body>\r\n`.
    ///
    /// An empty `body` writes nothing, since a zero-length chunk would end the message.
    pub async fn write_chunked_body(&mut self, body: &[u8]) -> Result<usize, WriteError> {
        self.advance(
            "write_chunked_body",
            &[WriterState::Headers, WriterState::Body],
            WriterState::Body,
        )?;
        if body.is_empty() {
            return Ok(0);
        }

        let size_line = format!("{:X}\r\n", body.len());
        let mut chunk = Vec::with_capacity(size_line.len() + body.len() + CRLF.len());
        chunk.extend_from_slice(size_line.as_bytes());
        chunk.extend_from_slice(body);
        chunk.extend_from_slice(CRLF);

        self.writer.write_all(&chunk).await?;
        Ok(chunk.len())
    }

    /// Writes the terminal zero-length chunk.
    ///
    /// May directly follow the headers, which yields a chunked body with no
    /// data chunks.
    pub async fn write_chunked_body_done(&mut self) -> Result<usize, WriteError> {
        self.advance(
            "write_chunked_body_done",
            &[WriterState::Headers, WriterState::Body],
            WriterState::BodyDone,
        )?;
        self.writer.write_all(LAST_CHUNK).await?;
        Ok(LAST_CHUNK.len())
    }

    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), WriteError> {
        self.advance(
            "write_trailers",
            &[WriterState::BodyDone, WriterState::Trailers],
            WriterState::Trailers,
        )?;
        self.write_field_block(trailers).await
    }

    pub async fn flush(&mut self) -> Result<(), WriteError> {
        self.writer.flush().await?;
        Ok(())
    }

    // <name>: <value>\r\n
    // ...
    // \r\n
    async fn write_field_block(&mut self, fields: &Headers) -> Result<(), WriteError> {
        let mut block = String::new();
        for (name, value) in fields.iter() {
            block.push_str(name);
            block.push_str(": ");
            block.push_str(value);
            block.push_str("\r\n");
        }
        block.push_str("\r\n");

        self.writer.write_all(block.as_bytes()).await?;
        Ok(())
    }
}

/// Headers for a plain-text response that closes the connection afterwards.
pub fn default_headers(content_len: usize) -> Headers {
    let mut h = Headers::new();
    h.set("Content-Length", &content_len.to_string());
    h.set("Connection", "close");
    h.set("Content-Type", "text/plain");
    h
}
