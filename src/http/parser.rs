//! Incremental HTTP/1.1 request parser.
//!
//! Parsing is split in two layers:
//!
//! - [`Request::parse`] is a resumable state machine. Given every byte currently
//!   buffered, it advances through the request line, the header block and the
//!   body as far as those bytes allow, and reports how many it consumed. It keeps
//!   no state besides the request's phase and what it has accumulated so far,
//!   so it can be driven by sockets, test fixtures or in-memory buffers alike.
//! - [`request_from_reader`] owns the growable read buffer. It reads from the
//!   transport, feeds the parser, and keeps the unconsumed tail for the next
//!   round until the request is complete.
//!
//! "Need more data" is never an error: the parser simply consumes nothing and
//! stays in its current phase.

use async_std::io::{ErrorKind, Read};
use async_std::prelude::*;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::http::headers::HeaderError;
use crate::http::request::{ParserState, Request, RequestLine};
use crate::http::{CRLF, find_crlf};

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("unsupported http version: {0:?}")]
    UnsupportedHttpVersion(String),

    #[error("missing host header")]
    MissingHostHeader,

    #[error("invalid content length: {0:?}")]
    InvalidContentLength(String),

    #[error("content length exceeded: declared {declared}, received {received}")]
    ContentLengthExceeded { declared: usize, received: usize },

    #[error(transparent)]
    Header(#[from] HeaderError),
}

/// Errors that can occur while reading a request off a transport.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("i/o error while reading request: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed before the request was complete")]
    ConnectionClosed,

    #[error("request line and headers exceed {0} bytes")]
    RequestTooLarge(usize),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// Sizing of the read buffer used by [`request_from_reader`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Size of the buffer allocated before the first read.
    pub initial_capacity: usize,
    /// Bytes added whenever the buffer is full of unconsumed data.
    pub growth_increment: usize,
    /// Upper bound on unconsumed bytes (request line and headers).
    pub max_buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4096,
            growth_increment: 4096,
            max_buffer_size: 64 * 1024,
        }
    }
}

impl Request {
    /// Advances the parser over `data`, the full content of the read buffer.
    ///
    /// Phases are chained within a single call: a request without a body goes
    /// from headers to [`ParserState::Done`] without waiting for another read.
    /// Returns how many bytes of `data` were consumed; the caller must keep the
    /// rest buffered and pass it again, followed by whatever it reads next.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParserError> {
        let mut consumed = 0;

        loop {
            match self.state {
                ParserState::Initialized => {
                    let Some((request_line, n)) = parse_request_line(&data[consumed..])? else {
                        break;
                    };

                    self.request_line = request_line;
                    consumed += n;
                    self.state = ParserState::ParsingHeaders;
                }
                ParserState::ParsingHeaders => {
                    let (n, done) = self.headers.parse_one(&data[consumed..])?;
                    if n == 0 {
                        break;
                    }
                    consumed += n;

                    if done {
                        if self.headers.get("host").is_empty() {
                            return Err(ParserError::MissingHostHeader);
                        }
                        self.state = ParserState::ParsingBody;
                    }
                }
                ParserState::ParsingBody => {
                    let declared = match self.content_length()? {
                        Some(len) if len > 0 => len,
                        // Without a body, trailing bytes are left to the caller.
                        _ => {
                            self.state = ParserState::Done;
                            break;
                        }
                    };

                    let available = &data[consumed..];
                    let received = self.body.len() + available.len();
                    if received > declared {
                        return Err(ParserError::ContentLengthExceeded { declared, received });
                    }

                    self.body.extend_from_slice(available);
                    consumed += available.len();

                    if received == declared {
                        self.state = ParserState::Done;
                    }
                    break;
                }
                ParserState::Done => break,
            }
        }

        Ok(consumed)
    }

    fn content_length(&self) -> Result<Option<usize>, ParserError> {
        match self.headers.get("content-length") {
            "" => Ok(None),
            value => value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParserError::InvalidContentLength(value.to_string())),
        }
    }
}

/// Parses `METHOD SP TARGET SP HTTP/1.1 CRLF` from the front of `data`.
///
/// Returns `None` while the line terminator has not arrived yet.
fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParserError> {
    let Some(line_end) = find_crlf(data) else {
        return Ok(None);
    };

    // The target is opaque: non-UTF-8 bytes are kept lossily instead of failing the request.
    let line = String::from_utf8_lossy(&data[..line_end]);
    let parts: Vec<&str> = line.split(' ').collect();
    let &[method, target, version] = parts.as_slice() else {
        return Err(ParserError::MalformedRequestLine);
    };

    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ParserError::InvalidMethod(method.to_string()));
    }

    let http_version = match version.split('/').collect::<Vec<_>>().as_slice() {
        ["HTTP", "1.1"] => "1.1",
        _ => return Err(ParserError::UnsupportedHttpVersion(version.to_string())),
    };

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        http_version: http_version.to_string(),
    };

    Ok(Some((request_line, line_end + CRLF.len())))
}

/// Reads from `reader` until a complete request has been parsed.
///
/// The buffer starts at [`ParserConfig::initial_capacity`] bytes and grows by
/// [`ParserConfig::growth_increment`] whenever unconsumed bytes fill it. Bytes
/// left over once the request is done (e.g. data following a body-less request)
/// are discarded with the buffer.
pub async fn request_from_reader<R>(
    reader: &mut R,
    config: &ParserConfig,
) -> Result<Request, ReadError>
where
    R: Read + Unpin + ?Sized,
{
    let mut request = Request::new();
    let mut buf = vec![0; config.initial_capacity.max(1)];
    let mut buf_len = 0;

    while !request.is_done() {
        if buf_len == buf.len() {
            if buf.len() >= config.max_buffer_size {
                return Err(ReadError::RequestTooLarge(config.max_buffer_size));
            }
            let new_len = (buf.len() + config.growth_increment.max(1)).min(config.max_buffer_size);
            trace!(from = buf.len(), to = new_len, "growing read buffer");
            buf.resize(new_len, 0);
        }

        let n = match reader.read(&mut buf[buf_len..]).await {
            Ok(0) => return Err(ReadError::ConnectionClosed),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReadError::Io(e)),
        };
        buf_len += n;

        let consumed = request.parse(&buf[..buf_len])?;
        buf.copy_within(consumed..buf_len, 0);
        buf_len -= consumed;
    }

    debug!(
        method = request.method(),
        target = request.target(),
        body_len = request.body.len(),
        discarded = buf_len,
        "request parsed"
    );

    Ok(request)
}
