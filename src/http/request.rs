use crate::http::headers::Headers;

/// Phases of request parsing, always traversed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParserState {
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}

/// `METHOD SP TARGET SP HTTP/1.1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    /// Origin-form path and query, kept opaque.
    pub target: String,
    /// Always `"1.1"` once parsed.
    pub http_version: String,
}

/// A request under construction.
///
/// Filled in by [`Request::parse`] as bytes arrive; once
/// [`is_done`](Request::is_done) reports true it is handed to the handler and
/// no longer mutated.
#[derive(Debug)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub(crate) state: ParserState,
}

impl Request {
    pub fn new() -> Self {
        Self {
            request_line: RequestLine::default(),
            headers: Headers::new(),
            body: Vec::new(),
            state: ParserState::Initialized,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    pub fn method(&self) -> &str {
        &self.request_line.method
    }

    pub fn target(&self) -> &str {
        &self.request_line.target
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
