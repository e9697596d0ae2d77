pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;

/// The only protocol version spoken on either side of the connection.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Line terminator of the request line, status line and every header line.
pub const CRLF: &[u8] = b"\r\n";

/// Returns the offset of the first CRLF in `data`, if any.
pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(CRLF.len()).position(|w| w == CRLF)
}
