use std::fmt;

/// Numeric status code of a response.
///
/// Any code can be written; only the handful used by this server carry a
/// reason phrase, the rest are sent with an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn reason_phrase(self) -> &'static str {
        match self {
            StatusCode::OK => "OK",                                       // 200
            StatusCode::BAD_REQUEST => "Bad Request",                     // 400
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error", // 500
            _ => "",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
