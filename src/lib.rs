//! HTTP/1.1 spoken directly over a TCP byte stream.
//!
//! - [`http::headers`]: case-insensitive header collection and its line parser
//! - [`http::parser`]: incremental request parser fed by partial reads
//! - [`http::response`]: response writer enforcing the order of writes
//! - [`net::server`]: one task per connection, one request per connection
//! - [`handler`]: demo routes

pub mod config;
pub mod handler;
pub mod http;
pub mod net;
