//! Demo request handlers.
//!
//! A handler receives the fully parsed [`Request`] together with a
//! [`ResponseWriter`] bound to the connection, and is solely responsible for
//! picking the status code, the headers and the body framing.

mod responses;
mod router;
mod static_files;
mod stream;

use async_std::io::Write;

use crate::http::parser::ReadError;
use crate::http::request::Request;
use crate::http::response::{ResponseWriter, WriteError, default_headers};
use crate::http::status::StatusCode;

pub async fn handle_request<W>(w: &mut ResponseWriter<W>, req: &Request) -> Result<(), WriteError>
where
    W: Write + Unpin,
{
    router::route(w, req).await
}

/// Best-effort `400` carrying the parse failure as a plain-text body.
pub async fn handle_error<W>(w: &mut ResponseWriter<W>, err: &ReadError) -> Result<(), WriteError>
where
    W: Write + Unpin,
{
    let msg = err.to_string();

    w.write_status_line(StatusCode::BAD_REQUEST).await?;
    w.write_headers(&default_headers(msg.len())).await?;
    w.write_body(msg.as_bytes()).await?;
    Ok(())
}
