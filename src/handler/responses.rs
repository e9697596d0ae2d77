use async_std::io::Write;
use std::time::SystemTime;

use crate::config::config;
use crate::http::headers::Headers;
use crate::http::response::{ResponseWriter, WriteError, default_headers};
use crate::http::status::StatusCode;

const BODY_200: &str = "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>
";

const BODY_400: &str = "<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>
";

const BODY_500: &str = "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>
";

/// [`default_headers`] plus `Date` and `Server`.
pub fn base_headers(content_len: usize) -> Headers {
    let mut h = default_headers(content_len);
    h.set("Date", &httpdate::fmt_http_date(SystemTime::now()));
    h.set("Server", &config().server_name);
    h
}

pub async fn ok<W: Write + Unpin>(w: &mut ResponseWriter<W>) -> Result<(), WriteError> {
    html(w, StatusCode::OK, BODY_200).await
}

pub async fn bad_request<W: Write + Unpin>(w: &mut ResponseWriter<W>) -> Result<(), WriteError> {
    html(w, StatusCode::BAD_REQUEST, BODY_400).await
}

pub async fn internal_server_error<W: Write + Unpin>(
    w: &mut ResponseWriter<W>,
) -> Result<(), WriteError> {
    html(w, StatusCode::INTERNAL_SERVER_ERROR, BODY_500).await
}

pub async fn plain<W: Write + Unpin>(
    w: &mut ResponseWriter<W>,
    status: StatusCode,
    msg: &str,
) -> Result<(), WriteError> {
    full(w, status, base_headers(msg.len()), msg.as_bytes()).await
}

/// Writes a complete, non-chunked response.
pub async fn full<W: Write + Unpin>(
    w: &mut ResponseWriter<W>,
    status: StatusCode,
    headers: Headers,
    body: &[u8],
) -> Result<(), WriteError> {
    w.write_status_line(status).await?;
    w.write_headers(&headers).await?;
    w.write_body(body).await?;
    Ok(())
}

async fn html<W: Write + Unpin>(
    w: &mut ResponseWriter<W>,
    status: StatusCode,
    body: &str,
) -> Result<(), WriteError> {
    let mut h = base_headers(body.len());
    h.replace("Content-Type", "text/html");
    full(w, status, h, body.as_bytes()).await
}
