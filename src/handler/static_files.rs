use async_std::io::ErrorKind::NotFound;
use async_std::io::Write;
use tracing::debug;

use crate::config::config;
use crate::handler::responses;
use crate::http::response::{ResponseWriter, WriteError};
use crate::http::status::StatusCode;

/// Serves `path`, relative to the configured static root.
pub async fn serve<W>(w: &mut ResponseWriter<W>, path: &str) -> Result<(), WriteError>
where
    W: Write + Unpin,
{
    let Some(safe_path) = sanitize_path(path) else {
        return responses::bad_request(w).await;
    };

    let full_path = format!("{}/{}", config().static_files_root, safe_path);
    debug!("Serving static file: {}", full_path);

    let body = match async_std::fs::read(&full_path).await {
        Ok(body) => body,
        Err(err) if err.kind() == NotFound => {
            return responses::plain(w, StatusCode::NOT_FOUND, "not found").await;
        }
        Err(err) => {
            return responses::plain(w, StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()).await;
        }
    };

    let mut h = responses::base_headers(body.len());
    h.replace("Content-Type", guess_mime(safe_path));
    responses::full(w, StatusCode::OK, h, &body).await
}

/// Strips leading slashes and refuses anything climbing out of the root.
fn sanitize_path(path: &str) -> Option<&str> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(path)
}

fn guess_mime(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("htm") | Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}
