use async_std::io::Write;
use flate2::Crc;

use crate::config::config;
use crate::handler::responses;
use crate::http::headers::Headers;
use crate::http::response::{ResponseWriter, WriteError};
use crate::http::status::StatusCode;

const MAX_LINES: usize = 100;

pub const CRC_TRAILER: &str = "x-content-crc32";
pub const LENGTH_TRAILER: &str = "x-content-length";

/// Streams `count` JSON lines as a chunked body, one chunk per line, then
/// reports the CRC-32 and length of everything sent as trailers.
pub async fn serve<W>(w: &mut ResponseWriter<W>, count: &str) -> Result<(), WriteError>
where
    W: Write + Unpin,
{
    let count = match count.parse::<usize>() {
        Ok(n) if n <= MAX_LINES => n,
        _ => return responses::bad_request(w).await,
    };

    let mut h = responses::base_headers(0);
    h.delete("Content-Length");
    h.set("Transfer-Encoding", "chunked");
    h.replace("Content-Type", "application/json");
    h.set("Trailer", CRC_TRAILER);
    h.set("Trailer", LENGTH_TRAILER);

    w.write_status_line(StatusCode::OK).await?;
    w.write_headers(&h).await?;

    let mut crc = Crc::new();
    for id in 0..count {
        let line = format!("{{\"id\":{id},\"server\":\"{}\"}}\n", config().server_name);
        w.write_chunked_body(line.as_bytes()).await?;
        crc.update(line.as_bytes());
    }
    w.write_chunked_body_done().await?;

    let mut trailers = Headers::new();
    trailers.set(CRC_TRAILER, &format!("{:08x}", crc.sum()));
    trailers.set(LENGTH_TRAILER, &crc.amount().to_string());
    w.write_trailers(&trailers).await
}
