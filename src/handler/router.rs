use async_std::io::Write;

use crate::handler::{responses, static_files, stream};
use crate::http::request::Request;
use crate::http::response::{ResponseWriter, WriteError};

pub async fn route<W>(w: &mut ResponseWriter<W>, req: &Request) -> Result<(), WriteError>
where
    W: Write + Unpin,
{
    let target = req.target();
    let path = target.split_once('?').map_or(target, |(path, _query)| path);

    match path {
        "/yourproblem" => responses::bad_request(w).await,
        "/myproblem" => responses::internal_server_error(w).await,
        "/video" => static_files::serve(w, "vim.mp4").await,
        _ => {
            if let Some(file) = path.strip_prefix("/static/") {
                static_files::serve(w, file).await
            } else if let Some(count) = path.strip_prefix("/stream/") {
                stream::serve(w, count).await
            } else {
                responses::ok(w).await
            }
        }
    }
}
