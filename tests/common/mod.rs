#![allow(dead_code)]

use async_std::io::{self, Read, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use httpfromtcp::http::parser::ParserConfig;

/// Tiny buffers so that every test exercises buffer growth.
pub fn small_buffers() -> ParserConfig {
    ParserConfig {
        initial_capacity: 8,
        growth_increment: 8,
        max_buffer_size: 1024,
    }
}

/// Hands out at most `per_read` bytes per read, then reports end of stream.
pub struct ChunkReader {
    data: Vec<u8>,
    per_read: usize,
    pos: usize,
}

impl ChunkReader {
    pub fn new(data: impl AsRef<[u8]>, per_read: usize) -> Self {
        Self {
            data: data.as_ref().to_vec(),
            per_read,
            pos: 0,
        }
    }
}

impl Read for ChunkReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let end = (this.pos + this.per_read).min(this.data.len());
        let n = (end - this.pos).min(buf.len());
        buf[..n].copy_from_slice(&this.data[this.pos..this.pos + n]);
        this.pos += n;
        Poll::Ready(Ok(n))
    }
}

/// In-memory connection: reads come from a [`ChunkReader`], writes are recorded.
pub struct MockStream {
    reader: ChunkReader,
    pub written: Vec<u8>,
}

impl MockStream {
    pub fn new(request: impl AsRef<[u8]>, per_read: usize) -> Self {
        Self {
            reader: ChunkReader::new(request, per_read),
            written: Vec::new(),
        }
    }

    pub fn written_str(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl Read for MockStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().reader).poll_read(cx, buf)
    }
}

impl Write for MockStream {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        self.get_mut().written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Sink whose every write fails.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
