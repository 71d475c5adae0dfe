//! Line reader
//!
//! Splits an arbitrary byte stream into newline-delimited lines. Input may
//! arrive fragmented however the transport likes; partial lines are buffered
//! across reads and delivered strictly in arrival order.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Lazy, non-restartable line source over any async reader
pub struct LineReader<R> {
    reader: R,
    buf: BytesMut,
    eof: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
            eof: false,
        }
    }

    /// Next line with its terminator stripped, or `None` at end of input
    ///
    /// A trailing unterminated line at EOF is yielded as a final line.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                return Ok(Some(self.take_line(pos)));
            }

            if self.eof {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                // Unterminated tail
                let pos = self.buf.len();
                let tail = String::from_utf8_lossy(&self.buf[..pos]).into_owned();
                self.buf.clear();
                return Ok(Some(tail));
            }

            let n = self.reader.read_buf(&mut self.buf).await?;
            if n == 0 {
                self.eof = true;
            }
        }
    }

    fn take_line(&mut self, newline_pos: usize) -> String {
        let mut end = newline_pos;
        if end > 0 && self.buf[end - 1] == b'\r' {
            end -= 1;
        }
        let line = String::from_utf8_lossy(&self.buf[..end]).into_owned();
        self.buf.advance(newline_pos + 1);
        line
    }
}
