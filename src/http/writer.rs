use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Size of each read from a served file.
pub const CHUNK_SIZE: usize = 4096;

/// Failures while sending a response.
///
/// Once the head is on the wire the declared length cannot be taken back,
/// so every variant ends the connection.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("connection closed while writing")]
    Closed,

    #[error("failed to write response: {0}")]
    Write(#[from] io::Error),

    #[error("file ended after {sent} of {declared} declared bytes")]
    ShortRead { sent: u64, declared: u64 },

    #[error("failed to read file after {sent} bytes: {source}")]
    Read {
        sent: u64,
        #[source]
        source: io::Error,
    },
}

/// Serializes the status line and headers, including the blank line.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

pub struct ResponseWriter {
    head: Vec<u8>,
    written: usize,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            written: 0,
            body: response.body,
        }
    }

    /// Writes the head, then the body. File bodies go out in
    /// [`CHUNK_SIZE`] pieces until the declared length is reached.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<(), StreamError>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.head.len() {
            let n = stream.write(&self.head[self.written..]).await?;

            if n == 0 {
                return Err(StreamError::Closed);
            }

            self.written += n;
        }

        match &mut self.body {
            Body::Empty => {}
            Body::Full(bytes) => stream.write_all(&bytes[..]).await?,
            Body::File { file, len } => {
                let declared = *len;
                let mut chunk = BytesMut::zeroed(CHUNK_SIZE);
                let mut sent = 0u64;

                while sent < declared {
                    let want = (declared - sent).min(CHUNK_SIZE as u64) as usize;

                    match file.read_exact(&mut chunk[..want]).await {
                        Ok(_) => {}
                        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                            return Err(StreamError::ShortRead { sent, declared });
                        }
                        Err(source) => return Err(StreamError::Read { sent, source }),
                    }

                    stream.write_all(&chunk[..want]).await?;
                    sent += want as u64;
                }
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
