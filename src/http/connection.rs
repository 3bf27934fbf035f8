use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{info, warn};

use crate::http::handler::Handler;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

pub struct Connection<S, H> {
    stream: S,
    handler: Arc<H>,
    buffer: Vec<u8>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: Handler,
{
    pub fn new(stream: S, handler: Arc<H>) -> Self {
        Self {
            stream,
            handler,
            buffer: Vec::with_capacity(4096),
            state: ConnectionState::Reading,
        }
    }

    /// Serves header blocks until the client goes away or the connection has
    /// to be dropped.
    ///
    /// A malformed or unsupported request closes the connection without a
    /// response and still returns `Ok`. An error means a response was cut
    /// off mid-body.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = self.handler.handle(req).await;

                    info!(
                        method = req.method.as_str(),
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request served"
                    );

                    let keep_alive = req.keep_alive();
                    let writer = ResponseWriter::new(response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads the next header block. `None` means the connection is over,
    /// either because the client closed it or because the request could
    /// not be served at all.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    // Remove consumed bytes
                    self.buffer.drain(..consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    warn!(error = %e, "Dropping connection on bad request");
                    return Ok(None);
                }
            }

            // Read more data
            let mut temp = [0u8; 1024];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
