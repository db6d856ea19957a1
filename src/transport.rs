//! Base protocol framing.
//!
//! Every message on the wire is a header block followed by a JSON body:
//!
//! ```text
//! Content-Length: <n>\r\n
//! \r\n
//! <n bytes of UTF-8 JSON>
//! ```
//!
//! [`FrameReader`] takes frames off a byte stream and hands the decoded body to
//! a [`MessageRegistry`]. [`FrameWriter`] puts frames on a byte stream.

use crate::error::{LspError, Result};
use crate::registry::MessageRegistry;
use crate::types::IncomingMessage;
use serde::Serialize;
use serde_json::Value;
use std::num::IntErrorKind;
use std::sync::Arc;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

/// The only header this crate interprets. Matched case-sensitively.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Header lines allowed before the blank line, the blank line included.
pub const DEFAULT_MAX_HEADER_LINES: usize = 10;

/// Bytes allowed in one header line, line ending included.
pub const DEFAULT_MAX_HEADER_LINE_LENGTH: usize = 8 * 1024;

/// Largest body a frame may announce.
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 64 * 1024 * 1024;

/// Limits applied while reading frames.
///
/// Every limit is a fatal error when exceeded: the peer decides how much the
/// reader buffers, so an oversized frame cannot be skipped safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Header lines read without finding the blank line before the stream is
    /// considered out of sync.
    pub max_header_lines: usize,
    /// Longest header line, in bytes. Must be at least 1.
    pub max_header_line_length: usize,
    /// Largest accepted `Content-Length` value.
    pub max_content_length: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_header_lines: DEFAULT_MAX_HEADER_LINES,
            max_header_line_length: DEFAULT_MAX_HEADER_LINE_LENGTH,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

/// Reads frames one at a time and resolves them to typed messages.
pub struct FrameReader<R> {
    reader: BufReader<R>,
    registry: Arc<MessageRegistry>,
    options: ReaderOptions,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader with default options.
    pub fn new(reader: R, registry: Arc<MessageRegistry>) -> Self {
        Self::with_options(reader, registry, ReaderOptions::default())
    }

    pub fn with_options(reader: R, registry: Arc<MessageRegistry>, options: ReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            registry,
            options,
        }
    }

    pub fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    /// Read the next frame and dispatch it.
    ///
    /// `Ok(None)` means the frame was dropped and the next read may proceed.
    /// Any error means the stream should not be read any further.
    pub async fn read_message(&mut self) -> Result<Option<IncomingMessage>> {
        match self.read_frame().await? {
            Some(document) => self.registry.dispatch(document),
            None => Ok(None),
        }
    }

    /// Read the next frame and parse its body, without dispatching it.
    pub async fn read_frame(&mut self) -> Result<Option<Value>> {
        let Some(content_length) = self.read_headers().await? else {
            log::error!("parsing command failed (no Content-Length header)");
            return Ok(None);
        };

        let mut body = Vec::with_capacity(content_length);
        (&mut self.reader)
            .take(content_length as u64)
            .read_to_end(&mut body)
            .await?;
        if body.len() < content_length {
            return Err(LspError::TruncatedFrame(format!(
                "expected {} body bytes, got {}",
                content_length,
                body.len()
            )));
        }
        log::trace!("Read frame of {} bytes", content_length);

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(LspError::MalformedBody)
    }

    /// Read header lines through the blank line, returning the content length
    /// if one was given.
    ///
    /// A stream that ends before the first byte of a frame is a plain EOF;
    /// one that ends later is a truncated frame.
    async fn read_headers(&mut self) -> Result<Option<usize>> {
        let mut content_length = None;
        let mut line = Vec::new();
        let line_limit = self.options.max_header_line_length;

        for index in 0..self.options.max_header_lines {
            line.clear();
            let read = (&mut self.reader)
                .take(line_limit as u64)
                .read_until(b'\n', &mut line)
                .await?;

            if read == 0 && index == 0 {
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
            if !line.ends_with(b"\n") {
                if read >= line_limit {
                    return Err(LspError::HeaderLineTooLong(line_limit));
                }
                return Err(LspError::TruncatedFrame(format!(
                    "stream ended after {} complete header line(s)",
                    index
                )));
            }

            let header = trim_line_ending(&line);
            if header.is_empty() {
                return Ok(content_length);
            }

            let Some(value) = content_length_value(header) else {
                log::trace!("Ignoring header {:?}", String::from_utf8_lossy(header));
                continue;
            };
            match value.parse::<usize>() {
                Ok(length) if length <= self.options.max_content_length => {
                    content_length = Some(length)
                }
                Ok(_) => return Err(self.content_too_large(value)),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                    return Err(self.content_too_large(value))
                }
                Err(_) => log::warn!("Ignoring invalid Content-Length {:?}", value),
            }
        }

        Err(LspError::HeaderOverflow(self.options.max_header_lines))
    }

    fn content_too_large(&self, value: String) -> LspError {
        LspError::ContentTooLarge {
            value,
            limit: self.options.max_content_length,
        }
    }
}

/// Writes frames.
pub struct FrameWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serialize a message and write it as one frame.
    pub async fn write_message<T: Serialize + ?Sized>(&mut self, message: &T) -> Result<()> {
        let body = serde_json::to_vec(message)?;
        self.write_frame(&body).await
    }

    /// Write an already-serialized body as one frame.
    pub async fn write_frame(&mut self, body: &[u8]) -> Result<()> {
        self.writer.write_all(&encode_frame(body)).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Prefix a body with its header block.
pub fn encode_frame(body: &[u8]) -> Vec<u8> {
    let header = format!("{}: {}\r\n\r\n", CONTENT_LENGTH, body.len());
    let mut frame = Vec::with_capacity(header.len() + body.len());
    frame.extend_from_slice(header.as_bytes());
    frame.extend_from_slice(body);
    frame
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// The trimmed value of a Content-Length header, or `None` for other headers.
fn content_length_value(line: &[u8]) -> Option<String> {
    let rest = line.strip_prefix(CONTENT_LENGTH.as_bytes())?;
    let rest = String::from_utf8_lossy(rest);
    let value = rest
        .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
        .trim_end();
    Some(value.to_string())
}
