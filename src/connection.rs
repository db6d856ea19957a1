//! A framed connection to an editor.
//!
//! [`Connection`] runs a [`FrameReader`] on a background task and forwards
//! every typed message to its owner. Dropped frames are skipped; the first
//! error stops the task and is reported by [`Connection::join`].

use crate::error::{LspError, ResponseError, Result};
use crate::registry::MessageRegistry;
use crate::transport::{FrameReader, FrameWriter, ReaderOptions};
use crate::types::{
    IncomingMessage, MessageType, NotificationMessage, RequestId, ResponseMessage, ShowLogMessage,
};
use futures::Stream;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// A connection with a background reader and a shared writer.
pub struct Connection<W> {
    /// Writes are serialized so frames from concurrent senders never interleave.
    writer: Arc<Mutex<FrameWriter<W>>>,
    /// Typed messages from the read loop.
    message_receiver: mpsc::UnboundedReceiver<IncomingMessage>,
    /// The read loop; yields its terminal error, if any.
    reader_task: JoinHandle<Result<()>>,
}

impl<W> Connection<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Start reading from `reader` with default options.
    pub fn new<R>(reader: R, writer: W, registry: Arc<MessageRegistry>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        Self::with_options(reader, writer, registry, ReaderOptions::default())
    }

    pub fn with_options<R>(
        reader: R,
        writer: W,
        registry: Arc<MessageRegistry>,
        options: ReaderOptions,
    ) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let frame_reader = FrameReader::with_options(reader, registry, options);
        let (message_sender, message_receiver) = mpsc::unbounded_channel();
        let reader_task = tokio::spawn(read_loop(frame_reader, message_sender));

        Self {
            writer: Arc::new(Mutex::new(FrameWriter::new(writer))),
            message_receiver,
            reader_task,
        }
    }

    /// Receive the next typed message. `None` once the read loop has ended.
    pub async fn receive_message(&mut self) -> Option<IncomingMessage> {
        self.message_receiver.recv().await
    }

    /// The incoming messages as a stream.
    pub fn incoming(&mut self) -> impl Stream<Item = IncomingMessage> + '_ {
        futures::stream::poll_fn(move |cx| self.message_receiver.poll_recv(cx))
    }

    /// Answer a request.
    pub async fn send_response<T: Serialize>(&self, id: RequestId, result: T) -> Result<()> {
        self.write(&ResponseMessage::success(id, result)).await
    }

    /// Answer a request with an error.
    pub async fn send_error(&self, id: Option<RequestId>, error: ResponseError) -> Result<()> {
        let response: ResponseMessage = ResponseMessage::error(id, error);
        self.write(&response).await
    }

    /// Send a notification (no response expected).
    pub async fn send_notification<P: Serialize>(
        &self,
        method: impl Into<String>,
        params: Option<P>,
    ) -> Result<()> {
        let notification = match params {
            Some(params) => NotificationMessage::with_params(method, params),
            None => NotificationMessage::new(method),
        };
        self.write(&notification).await
    }

    /// Append a line to the client's output log.
    pub async fn log_message(&self, kind: MessageType, message: impl Into<String>) -> Result<()> {
        self.write(&ShowLogMessage::log(kind, message).into_notification())
            .await
    }

    /// Show a message to the user.
    pub async fn show_message(&self, kind: MessageType, message: impl Into<String>) -> Result<()> {
        self.write(&ShowLogMessage::show(kind, message).into_notification())
            .await
    }

    /// Wait for the read loop to finish.
    ///
    /// Returns `Ok(())` when the peer closed the stream and the loop's error
    /// otherwise. Messages still queued are discarded.
    pub async fn join(self) -> Result<()> {
        drop(self.message_receiver);
        self.reader_task
            .await
            .map_err(|e| LspError::Connection(format!("read loop failed: {}", e)))?
    }

    /// Stop the read loop without waiting for the peer.
    pub fn abort(&self) {
        self.reader_task.abort();
    }

    async fn write<T: Serialize>(&self, message: &T) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_message(message).await
    }
}

async fn read_loop<R: AsyncRead + Unpin>(
    mut frame_reader: FrameReader<R>,
    message_sender: mpsc::UnboundedSender<IncomingMessage>,
) -> Result<()> {
    loop {
        match frame_reader.read_message().await {
            Ok(Some(message)) => {
                if message_sender.send(message).is_err() {
                    log::debug!("Message receiver dropped, stopping read loop");
                    return Ok(());
                }
            }
            Ok(None) => continue,
            Err(e) if e.is_eof() => {
                log::info!("Peer closed the stream");
                return Ok(());
            }
            Err(e) => {
                log::error!("Failed to read message: {}", e);
                return Err(e);
            }
        }
    }
}
