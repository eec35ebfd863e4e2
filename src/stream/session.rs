//! A single-shot streaming connection.
//!
//! ```text
//! Idle --connect()--> Connecting --ok--> Streaming --EOF / I/O error--> Terminated
//!                          \--error--> Terminated
//! ```
//!
//! Once streaming, a reader task frames the body and hands each frame to the
//! frame channel. The terminal error is reported once on the done channel,
//! after every frame read before it. There is no reconnection.

use std::sync::Arc;

use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::framer::LineFramer;
use crate::error::{FlowdockError, FlowdockResult};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Lifecycle of a [`StreamSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Streaming,
    Terminated,
}

/// One persistent connection to the streaming API.
pub struct StreamSession {
    http: Arc<dyn HttpClient>,
    url: String,
    headers: Headers,
    state_tx: Arc<watch::Sender<SessionState>>,
    state_rx: watch::Receiver<SessionState>,
    reader: Option<JoinHandle<()>>,
}

impl StreamSession {
    /// Create an idle session. Nothing is sent until [`connect`](Self::connect).
    pub fn new(http: Arc<dyn HttpClient>, url: impl Into<String>, headers: Headers) -> Self {
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        Self {
            http,
            url: url.into(),
            headers,
            state_tx: Arc::new(state_tx),
            state_rx,
            reader: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    /// Subscribe to state transitions.
    pub fn state_receiver(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Open the connection and start the reader task.
    ///
    /// Returns once the server has accepted the request. Frames are then
    /// sent to `frames` in wire order; when the body ends or fails, the
    /// terminal error is sent on `done`. A failure to connect is returned
    /// here instead and nothing is sent on `done`.
    pub async fn connect(
        &mut self,
        frames: mpsc::Sender<Bytes>,
        done: oneshot::Sender<FlowdockError>,
    ) -> FlowdockResult<()> {
        if self.state() != SessionState::Idle {
            return Err(FlowdockError::SessionNotIdle);
        }

        self.transition(SessionState::Connecting);
        info!("Connecting to stream at {}", self.url);

        let body = match self.http.get_stream(&self.url, &self.headers).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Stream connection failed: {}", e);
                self.transition(SessionState::Terminated);
                return Err(e.into());
            }
        };

        self.transition(SessionState::Streaming);
        self.reader = Some(tokio::spawn(read_frames(
            body,
            frames,
            done,
            self.state_tx.clone(),
        )));
        Ok(())
    }

    fn transition(&self, next: SessionState) {
        debug!("Stream session {:?} -> {:?}", self.state(), next);
        self.state_tx.send_replace(next);
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

async fn read_frames(
    mut body: ByteStream,
    frames: mpsc::Sender<Bytes>,
    done: oneshot::Sender<FlowdockError>,
    state: Arc<watch::Sender<SessionState>>,
) {
    let mut framer = LineFramer::new();

    let terminal = loop {
        match body.next().await {
            Some(Ok(chunk)) => {
                for frame in framer.push(&chunk) {
                    // Blocks while the channel is full
                    if frames.send(frame).await.is_err() {
                        debug!("Frame receiver dropped, stopping stream reader");
                        state.send_replace(SessionState::Terminated);
                        return;
                    }
                }
            }
            Some(Err(e)) => break e,
            None => {
                let dropped = framer.finish();
                if dropped > 0 {
                    debug!("Dropped {} bytes of unterminated frame at end of stream", dropped);
                }
                break HttpError::Closed;
            }
        }
    };

    error!("Stream terminated: {}", terminal);
    state.send_replace(SessionState::Terminated);
    let _ = done.send(FlowdockError::Transport(terminal));
}
