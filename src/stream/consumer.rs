//! Turns raw frames into decoded events for the caller's sink.

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::client::EventSink;
use crate::error::FlowdockError;
use crate::events::decode_event;

/// Decode each frame and forward it, then forward the terminal error.
///
/// Frames always win over the done signal, so every frame read before the
/// stream ended reaches the sink ahead of the terminal error. Returning
/// drops the sink, which closes it for the caller.
pub(crate) async fn forward_events(
    mut frames: mpsc::Receiver<Bytes>,
    mut done: oneshot::Receiver<FlowdockError>,
    sink: EventSink,
) {
    loop {
        tokio::select! {
            biased;

            frame = frames.recv() => match frame {
                Some(frame) => {
                    if !forward_frame(&sink, &frame).await {
                        return;
                    }
                }
                None => {
                    // Reader is gone; the done signal is either sent or lost
                    if let Ok(terminal) = (&mut done).await {
                        let _ = sink.send(Err(terminal)).await;
                    }
                    return;
                }
            },

            terminal = &mut done => {
                while let Ok(frame) = frames.try_recv() {
                    if !forward_frame(&sink, &frame).await {
                        return;
                    }
                }
                if let Ok(terminal) = terminal {
                    let _ = sink.send(Err(terminal)).await;
                }
                return;
            }
        }
    }
}

/// Returns false once the sink has been closed by the caller.
async fn forward_frame(sink: &EventSink, frame: &[u8]) -> bool {
    let item = decode_event(frame).map_err(|e| {
        warn!("Skipping undecodable frame: {}", e);
        FlowdockError::from(e)
    });

    if sink.send(item).await.is_err() {
        debug!("Event sink closed, stopping consumer");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::events::Event;
    use crate::traits::HttpError;

    #[tokio::test]
    async fn test_frames_precede_terminal_error() {
        let (frame_tx, frame_rx) = mpsc::channel(8);
        let (done_tx, done_rx) = oneshot::channel();
        let (sink, mut events) = mpsc::channel(8);

        frame_tx
            .send(Bytes::from(r#"{"event":"message","content":"one"}"#))
            .await
            .unwrap();
        frame_tx
            .send(Bytes::from(r#"{"event":"message","content":"two"}"#))
            .await
            .unwrap();
        done_tx
            .send(FlowdockError::Transport(HttpError::Closed))
            .unwrap();

        forward_events(frame_rx, done_rx, sink).await;

        for expected in ["one", "two"] {
            match events.recv().await {
                Some(Ok(Event::Message(m))) => assert_eq!(m.content, expected),
                other => panic!("unexpected item: {:?}", other),
            }
        }
        match events.recv().await {
            Some(Err(e)) => assert_eq!(e.kind(), ErrorKind::Transport),
            other => panic!("unexpected item: {:?}", other),
        }
        assert!(events.recv().await.is_none());
        drop(frame_tx);
    }

    #[tokio::test]
    async fn test_decode_errors_keep_their_position() {
        let (frame_tx, frame_rx) = mpsc::channel(8);
        let (done_tx, done_rx) = oneshot::channel();
        let (sink, mut events) = mpsc::channel(8);

        frame_tx
            .send(Bytes::from(r#"{"event":"message","content":"a"}"#))
            .await
            .unwrap();
        frame_tx.send(Bytes::from("not json")).await.unwrap();
        frame_tx
            .send(Bytes::from(r#"{"event":"message","content":"b"}"#))
            .await
            .unwrap();
        drop(frame_tx);
        done_tx
            .send(FlowdockError::Transport(HttpError::Closed))
            .unwrap();

        forward_events(frame_rx, done_rx, sink).await;

        assert!(matches!(events.recv().await, Some(Ok(Event::Message(_)))));
        match events.recv().await {
            Some(Err(e)) => assert_eq!(e.kind(), ErrorKind::MalformedEvent),
            other => panic!("unexpected item: {:?}", other),
        }
        assert!(matches!(events.recv().await, Some(Ok(Event::Message(_)))));
        assert!(matches!(events.recv().await, Some(Err(_))));
        assert!(events.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_stops_when_sink_closed() {
        let (frame_tx, frame_rx) = mpsc::channel(8);
        let (_done_tx, done_rx) = oneshot::channel();
        let (sink, events) = mpsc::channel(8);
        drop(events);

        frame_tx
            .send(Bytes::from(r#"{"event":"typing"}"#))
            .await
            .unwrap();

        // Returns instead of waiting for the done signal
        forward_events(frame_rx, done_rx, sink).await;
    }
}
