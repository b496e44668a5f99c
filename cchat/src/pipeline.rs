//! Bounded, ordered event pipeline with cooperative cancellation.
//!
//! One pipeline instance carries the events of a single turn. The channel is
//! bounded, so a slow consumer suspends the producing loop instead of growing
//! a buffer. Dropping the receiver marks the shared cancel flag; the next
//! send observes it and fails with [`PipelineClosed`], which the loop treats
//! as cancellation.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_core::Stream;
use tokio::sync::mpsc;

use crate::TurnEvent;

/// Shared cancellation flag. Cloning shares the flag, not a copy.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineClosed;

impl Display for PipelineClosed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("event pipeline closed by consumer")
    }
}

impl Error for PipelineClosed {}

/// Creates the sender/receiver pair for one turn. `capacity` is clamped to
/// at least 1.
pub fn turn_event_channel(capacity: usize) -> (TurnEventSender, TurnEventReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let cancel = CancelToken::new();

    (
        TurnEventSender {
            tx,
            cancel: cancel.clone(),
        },
        TurnEventReceiver { rx, cancel },
    )
}

#[derive(Debug, Clone)]
pub struct TurnEventSender {
    tx: mpsc::Sender<TurnEvent>,
    cancel: CancelToken,
}

impl TurnEventSender {
    /// Sends an event in order, suspending under backpressure. Fails once
    /// the turn is cancelled or the receiver is gone.
    pub async fn emit(&self, event: TurnEvent) -> Result<(), PipelineClosed> {
        if self.cancel.is_cancelled() {
            return Err(PipelineClosed);
        }

        self.tx.send(event).await.map_err(|_| {
            self.cancel.cancel();
            PipelineClosed
        })
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
pub struct TurnEventReceiver {
    rx: mpsc::Receiver<TurnEvent>,
    cancel: CancelToken,
}

impl TurnEventReceiver {
    /// Receives the next event; `None` once the sender side is dropped and
    /// the buffer is drained.
    pub async fn recv(&mut self) -> Option<TurnEvent> {
        self.rx.recv().await
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn into_stream(mut self) -> impl Stream<Item = TurnEvent> + Send {
        async_stream::stream! {
            while let Some(event) = self.recv().await {
                yield event;
            }
        }
    }
}

impl Drop for TurnEventReceiver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn events_arrive_in_production_order() {
        let (sender, mut receiver) = turn_event_channel(8);

        sender.emit(TurnEvent::content("one")).await.unwrap();
        sender.emit(TurnEvent::content("two")).await.unwrap();
        sender.emit(TurnEvent::Done).await.unwrap();
        drop(sender);

        assert_eq!(receiver.recv().await, Some(TurnEvent::content("one")));
        assert_eq!(receiver.recv().await, Some(TurnEvent::content("two")));
        assert_eq!(receiver.recv().await, Some(TurnEvent::Done));
        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test]
    async fn send_suspends_until_the_consumer_drains() {
        let (sender, mut receiver) = turn_event_channel(1);

        let producer = tokio::spawn(async move {
            for index in 0..3 {
                sender
                    .emit(TurnEvent::content(format!("event {index}")))
                    .await
                    .unwrap();
            }
        });

        let mut received = Vec::new();
        while let Some(event) = receiver.recv().await {
            received.push(event);
        }

        producer.await.unwrap();
        assert_eq!(
            received,
            vec![
                TurnEvent::content("event 0"),
                TurnEvent::content("event 1"),
                TurnEvent::content("event 2"),
            ]
        );
    }

    #[tokio::test]
    async fn dropping_the_receiver_cancels_the_pipeline() {
        let (sender, receiver) = turn_event_channel(4);
        let cancel = sender.cancel_token();
        assert!(!cancel.is_cancelled());

        drop(receiver);

        let error = sender.emit(TurnEvent::content("late")).await.unwrap_err();
        assert_eq!(error, PipelineClosed);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn explicit_cancel_blocks_further_sends() {
        let (sender, _receiver) = turn_event_channel(4);

        sender.cancel_token().cancel();

        let error = sender.emit(TurnEvent::content("late")).await.unwrap_err();
        assert_eq!(error, PipelineClosed);
    }

    #[tokio::test]
    async fn into_stream_yields_buffered_events() {
        let (sender, receiver) = turn_event_channel(4);
        sender.emit(TurnEvent::content("hi")).await.unwrap();
        sender.emit(TurnEvent::Done).await.unwrap();
        drop(sender);

        let events: Vec<TurnEvent> = receiver.into_stream().collect().await;
        assert_eq!(events, vec![TurnEvent::content("hi"), TurnEvent::Done]);
    }
}
