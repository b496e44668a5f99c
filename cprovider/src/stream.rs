//! Streaming delta contracts and in-memory stream utilities.
//!
//! ```rust
//! use cprovider::{BoxedDeltaStream, Delta, VecDeltaStream};
//!
//! let stream = VecDeltaStream::new(vec![Ok(Delta::Content("hello".into()))]);
//! let _boxed: BoxedDeltaStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::{ProviderError, StopReason};

/// A partial tool call keyed by its position in the response. The call id and
/// name may arrive only on the first fragment for an index; `arguments` is a
/// fragment of the argument text and must be concatenated in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolCallFragment {
    pub index: u32,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: String,
}

impl ToolCallFragment {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Content(String),
    Thinking(String),
    Reasoning(String),
    ToolCall(ToolCallFragment),
    Finished(StopReason),
}

/// Provider delta stream contract.
///
/// Invariants for consumers:
/// - Deltas are emitted in source order and the stream is finite.
/// - `Finished`, when present, arrives after all other deltas.
/// - Once the stream yields `None`, it must not yield additional items.
/// - The stream is not restartable.
pub trait DeltaStream: Stream<Item = Result<Delta, ProviderError>> + Send {}

impl<T> DeltaStream for T where T: Stream<Item = Result<Delta, ProviderError>> + Send {}

pub type BoxedDeltaStream<'a> = Pin<Box<dyn DeltaStream + 'a>>;

#[derive(Debug)]
pub struct VecDeltaStream {
    deltas: VecDeque<Result<Delta, ProviderError>>,
}

impl VecDeltaStream {
    pub fn new(deltas: Vec<Result<Delta, ProviderError>>) -> Self {
        Self {
            deltas: deltas.into(),
        }
    }
}

impl Stream for VecDeltaStream {
    type Item = Result<Delta, ProviderError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Delta, ProviderError>>> {
        Poll::Ready(self.deltas.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn vec_delta_stream_yields_in_order_then_ends() {
        let mut stream = VecDeltaStream::new(vec![
            Ok(Delta::Content("one".into())),
            Ok(Delta::Content("two".into())),
            Ok(Delta::Finished(StopReason::EndTurn)),
        ]);

        assert_eq!(stream.next().await, Some(Ok(Delta::Content("one".into()))));
        assert_eq!(stream.next().await, Some(Ok(Delta::Content("two".into()))));
        assert_eq!(
            stream.next().await,
            Some(Ok(Delta::Finished(StopReason::EndTurn)))
        );
        assert_eq!(stream.next().await, None);
    }
}
