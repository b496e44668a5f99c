//! Conversation orchestration: sessions, the tool-calling turn loop, and the
//! bounded event pipeline.

mod error;
mod events;
mod pipeline;
mod session;
mod turn;

pub mod prelude {
    pub use crate::{
        CancelToken, InMemorySessionStore, NoopTurnHooks, PipelineClosed, Session, SessionStore,
        TurnError, TurnErrorKind, TurnEvent, TurnEventReceiver, TurnEventSender, TurnHooks,
        TurnLoop, TurnOutcome, TurnPolicy, TurnState, turn_event_channel,
    };
    pub use ccommon::{MetadataMap, SessionId, TraceId};
}

pub use error::{TurnError, TurnErrorKind};
pub use events::TurnEvent;
pub use pipeline::{
    CancelToken, PipelineClosed, TurnEventReceiver, TurnEventSender, turn_event_channel,
};
pub use session::{InMemorySessionStore, Session, SessionStore, StoreFuture};
pub use turn::{
    NoopTurnHooks, TurnHooks, TurnLoop, TurnOutcome, TurnPolicy, TurnState,
};
