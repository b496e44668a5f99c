//! Turn-level errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use cprovider::ProviderError;
use ctooling::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnErrorKind {
    InvalidRequest,
    Provider,
    Tooling,
    Store,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnError {
    pub kind: TurnErrorKind,
    pub message: String,
}

impl TurnError {
    pub fn new(kind: TurnErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(TurnErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(TurnErrorKind::Provider, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(TurnErrorKind::Tooling, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(TurnErrorKind::Store, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(TurnErrorKind::Cancelled, message)
    }
}

impl Display for TurnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for TurnError {}

impl From<ProviderError> for TurnError {
    fn from(value: ProviderError) -> Self {
        TurnError::provider(value.to_string())
    }
}

impl From<ToolError> for TurnError {
    fn from(value: ToolError) -> Self {
        TurnError::tooling(value.to_string())
    }
}
