//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and rejected engine requests so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use effect_core::{ApplyError, EffectError, ErrorSeverity};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("effect worker command channel closed")]
    CommandChannelClosed,

    #[error("effect worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("effect worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl EffectError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) => ErrorSeverity::Fatal,
            Self::WorkerJoin(_) => ErrorSeverity::Internal,
            Self::Apply(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Apply(inner) => inner.error_code(),
        }
    }
}
