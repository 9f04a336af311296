//! Error infrastructure for effect-core.
//!
//! The engine is defensive rather than error-signalling: expiring an absent
//! instance, expiring twice, or computing a non-positive duration are all
//! silent no-ops. Errors exist only for requests the boundary must reject.

use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    Recoverable,

    /// Invalid input; retrying unchanged will fail again.
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    Internal,

    /// Engine state can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all effect-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EffectError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejection of an `apply` request at the engine boundary.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyError {
    #[error("caster {0} not found or has no skills")]
    CasterNotFound(EntityId),

    #[error("target {0} cannot receive effects")]
    TargetNotAffectable(EntityId),

    /// Only NaN and infinities are rejected. Any finite strength is accepted,
    /// and resistance deltas beyond the `i32` range saturate.
    #[error("strength factor {0} is not finite")]
    InvalidStrength(f64),
}

impl EffectError for ApplyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CasterNotFound(_) => "APPLY_CASTER_NOT_FOUND",
            Self::TargetNotAffectable(_) => "APPLY_TARGET_NOT_AFFECTABLE",
            Self::InvalidStrength(_) => "APPLY_INVALID_STRENGTH",
        }
    }
}
