//! Closed error taxonomy shared by repositories and services.
//!
//! # Responsibility
//! - Name the small set of outcome kinds callers branch on.
//! - Own the kind -> HTTP status mapping so outer layers stay thin.
//!
//! # Invariants
//! - Kinds are assigned once, at the repository boundary.
//! - Services may widen a kind but never re-derive it from storage signals.

use std::fmt::{Display, Formatter};

/// Classification attached to every failed repository/service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Target record does not exist.
    NotFound,
    /// Unique key collides with another live record.
    AlreadyExists,
    /// Referenced record in another table is absent.
    ForeignKeyMissing,
    /// Record failed model validation, or a miss widened by entity policy.
    Invalid,
    /// Any persistence failure that is not classified above.
    StorageFailure,
}

impl ErrorKind {
    /// Stable snake_case code for logs and response bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::ForeignKeyMissing => "foreign_key_missing",
            Self::Invalid => "invalid",
            Self::StorageFailure => "storage_failure",
        }
    }

    /// HTTP status an API layer should answer with for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::AlreadyExists => 409,
            Self::ForeignKeyMissing => 409,
            Self::Invalid => 422,
            Self::StorageFailure => 500,
        }
    }

    /// Whether the kind is an expected, documented outcome of a request.
    pub fn is_expected(self) -> bool {
        !matches!(self, Self::StorageFailure)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
