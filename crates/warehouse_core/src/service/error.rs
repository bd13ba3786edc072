//! Service-facing error type.
//!
//! # Invariants
//! - Classified repository kinds are forwarded with their detail.
//! - Unclassified failures become `Storage` with the repository error chained
//!   as `source()`.

use crate::error::ErrorKind;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    NotFound {
        entity: &'static str,
        id: String,
    },
    AlreadyExists {
        entity: &'static str,
        column: String,
        key: String,
    },
    ForeignKeyMissing {
        entity: &'static str,
        reference: Option<&'static str>,
        value: Option<String>,
    },
    /// Record failed validation, or a lookup miss widened by entity policy.
    Invalid {
        entity: &'static str,
        cause: RepoError,
    },
    Storage(RepoError),
}

impl ServiceError {
    /// Forwards classified repository kinds; anything else is `Storage`.
    pub fn from_repo(entity: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::AlreadyExists {
                entity,
                column,
                key,
            } => Self::AlreadyExists {
                entity,
                column,
                key,
            },
            RepoError::ForeignKeyMissing {
                entity,
                reference,
                value,
            } => Self::ForeignKeyMissing {
                entity,
                reference,
                value,
            },
            err @ RepoError::Validation(_) => Self::Invalid { entity, cause: err },
            err => Self::Storage(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::ForeignKeyMissing { .. } => ErrorKind::ForeignKeyMissing,
            Self::Invalid { .. } => ErrorKind::Invalid,
            Self::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AlreadyExists {
                entity,
                column,
                key,
            } => write!(f, "{entity} with {column} `{key}` already exists"),
            Self::ForeignKeyMissing {
                entity,
                reference: Some(reference),
                value: Some(value),
            } => write!(f, "{entity} references missing {reference} `{value}`"),
            Self::ForeignKeyMissing {
                entity,
                reference: Some(reference),
                value: None,
            } => write!(f, "{entity} references missing {reference}"),
            Self::ForeignKeyMissing { entity, .. } => {
                write!(f, "{entity} references a missing record")
            }
            Self::Invalid { entity, cause } => write!(f, "invalid {entity}: {cause}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid { cause, .. } => Some(cause),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}
