//! Per-operation context carried into every repository call.
//!
//! # Responsibility
//! - Correlate log lines of one request through a stable `request_id`.
//! - Carry an optional deadline and a cooperative cancel flag.
//!
//! # Invariants
//! - Repositories check the context before each storage statement.
//! - Cancellation is sticky: once cancelled, a context never recovers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Why an operation stopped before reaching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// Caller cancelled through a [`CancelHandle`].
    Cancelled,
    /// Deadline passed before the next statement.
    DeadlineExceeded,
}

impl Display for Interrupted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::DeadlineExceeded => write!(f, "operation deadline exceeded"),
        }
    }
}

impl Error for Interrupted {}

/// Request-scoped context: id, deadline and cancel flag.
#[derive(Debug, Clone)]
pub struct OpContext {
    request_id: Uuid,
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

/// Cloneable handle that cancels every context sharing its flag.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl OpContext {
    /// Context with a fresh request id, no deadline and no cancellation.
    pub fn background() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline_at(Instant::now() + timeout)
    }

    /// Returns a copy bound to an absolute deadline, keeping id and cancel flag.
    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Fails when the context was cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(Interrupted::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Interrupted::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::background()
    }
}
