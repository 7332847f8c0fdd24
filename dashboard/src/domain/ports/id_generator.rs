//! Identifier generation port.
//!
//! Catalog entities use UUIDs. Collisions are checked by the stores that own
//! the collections; this port only hands out candidates.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Produce the next candidate identifier.
    fn next_id(&self) -> Uuid;
}

/// Random version 4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Monotonic counter encoded as a UUID, for reproducible runs.
///
/// # Examples
/// ```
/// use dashboard::domain::ports::{IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::starting_at(1);
/// assert_eq!(ids.next_id().as_u128(), 1);
/// assert_eq!(ids.next_id().as_u128(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start counting from `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u128(u128::from(value))
    }
}
