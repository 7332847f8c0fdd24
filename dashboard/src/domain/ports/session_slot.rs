//! Driven port for the durable session slot.
//!
//! A single key holds the serialised identity of the signed-in user. It is
//! written on login/registration, removed on logout, and optionally read back
//! at startup. Access is synchronous, like browser local storage.

use crate::domain::User;

use super::define_port_error;

/// Fixed key under which the current identity is stored.
pub const SESSION_SLOT_KEY: &str = "user";

define_port_error! {
    /// Errors raised by session slot adapters.
    pub enum SessionSlotError {
        /// Underlying storage could not be read or written.
        Io { message: String } => "session slot i/o failed: {message}",
        /// Stored payload could not be decoded into a user.
        Corrupt { message: String } => "session slot holds an unreadable identity: {message}",
    }
}

/// Port for the single-key durable identity store.
#[cfg_attr(test, mockall::automock)]
pub trait SessionSlot: Send + Sync {
    /// Replace the stored identity.
    fn save(&self, user: &User) -> Result<(), SessionSlotError>;

    /// Read the stored identity, if any.
    fn load(&self) -> Result<Option<User>, SessionSlotError>;

    /// Remove the stored identity. Clearing an empty slot succeeds.
    fn clear(&self) -> Result<(), SessionSlotError>;
}
