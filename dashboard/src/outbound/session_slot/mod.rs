//! Durable session slot adapters.
//!
//! Both adapters store the identity as a JSON string under
//! [`SESSION_SLOT_KEY`](crate::domain::ports::SESSION_SLOT_KEY), mirroring
//! browser local storage.

mod json_file;
mod memory;

pub use json_file::JsonFileSessionSlot;
pub use memory::InMemorySessionSlot;

use crate::domain::User;
use crate::domain::ports::SessionSlotError;

fn encode(user: &User) -> Result<String, SessionSlotError> {
    serde_json::to_string(user).map_err(|err| SessionSlotError::io(err.to_string()))
}

fn decode(raw: &str) -> Result<User, SessionSlotError> {
    serde_json::from_str(raw).map_err(|err| SessionSlotError::corrupt(err.to_string()))
}
