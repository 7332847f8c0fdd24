//! Process-local session slot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{decode, encode};
use crate::domain::User;
use crate::domain::ports::{SessionSlot, SessionSlotError};

/// Session slot that lives as long as the process.
///
/// Used when no session directory is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemorySessionSlot {
    raw: Mutex<Option<String>>,
}

impl InMemorySessionSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a raw payload.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// Raw stored payload, if any.
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.raw.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionSlot for InMemorySessionSlot {
    fn save(&self, user: &User) -> Result<(), SessionSlotError> {
        let payload = encode(user)?;
        *self.lock() = Some(payload);
        Ok(())
    }

    fn load(&self) -> Result<Option<User>, SessionSlotError> {
        self.lock().as_deref().map(decode).transpose()
    }

    fn clear(&self) -> Result<(), SessionSlotError> {
        self.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, UserId, UserRole};
    use rstest::{fixture, rstest};

    #[fixture]
    fn user() -> User {
        User::new(
            UserId::random(),
            DisplayName::new("John Doe").expect("name"),
            EmailAddress::new("a@b.com").expect("email"),
            UserRole::Contributor,
        )
    }

    #[rstest]
    fn save_load_clear_cycle(user: User) {
        let slot = InMemorySessionSlot::new();
        assert_eq!(slot.load(), Ok(None));

        slot.save(&user).expect("save");
        assert_eq!(slot.load(), Ok(Some(user)));

        slot.clear().expect("clear");
        assert_eq!(slot.raw(), None);
        slot.clear().expect("clearing twice is fine");
    }

    #[rstest]
    fn unreadable_payload_reports_corrupt() {
        let slot = InMemorySessionSlot::with_raw("{not json");
        assert!(matches!(slot.load(), Err(SessionSlotError::Corrupt { .. })));
    }
}
