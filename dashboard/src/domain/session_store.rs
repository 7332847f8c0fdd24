//! Session store: the single authenticated identity and its durability.
//!
//! Login and registration are asynchronous and may overlap. Each call takes a
//! ticket when it starts; what happens when an older call resolves after a
//! newer one started is governed by [`SupersessionPolicy`]. Failed calls
//! never touch the current identity or the durable slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::domain::ports::{LoginService, SessionSlot, SessionSlotError};
use crate::domain::{Error, LoginCredentials, Registration, User};

/// How overlapping login/registration calls are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersessionPolicy {
    /// Every successful resolution is applied; whichever finishes last wins.
    #[default]
    LastCompletionWins,
    /// A resolution is discarded with
    /// [`ErrorCode::Superseded`](crate::domain::ErrorCode::Superseded) when a
    /// newer login, registration, or logout started after it.
    LatestRequestWins,
}

#[derive(Debug, Default)]
struct SessionState {
    current: Option<User>,
    ticket: u64,
}

/// Owner of the current identity.
///
/// Construct once at startup and share by reference; there is no partial
/// teardown.
pub struct SessionStore {
    login_service: Arc<dyn LoginService>,
    slot: Arc<dyn SessionSlot>,
    policy: SupersessionPolicy,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Create an unauthenticated store.
    pub fn new(login_service: Arc<dyn LoginService>, slot: Arc<dyn SessionSlot>) -> Self {
        Self {
            login_service,
            slot,
            policy: SupersessionPolicy::default(),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Choose how overlapping calls resolve.
    #[must_use]
    pub fn with_policy(mut self, policy: SupersessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active supersession policy.
    pub fn policy(&self) -> SupersessionPolicy {
        self.policy
    }

    /// Authenticate and make the returned identity current.
    ///
    /// # Errors
    ///
    /// Propagates the login service failure, returns
    /// [`ErrorCode::Superseded`](crate::domain::ErrorCode::Superseded) under
    /// [`SupersessionPolicy::LatestRequestWins`] when overtaken, and
    /// [`ErrorCode::InternalError`](crate::domain::ErrorCode::InternalError)
    /// when the identity cannot be persisted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let ticket = self.begin();
        debug!(ticket, email = %credentials.email(), "login started");
        let outcome = self.login_service.authenticate(credentials).await;
        self.complete(ticket, outcome, "login")
    }

    /// Create an account and make it current. Same contract as
    /// [`SessionStore::login`].
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let ticket = self.begin();
        debug!(
            ticket,
            email = %registration.email(),
            role = %registration.role(),
            interests = registration.interests().len(),
            "registration started"
        );
        let outcome = self.login_service.register(registration).await;
        self.complete(ticket, outcome, "register")
    }

    /// Drop the current identity and its persisted copy.
    pub fn logout(&self) {
        let previous = {
            let mut state = self.lock();
            state.ticket += 1;
            state.current.take()
        };

        if let Err(err) = self.slot.clear() {
            warn!(error = %err, "failed to clear persisted session");
        }

        match previous {
            Some(user) => info!(user_id = %user.id(), "logged out"),
            None => debug!("logout without an active session"),
        }
    }

    /// Read the persisted identity back into the store.
    ///
    /// An unreadable payload is cleared and treated as no session. An identity
    /// established before the restore is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InternalError`](crate::domain::ErrorCode::InternalError)
    /// when the slot cannot be read at all.
    pub fn restore(&self) -> Result<Option<User>, Error> {
        let stored = match self.slot.load() {
            Ok(stored) => stored,
            Err(SessionSlotError::Corrupt { message }) => {
                warn!(reason = %message, "discarding unreadable persisted session");
                if let Err(err) = self.slot.clear() {
                    warn!(error = %err, "failed to clear unreadable session");
                }
                None
            }
            Err(err) => {
                return Err(Error::internal(format!(
                    "failed to read persisted session: {err}"
                )));
            }
        };

        let mut state = self.lock();
        if let Some(current) = state.current.as_ref() {
            debug!(user_id = %current.id(), "session already active; restore skipped");
            return Ok(Some(current.clone()));
        }
        if let Some(user) = stored.as_ref() {
            info!(user_id = %user.id(), "session restored");
        }
        state.current.clone_from(&stored);
        Ok(stored)
    }

    /// Snapshot of the current identity.
    pub fn current_user(&self) -> Option<User> {
        self.lock().current.clone()
    }

    /// True iff an identity is current.
    pub fn is_authenticated(&self) -> bool {
        self.lock().current.is_some()
    }

    fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.ticket += 1;
        state.ticket
    }

    fn complete(
        &self,
        ticket: u64,
        outcome: Result<User, Error>,
        operation: &'static str,
    ) -> Result<User, Error> {
        let user = outcome.inspect_err(|err| {
            warn!(ticket, operation, code = ?err.code(), error = %err, "authentication failed");
        })?;

        let mut state = self.lock();
        if self.policy == SupersessionPolicy::LatestRequestWins && state.ticket != ticket {
            warn!(
                ticket,
                latest = state.ticket,
                operation,
                "discarding superseded resolution"
            );
            return Err(Error::superseded(format!(
                "{operation} was overtaken by a newer request"
            )));
        }

        self.slot.save(&user).map_err(|err| {
            warn!(ticket, operation, error = %err, "failed to persist session");
            Error::internal(format!("failed to persist session: {err}"))
        })?;

        state.current = Some(user.clone());
        info!(ticket, operation, user_id = %user.id(), role = %user.role(), "session established");
        Ok(user)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
