//! Driving port for login/registration use-cases.
//!
//! The session store calls this port for the remote credential check without
//! knowing what sits behind it. Tests substitute a double; the dashboard runs
//! against [`FixtureLoginService`] until a real identity backend exists.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{IdGenerator, RandomIdGenerator, Sleeper, TokioSleeper};
use crate::domain::{
    DisplayName, EmailAddress, Error, LoginCredentials, Registration, User, UserId, UserRole,
};

/// Default simulated latency of a login round trip.
pub const DEFAULT_LOGIN_LATENCY: Duration = Duration::from_millis(1000);
/// Default simulated latency of a registration round trip.
pub const DEFAULT_REGISTER_LATENCY: Duration = Duration::from_millis(1500);

/// Display name given to every identity synthesised by a fixture login.
pub const FIXTURE_DISPLAY_NAME: &str = "John Doe";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and return the matching identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Create an account and return its identity.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}

/// Simulated remote that accepts any well-formed credentials.
///
/// After the configured latency, login synthesises a contributor named
/// [`FIXTURE_DISPLAY_NAME`] carrying the supplied email, and registration
/// echoes the supplied name, email, and role. Emails added through
/// [`FixtureLoginService::reject`] fail with
/// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
#[derive(Clone)]
pub struct FixtureLoginService {
    login_latency: Duration,
    register_latency: Duration,
    sleeper: Arc<dyn Sleeper>,
    ids: Arc<dyn IdGenerator>,
    rejected: HashSet<String>,
}

impl Default for FixtureLoginService {
    fn default() -> Self {
        Self::new(Arc::new(TokioSleeper), Arc::new(RandomIdGenerator))
    }
}

impl FixtureLoginService {
    /// Create a fixture with the default latencies.
    pub fn new(sleeper: Arc<dyn Sleeper>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            login_latency: DEFAULT_LOGIN_LATENCY,
            register_latency: DEFAULT_REGISTER_LATENCY,
            sleeper,
            ids,
            rejected: HashSet::new(),
        }
    }

    /// Override the simulated latencies.
    #[must_use]
    pub fn with_latency(mut self, login: Duration, register: Duration) -> Self {
        self.login_latency = login;
        self.register_latency = register;
        self
    }

    /// Make credential checks for `email` fail.
    #[must_use]
    pub fn reject(mut self, email: &EmailAddress) -> Self {
        self.rejected.insert(email.as_ref().to_owned());
        self
    }

    fn check_allowed(&self, email: &EmailAddress) -> Result<(), Error> {
        if self.rejected.contains(email.as_ref()) {
            return Err(Error::unauthorized("authentication failed"));
        }
        Ok(())
    }

    fn next_user_id(&self) -> UserId {
        UserId::from_uuid(self.ids.next_id())
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.sleeper.sleep(self.login_latency).await;
        self.check_allowed(credentials.email())?;

        let name = DisplayName::new(FIXTURE_DISPLAY_NAME)
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        Ok(User::new(
            self.next_user_id(),
            name,
            credentials.email().clone(),
            UserRole::Contributor,
        ))
    }

    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        self.sleeper.sleep(self.register_latency).await;
        self.check_allowed(registration.email())?;

        Ok(User::new(
            self.next_user_id(),
            registration.name().clone(),
            registration.email().clone(),
            registration.role(),
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::SequentialIdGenerator;
    use rstest::{fixture, rstest};
    use tokio::time::Instant;

    #[fixture]
    fn service() -> FixtureLoginService {
        FixtureLoginService::new(
            Arc::new(TokioSleeper),
            Arc::new(SequentialIdGenerator::starting_at(1)),
        )
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn login_waits_then_synthesises_a_contributor(service: FixtureLoginService) {
        let creds = LoginCredentials::try_from_parts("a@b.com", "secret1").expect("credentials");
        let started = Instant::now();

        let user = service.authenticate(&creds).await.expect("login succeeds");

        assert!(started.elapsed() >= DEFAULT_LOGIN_LATENCY);
        assert_eq!(user.name().as_ref(), FIXTURE_DISPLAY_NAME);
        assert_eq!(user.email().as_ref(), "a@b.com");
        assert_eq!(user.role(), UserRole::Contributor);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn register_echoes_the_supplied_fields(service: FixtureLoginService) {
        let registration = Registration::try_new(
            "Grace Hopper",
            "grace@example.com",
            "secret1",
            Some("client"),
            Vec::new(),
        )
        .expect("registration");
        let started = Instant::now();

        let user = service.register(&registration).await.expect("register");

        assert!(started.elapsed() >= DEFAULT_REGISTER_LATENCY);
        assert_eq!(user.name().as_ref(), "Grace Hopper");
        assert_eq!(user.role(), UserRole::Client);
        assert_eq!(user.id().as_uuid().as_u128(), 1);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn rejected_emails_fail_with_unauthorized(service: FixtureLoginService) {
        let creds = LoginCredentials::try_from_parts("mallory@evil.test", "secret1")
            .expect("credentials");
        let service = service.reject(creds.email());

        let err = service.authenticate(&creds).await.expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "authentication failed");
    }
}
