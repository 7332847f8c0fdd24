//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the stores expect to reach the outside world: the
//! simulated identity backend, the durable session slot, identifier
//! generation, and suspension. Driven adapters live under
//! [`crate::outbound`].

mod macros;
pub(crate) use macros::define_port_error;

mod id_generator;
mod login_service;
mod session_slot;
mod sleeper;

#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    DEFAULT_LOGIN_LATENCY, DEFAULT_REGISTER_LATENCY, FIXTURE_DISPLAY_NAME, FixtureLoginService,
    LoginService,
};
#[cfg(test)]
pub use session_slot::MockSessionSlot;
pub use session_slot::{SESSION_SLOT_KEY, SessionSlot, SessionSlotError};
pub use sleeper::{ImmediateSleeper, Sleeper, TokioSleeper};
