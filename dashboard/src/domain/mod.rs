//! Domain primitives, ports, and the stores that own dashboard state.
//!
//! Purpose: define strongly typed entities for the collaboration dashboard
//! and the two state owners built on them. Value objects validate on
//! construction; aggregates are only created by the stores.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - User, Project, Task, Contribution: the catalog entities.
//! - SessionStore: the single authenticated identity.
//! - ProjectStore: catalog, joined subset, and selection.
//! - ChatLog: per-project message threads.

pub mod auth;
pub mod chat;
pub mod contribution;
pub mod error;
pub mod ids;
pub mod ports;
pub mod project;
pub mod project_store;
pub mod session_store;
pub mod task;
pub mod user;

pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MIN, Password, Registration,
};
pub use self::chat::{ChatLog, ChatMessage};
pub use self::contribution::{Contribution, ContributionStatus};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{ContributionId, IdParseError, MessageId, ProjectId, TaskId};
pub use self::project::{ClientId, NewProject, Project, ProjectStatus, ProjectValidationError};
pub use self::project_store::{MAX_ID_ATTEMPTS, ProjectStore};
pub use self::session_store::{SessionStore, SupersessionPolicy};
pub use self::task::{Budget, NewTask, Task, TaskStatus, TaskValidationError};
pub use self::user::{
    AvatarUrl, DisplayName, EmailAddress, User, UserId, UserRole,
    UserValidationError,
};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use dashboard::domain::{DomainResult, Error};
///
/// fn guarded() -> DomainResult<()> {
///     Err(Error::forbidden("only clients may create projects"))
/// }
/// assert!(guarded().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
