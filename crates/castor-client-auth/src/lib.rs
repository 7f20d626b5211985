//! Session management for the Castor client.
//!
//! The [`SessionStore`] is the single source of truth for "who is logged in",
//! shared by every consumer for the process lifetime. It restores a persisted
//! session on construction, replaces the session wholesale on sign-in /
//! sign-up / sign-out, and notifies registered listeners synchronously on
//! every transition. Credential checks are delegated to an [`AuthBackend`]:
//! either the in-memory [`MockAuthBackend`] profile directory or the
//! [`RestAuthBackend`] speaking the remote `/auth/v1` API.

pub mod backend;
pub mod mock;
pub mod profile;
pub mod rest;
pub mod storage;
pub mod store;
pub mod types;

pub use backend::AuthBackend;
pub use mock::{MockAuthBackend, DEV_PASSWORD};
pub use profile::{Profile, ProfileStatus, UserRole};
pub use rest::RestAuthBackend;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{AuthSubscription, SessionStore};
pub use types::{AuthChangeEvent, Credentials, Session, SignUpInput, UserIdentity};
