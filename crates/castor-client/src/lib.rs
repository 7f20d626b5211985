//! Data-access client for the Castor audit/certification console.
//!
//! One [`CastorClient`] facade covers structured-record queries, the
//! authentication session, remote procedure calls, and external processing
//! jobs. The factory picks the backend once, at construction: remote HTTP
//! backends when a base URL and access key are configured, in-memory mock
//! backends otherwise. Both honor the same query semantics, error shape,
//! and session lifecycle, so consumers never branch on which is active.
//!
//! ```ignore
//! use castor_client::{CastorClient, ClientConfig, Credentials};
//!
//! let client = CastorClient::new(ClientConfig::from_env())?;
//! client
//!     .auth()
//!     .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", "Password123!"))
//!     .await?;
//! let open = client.from("audits").eq("status", "InReview").select().await?;
//! ```

pub mod client;
pub mod fixtures;
pub mod jobs;

pub use client::CastorClient;
pub use jobs::JobsApi;

// Re-export the component crates under one roof.
pub use castor_client_auth::{
    AuthChangeEvent, Credentials, FileStorage, MemoryStorage, Profile, ProfileStatus, Session,
    SessionStorage, SessionStore, SignUpInput, UserIdentity, UserRole, DEV_PASSWORD,
};
pub use castor_client_core::{codes, row, ApiError, ApiResult, ClientConfig, Row, TokenProvider};
pub use castor_client_functions::{HttpMethod, InvokeOptions};
pub use castor_client_query::{Filter, FilterOp, OrderDirection, QueryBuilder};
