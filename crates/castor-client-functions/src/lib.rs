//! Function gateway for the Castor client.
//!
//! External processing jobs (upload intake, document splitting, analysis,
//! certificate issuance, imports, scheduled runs, messaging, payment
//! webhooks) are invoked by name through the [`FunctionsBackend`] seam. The
//! [`MockFunctionsGateway`] acknowledges a fixed catalogue of jobs as queued;
//! the [`RestFunctionsGateway`] posts to the remote runtime, honoring the
//! caller's HTTP method and extra headers.

pub mod backend;
pub mod mock;
pub mod rest;
pub mod types;

pub use backend::FunctionsBackend;
pub use mock::{MockFunctionsGateway, KNOWN_JOBS};
pub use rest::RestFunctionsGateway;
pub use types::{HttpMethod, InvokeOptions};
