//! Query builder and table backends for the Castor client.
//!
//! A [`QueryBuilder`] accumulates `eq`/`in_` filter predicates, at most one
//! order specification, and at most one row limit, then executes against a
//! [`TableBackend`] through one of its terminal operations (`select`,
//! `maybe_single`, `single`). The [`MockTableStore`] serves in-memory tables
//! for offline development; the [`RestTableClient`] renders the same plan
//! into REST query parameters. Named server-side procedures go through the
//! [`RpcBackend`] seam instead of the table contract.

pub mod backend;
pub mod builder;
pub mod filter;
pub mod mock;
pub mod plan;
pub mod rest;
pub mod rpc;

pub use backend::TableBackend;
pub use builder::QueryBuilder;
pub use filter::{Filter, FilterOp};
pub use mock::MockTableStore;
pub use plan::{OrderDirection, OrderSpec, QueryPlan};
pub use rest::RestTableClient;
pub use rpc::{MockRpc, RestRpc, RpcBackend};
