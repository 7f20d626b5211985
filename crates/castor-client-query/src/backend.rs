use async_trait::async_trait;

use castor_client_core::{ApiResult, Row};

use crate::plan::QueryPlan;

/// Strategy seam between the query builder and row storage.
///
/// Both implementations honor the same semantics: all filters apply
/// conjunctively, then the order specification, then the row limit; an empty
/// match is a success with an empty collection.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Execute an accumulated plan against the named table.
    async fn fetch(&self, table: &str, plan: &QueryPlan) -> ApiResult<Vec<Row>>;
}
