use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use castor_client_core::{codes, ApiError, ApiResult, Row};

use crate::backend::TableBackend;
use crate::filter::Filter;
use crate::plan::{OrderDirection, OrderSpec, QueryPlan};

/// Accumulates constraints against a named table and defers execution to a
/// terminal call.
///
/// # Example
/// ```ignore
/// let audits = client
///     .from("audits")
///     .eq("status", "InReview")
///     .order("due_date", OrderDirection::Ascending)
///     .limit(20)
///     .select()
///     .await?;
/// ```
pub struct QueryBuilder {
    backend: Arc<dyn TableBackend>,
    table: String,
    plan: QueryPlan,
}

impl QueryBuilder {
    pub fn new(backend: Arc<dyn TableBackend>, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
            plan: QueryPlan::new(),
        }
    }

    /// Filter: column equals value.
    pub fn eq(mut self, column: &str, value: impl Into<JsonValue>) -> Self {
        self.plan.filters.push(Filter::eq(column, value));
        self
    }

    /// Filter: column is a member of `values`.
    pub fn in_<V: Into<JsonValue>>(mut self, column: &str, values: Vec<V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.plan.filters.push(Filter::is_in(column, values));
        self
    }

    /// Order by a column. A later call overwrites an earlier one.
    pub fn order(mut self, column: &str, direction: OrderDirection) -> Self {
        self.plan.order = Some(OrderSpec {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Limit the number of rows returned. A later call overwrites an earlier one.
    pub fn limit(mut self, count: usize) -> Self {
        self.plan.limit = Some(count);
        self
    }

    /// Execute and return all matching rows.
    ///
    /// An empty match is a success with an empty collection, never an error.
    pub async fn select(self) -> ApiResult<Vec<Row>> {
        self.backend.fetch(&self.table, &self.plan).await
    }

    /// Execute and deserialize each matching row into `T`.
    pub async fn select_as<T: DeserializeOwned>(self) -> ApiResult<Vec<T>> {
        let table = self.table.clone();
        let rows = self.select().await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(serde_json::to_value(row)?)
                    .map_err(|e| ApiError::new(format!("Malformed row from {}: {}", table, e)))
            })
            .collect()
    }

    /// Execute and return the first matching row, or None on an empty match.
    pub async fn maybe_single(self) -> ApiResult<Option<Row>> {
        let mut rows = self.select().await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Execute and return the first matching row; an empty match is an error.
    pub async fn single(self) -> ApiResult<Row> {
        let mut rows = self.select().await?;
        if rows.is_empty() {
            Err(ApiError::new("Row not found").with_code(codes::ROW_NOT_FOUND))
        } else {
            Ok(rows.remove(0))
        }
    }
}
