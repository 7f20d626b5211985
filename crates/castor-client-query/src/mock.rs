use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use castor_client_core::{ApiResult, Row};

use crate::backend::TableBackend;
use crate::plan::QueryPlan;

/// In-process table storage for offline development.
///
/// Every fetch returns deep, independent copies of the stored rows, so a
/// caller mutating a result can never corrupt the stored table. Execution is
/// synchronous; the lock only guards table registration against reads.
#[derive(Default)]
pub struct MockTableStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MockTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous contents. Builder form for
    /// seeding at construction.
    pub fn with_table(self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.set_table(name, rows);
        self
    }

    /// Register or replace a table.
    pub fn set_table(&self, name: impl Into<String>, rows: Vec<Row>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(name.into(), rows);
        }
    }

    /// Append a row to a table, creating the table if needed.
    pub fn push_row(&self, name: &str, row: Row) {
        if let Ok(mut tables) = self.tables.write() {
            tables.entry(name.to_string()).or_default().push(row);
        }
    }
}

#[async_trait]
impl TableBackend for MockTableStore {
    async fn fetch(&self, table: &str, plan: &QueryPlan) -> ApiResult<Vec<Row>> {
        // Unknown tables yield an empty result, not an error.
        let rows = self
            .tables
            .read()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default();
        Ok(plan.apply(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use castor_client_core::row;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_table_is_empty_not_an_error() {
        let store = MockTableStore::new();
        let rows = store.fetch("ghosts", &QueryPlan::new()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn fetch_applies_the_plan() {
        let store = MockTableStore::new().with_table(
            "audits",
            vec![
                row![("id", "audit-1"), ("status", "InReview")],
                row![("id", "audit-2"), ("status", "Issued")],
            ],
        );
        let plan = QueryPlan {
            filters: vec![Filter::eq("status", "Issued")],
            order: None,
            limit: None,
        };
        let rows = store.fetch("audits", &plan).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_value("id"), Some(&json!("audit-2")));
    }

    #[tokio::test]
    async fn returned_rows_are_independent_copies() {
        let store = MockTableStore::new()
            .with_table("audits", vec![row![("id", "audit-1"), ("status", "Draft")]]);

        let mut rows = store.fetch("audits", &QueryPlan::new()).await.unwrap();
        rows[0].set("status", json!("Issued"));

        let fresh = store.fetch("audits", &QueryPlan::new()).await.unwrap();
        assert_eq!(fresh[0].get_value("status"), Some(&json!("Draft")));
    }

    #[tokio::test]
    async fn push_row_extends_a_table() {
        let store = MockTableStore::new();
        store.push_row("findings", row![("id", "f-1")]);
        store.push_row("findings", row![("id", "f-2")]);
        let rows = store.fetch("findings", &QueryPlan::new()).await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}
