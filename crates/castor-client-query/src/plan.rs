use std::cmp::Ordering;

use serde_json::Value as JsonValue;

use castor_client_core::Row;

use crate::filter::Filter;

/// Sort direction for an order specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// At most one order specification per query; later calls overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    pub column: String,
    pub direction: OrderDirection,
}

/// The accumulated state of a query: conjunctive filters, an optional order
/// specification, and an optional row limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPlan {
    pub filters: Vec<Filter>,
    pub order: Option<OrderSpec>,
    pub limit: Option<usize>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this plan to an in-memory row set: filter, then order, then
    /// truncate. Used by the mock backend; the remote backend renders the
    /// same plan into query parameters instead.
    pub fn apply(&self, mut rows: Vec<Row>) -> Vec<Row> {
        rows.retain(|row| self.filters.iter().all(|f| f.matches(row)));

        if let Some(order) = &self.order {
            let ascending = order.direction.is_ascending();
            // sort_by is stable: equal keys preserve encounter order.
            rows.sort_by(|a, b| {
                compare_on_column(
                    a.get_value(&order.column),
                    b.get_value(&order.column),
                    ascending,
                )
            });
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        rows
    }
}

/// Compare two rows' values on the ordered column.
///
/// A null or missing value sorts before any defined value when ascending and
/// after any defined value when descending.
fn compare_on_column(a: Option<&JsonValue>, b: Option<&JsonValue>, ascending: bool) -> Ordering {
    let a_null = a.map_or(true, JsonValue::is_null);
    let b_null = b.map_or(true, JsonValue::is_null);
    match (a_null, b_null) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if ascending {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if ascending {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, false) => {
            let cmp = compare_values(a.unwrap_or(&JsonValue::Null), b.unwrap_or(&JsonValue::Null));
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        }
    }
}

/// Total order over defined JSON values: by type rank, then by value.
fn compare_values(a: &JsonValue, b: &JsonValue) -> Ordering {
    fn rank(v: &JsonValue) -> u8 {
        match v {
            JsonValue::Null => 0,
            JsonValue::Bool(_) => 1,
            JsonValue::Number(_) => 2,
            JsonValue::String(_) => 3,
            JsonValue::Array(_) => 4,
            JsonValue::Object(_) => 5,
        }
    }

    match (a, b) {
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        _ if rank(a) != rank(b) => rank(a).cmp(&rank(b)),
        // Structured values: compare their canonical text renderings.
        _ => a.to_string().cmp(&b.to_string()),
    }
}
