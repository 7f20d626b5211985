use serde_json::Value as JsonValue;

use castor_client_core::Row;

/// The closed set of filter operators both backends implement.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Stored value equals the target.
    Eq(JsonValue),
    /// Stored value is a member of the target list.
    In(Vec<JsonValue>),
}

/// One conjunctive constraint on a named column.
///
/// Predicates are order-independent: equality and membership tests commute,
/// so the result set does not depend on the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    pub fn is_in(column: impl Into<String>, values: Vec<JsonValue>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::In(values),
        }
    }

    /// Whether a stored row passes this predicate.
    ///
    /// A row without the column never matches: an absent value is not equal
    /// to anything, including an explicit null target.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(stored) = row.get_value(&self.column) else {
            return false;
        };
        match &self.op {
            FilterOp::Eq(target) => stored == target,
            FilterOp::In(targets) => targets.iter().any(|target| target == stored),
        }
    }
}
