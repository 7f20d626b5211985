use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::form_urlencoded::Serializer;

use castor_client_core::{ApiError, ApiResult, HttpTransport, RequestSpec, Row, TokenProvider};

use crate::backend::TableBackend;
use crate::filter::{Filter, FilterOp};
use crate::plan::QueryPlan;

/// Table backend against the remote REST API at `/rest/v1/{table}`.
///
/// Translates the accumulated plan into query parameters: `eq` filters become
/// `column=eq.value`, `in` filters become `column=in.(v1,v2,...)`, the order
/// specification becomes `order=column.asc|desc`, and the limit `limit=n`.
#[derive(Clone)]
pub struct RestTableClient {
    transport: HttpTransport,
    tokens: Arc<dyn TokenProvider>,
}

impl RestTableClient {
    pub fn new(transport: HttpTransport, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { transport, tokens }
    }

    fn query_string(plan: &QueryPlan) -> String {
        let mut params = Serializer::new(String::new());
        params.append_pair("select", "*");

        for Filter { column, op } in &plan.filters {
            match op {
                FilterOp::Eq(value) => {
                    params.append_pair(column, &format!("eq.{}", render_scalar(value)));
                }
                FilterOp::In(values) => {
                    let list = values
                        .iter()
                        .map(render_scalar)
                        .collect::<Vec<_>>()
                        .join(",");
                    params.append_pair(column, &format!("in.({})", list));
                }
            }
        }

        if let Some(order) = &plan.order {
            let direction = if order.direction.is_ascending() {
                "asc"
            } else {
                "desc"
            };
            params.append_pair("order", &format!("{}.{}", order.column, direction));
        }

        if let Some(limit) = plan.limit {
            params.append_pair("limit", &limit.to_string());
        }

        params.finish()
    }
}

/// Render a scalar filter value the way the REST API expects it: strings
/// raw (unquoted), everything else via its JSON text form.
fn render_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableBackend for RestTableClient {
    async fn fetch(&self, table: &str, plan: &QueryPlan) -> ApiResult<Vec<Row>> {
        let path = format!("/rest/v1/{}?{}", table, Self::query_string(plan));
        debug!(table, path = %path, "Loading rows from remote table");
        let payload = self
            .transport
            .send(
                RequestSpec::get(path)
                    .bearer(self.transport.bearer_or_key(self.tokens.as_ref()))
                    .fallback(format!("Failed to load from {}", table)),
            )
            .await?;

        if payload.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(payload)
            .map_err(|e| ApiError::new(format!("Malformed response from {}: {}", table, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{OrderDirection, OrderSpec};
    use serde_json::json;

    #[test]
    fn query_string_renders_filters_order_and_limit() {
        let plan = QueryPlan {
            filters: vec![
                Filter::eq("status", "InReview"),
                Filter::is_in("org_id", vec![json!("org-aurora"), json!("org-harbour")]),
            ],
            order: Some(OrderSpec {
                column: "due_date".into(),
                direction: OrderDirection::Descending,
            }),
            limit: Some(25),
        };
        let query = RestTableClient::query_string(&plan);
        assert_eq!(
            query,
            "select=*&status=eq.InReview&org_id=in.%28org-aurora%2Corg-harbour%29\
             &order=due_date.desc&limit=25"
        );
    }

    #[test]
    fn query_string_defaults_to_select_all() {
        assert_eq!(RestTableClient::query_string(&QueryPlan::new()), "select=*");
    }

    #[test]
    fn scalars_render_unquoted() {
        assert_eq!(render_scalar(&json!("Draft")), "Draft");
        assert_eq!(render_scalar(&json!(42)), "42");
        assert_eq!(render_scalar(&json!(true)), "true");
        assert_eq!(render_scalar(&json!(null)), "null");
    }
}
