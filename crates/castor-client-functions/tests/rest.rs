//! REST gateway tests against a local wiremock server.

use std::sync::Arc;

use castor_client_core::{HttpTransport, NoToken, TokenProvider};
use castor_client_functions::{
    FunctionsBackend, HttpMethod, InvokeOptions, RestFunctionsGateway,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct SessionToken;
impl TokenProvider for SessionToken {
    fn access_token(&self) -> Option<String> {
        Some("session-token".into())
    }
}

fn gateway(server: &MockServer, tokens: Arc<dyn TokenProvider>) -> RestFunctionsGateway {
    let transport = HttpTransport::new(&server.uri(), "anon-key").unwrap();
    RestFunctionsGateway::new(transport, tokens)
}

#[tokio::test]
async fn posts_json_body_with_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/process-upload"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer session-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"upload_id": "upload-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, Arc::new(SessionToken));
    let ack = gateway
        .invoke(
            "process-upload",
            InvokeOptions::new().body(json!({"upload_id": "upload-1"})),
        )
        .await
        .unwrap();
    assert_eq!(ack["status"], "queued");
}

#[tokio::test]
async fn honors_caller_supplied_get_method_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/functions/v1/renewals-run"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"renewed": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, Arc::new(NoToken));
    let ack = gateway
        .invoke("renewals-run", InvokeOptions::new().method(HttpMethod::Get))
        .await
        .unwrap();
    assert_eq!(ack["renewed"], 2);
}

#[tokio::test]
async fn merges_caller_supplied_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/stripe-webhook"))
        .and(header("stripe-signature", "sig-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"received": true})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, Arc::new(NoToken));
    gateway
        .invoke(
            "stripe-webhook",
            InvokeOptions::new()
                .body(json!({"type": "invoice.paid"}))
                .header("stripe-signature", "sig-123"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn non_2xx_uses_job_specific_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/analysis-run"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let gateway = gateway(&server, Arc::new(NoToken));
    let err = gateway
        .invoke("analysis-run", InvokeOptions::new().body(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.message, "Function analysis-run failed");
}

#[tokio::test]
async fn error_body_message_wins_over_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/issue-certificate"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Audit is not approved",
            "code": "audit_not_approved"
        })))
        .mount(&server)
        .await;

    let gateway = gateway(&server, Arc::new(NoToken));
    let err = gateway
        .invoke(
            "issue-certificate",
            InvokeOptions::new().body(json!({"audit_id": "audit-1"})),
        )
        .await
        .unwrap_err();
    assert_eq!(err.message, "Audit is not approved");
    assert_eq!(err.code.as_deref(), Some("audit_not_approved"));
}
