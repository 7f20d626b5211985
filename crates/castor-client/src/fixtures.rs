//! Seed catalogue for the mock backends: a small, internally consistent
//! slice of the console's data — two organisations, three accounts, two
//! audit programmes, and one issued certificate with a verification token.

use std::collections::HashMap;

use serde_json::{json, Value as JsonValue};

use castor_client_auth::{Profile, ProfileStatus, UserRole};
use castor_client_core::{row, Row};

/// Verification token of the seeded certificate, resolvable through the
/// `get_certificate_by_token` RPC.
pub const CERTIFICATE_TOKEN: &str = "token-aurora-hvnl";

/// Accounts registered in the mock auth directory.
pub fn profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "profile-admin".into(),
            user_id: "user-admin".into(),
            org_id: None,
            role: UserRole::Admin,
            given_name: "Sasha".into(),
            family_name: "Nguyen".into(),
            phone: None,
            status: ProfileStatus::Active,
            email: "sasha.nguyen@castor.example".into(),
            created_at: "2025-01-15T00:00:00Z".into(),
        },
        Profile {
            id: "profile-reviewer".into(),
            user_id: "user-reviewer".into(),
            org_id: None,
            role: UserRole::Reviewer,
            given_name: "Mina".into(),
            family_name: "Chen".into(),
            phone: None,
            status: ProfileStatus::Active,
            email: "mina.chen@castor.example".into(),
            created_at: "2025-01-15T00:00:00Z".into(),
        },
        Profile {
            id: "profile-aurora".into(),
            user_id: "user-aurora".into(),
            org_id: Some("org-aurora".into()),
            role: UserRole::ClientRep,
            given_name: "Oliver".into(),
            family_name: "Reed".into(),
            phone: None,
            status: ProfileStatus::Active,
            email: "oliver.reed@auroralogistics.example".into(),
            created_at: "2025-01-15T00:00:00Z".into(),
        },
    ]
}

/// Seeded tables for the mock table store.
pub fn tables() -> Vec<(&'static str, Vec<Row>)> {
    let organisations = vec![
        row![
            ("id", "org-aurora"),
            ("abn", "53004085616"),
            ("legal_name", "Aurora Logistics Pty Ltd"),
            ("trading_name", "Aurora Logistics"),
            ("billing_email", "accounts@auroralogistics.example"),
            ("status", "Active"),
            ("created_at", "2024-07-19T00:00:00Z"),
        ],
        row![
            ("id", "org-harbour"),
            ("abn", "83004195220"),
            ("legal_name", "Harbour Manufacturing Group"),
            ("trading_name", "Harbour Manufacturing"),
            ("billing_email", "finance@harbour.example"),
            ("status", "Active"),
            ("created_at", "2024-10-17T00:00:00Z"),
        ],
    ];

    let audit_types = vec![
        row![
            ("id", "audit-hvnl"),
            ("key", "hvnl"),
            ("name", "HVNL Chain of Responsibility"),
            ("description", "Heavy Vehicle National Law compliance programme"),
            ("status", "Active"),
        ],
        row![
            ("id", "audit-whs"),
            ("key", "whs"),
            ("name", "Work Health & Safety"),
            ("description", "Desktop WHS audit"),
            ("status", "Active"),
        ],
    ];

    let audits = vec![
        row![
            ("id", "audit-aurora-hvnl"),
            ("org_id", "org-aurora"),
            ("audit_type_version_id", "version-hvnl-2025"),
            ("status", "Issued"),
            ("open_date", "2024-11-16T00:00:00Z"),
            ("due_date", "2024-12-01T00:00:00Z"),
            ("expiry_date", "2025-11-16T00:00:00Z"),
            ("reviewer_id", "profile-reviewer"),
            ("decision_log_ref", "log-aurora-hvnl"),
            ("created_at", "2024-11-11T00:00:00Z"),
        ],
        row![
            ("id", "audit-harbour-whs"),
            ("org_id", "org-harbour"),
            ("audit_type_version_id", "version-whs-2025"),
            ("status", "InReview"),
            ("open_date", "2025-01-05T00:00:00Z"),
            ("due_date", "2025-01-29T00:00:00Z"),
            ("expiry_date", json!(null)),
            ("reviewer_id", "profile-reviewer"),
            ("decision_log_ref", "log-harbour-whs"),
            ("created_at", "2025-01-03T00:00:00Z"),
        ],
        row![
            ("id", "audit-aurora-whs"),
            ("org_id", "org-aurora"),
            ("audit_type_version_id", "version-whs-2025"),
            ("status", "AwaitingEvidence"),
            ("open_date", "2025-01-10T00:00:00Z"),
            ("due_date", "2025-02-09T00:00:00Z"),
            ("expiry_date", json!(null)),
            ("reviewer_id", json!(null)),
            ("decision_log_ref", json!(null)),
            ("created_at", "2025-01-08T00:00:00Z"),
        ],
    ];

    let certificates = vec![row![
        ("id", "cert-aurora-hvnl"),
        ("audit_id", "audit-aurora-hvnl"),
        ("number", "CASTOR-2024-017"),
        ("issued_at", "2024-12-26T00:00:00Z"),
        ("pdf_path", "certificates/CASTOR-2024-017.pdf"),
        ("verification_token", CERTIFICATE_TOKEN),
        ("status", "Active"),
        ("revocation_reason", json!(null)),
    ]];

    let profile_rows = profiles()
        .iter()
        .filter_map(|p| serde_json::to_value(p).ok())
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();

    vec![
        ("organisations", organisations),
        ("audit_types", audit_types),
        ("audits", audits),
        ("certificates", certificates),
        ("profiles", profile_rows),
    ]
}

/// Verification results served by the mock `get_certificate_by_token` RPC.
pub fn verification_results() -> HashMap<String, JsonValue> {
    let mut results = HashMap::new();
    results.insert(
        CERTIFICATE_TOKEN.to_string(),
        json!({
            "number": "CASTOR-2024-017",
            "status": "Active",
            "issued_at": "2024-12-26T00:00:00Z",
            "organisation_name": "Aurora Logistics Pty Ltd",
            "audit_type_name": "HVNL Chain of Responsibility",
            "expiry_date": "2025-11-16T00:00:00Z",
        }),
    );
    results
}
