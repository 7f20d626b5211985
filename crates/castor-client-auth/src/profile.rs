use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Reviewer,
    ClientRep,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Reviewer => write!(f, "Reviewer"),
            Self::ClientRep => write!(f, "ClientRep"),
        }
    }
}

/// Account lifecycle state of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileStatus {
    Pending,
    Active,
    Inactive,
}

/// A registered console identity, used by the mock auth backend as its
/// account directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub org_id: Option<String>,
    pub role: UserRole,
    pub given_name: String,
    pub family_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: ProfileStatus,
    pub email: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serde_uses_pascal_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::ClientRep).unwrap(),
            "\"ClientRep\""
        );
        let parsed: UserRole = serde_json::from_str("\"Reviewer\"").unwrap();
        assert_eq!(parsed, UserRole::Reviewer);
    }

    #[test]
    fn profile_deserializes_without_phone() {
        let json = r#"{
            "id": "profile-1",
            "user_id": "user-1",
            "org_id": null,
            "role": "Admin",
            "given_name": "Sasha",
            "family_name": "Nguyen",
            "status": "Active",
            "email": "sasha.nguyen@castor.example",
            "created_at": "2025-01-15T00:00:00Z"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.phone.is_none());
        assert_eq!(profile.role, UserRole::Admin);
    }
}
