use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use castor_client_core::{codes, ApiError, ApiResult};

use crate::backend::AuthBackend;
use crate::profile::{Profile, ProfileStatus, UserRole};
use crate::types::{Credentials, Session, SignUpInput, UserIdentity};

/// Password every seeded profile accepts in the mock directory.
pub const DEV_PASSWORD: &str = "Password123!";

/// In-memory credential authority backed by a profile directory.
///
/// Seeded profiles authenticate with [`DEV_PASSWORD`]; accounts created via
/// sign-up use the password chosen at registration.
pub struct MockAuthBackend {
    directory: Mutex<Directory>,
}

struct Directory {
    profiles: Vec<Profile>,
    passwords: HashMap<String, String>,
}

impl MockAuthBackend {
    /// Create a backend seeded with the given profiles.
    pub fn new(profiles: Vec<Profile>) -> Self {
        let passwords = profiles
            .iter()
            .map(|p| (p.email.to_lowercase(), DEV_PASSWORD.to_string()))
            .collect();
        Self {
            directory: Mutex::new(Directory {
                profiles,
                passwords,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Directory> {
        // Directory mutations never panic, so the lock cannot be poisoned.
        self.directory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn session_for(profile: &Profile) -> Session {
    Session {
        access_token: format!("mock-token-{}", profile.user_id),
        refresh_token: format!("mock-refresh-{}", profile.user_id),
        expires_in: 3600,
        token_type: "bearer".to_string(),
        user: UserIdentity::new(&profile.user_id, &profile.email)
            .with_extra("role", profile.role.to_string()),
    }
}

fn data_str(data: Option<&JsonValue>, key: &str) -> Option<String> {
    data?.get(key)?.as_str().map(str::to_string)
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn sign_in(&self, credentials: &Credentials) -> ApiResult<Session> {
        let directory = self.lock();
        let email = credentials.email.to_lowercase();

        match directory.passwords.get(&email) {
            Some(stored) if *stored == credentials.password => {}
            _ => {
                return Err(ApiError::new("Invalid email or password")
                    .with_code(codes::INVALID_CREDENTIALS));
            }
        }

        let profile = directory
            .profiles
            .iter()
            .find(|p| p.email.to_lowercase() == email)
            .ok_or_else(|| {
                ApiError::new("Profile not found").with_code(codes::PROFILE_MISSING)
            })?;

        Ok(session_for(profile))
    }

    async fn sign_up(&self, input: &SignUpInput) -> ApiResult<Session> {
        let mut directory = self.lock();
        let email = input.email.to_lowercase();

        if directory
            .profiles
            .iter()
            .any(|p| p.email.to_lowercase() == email)
        {
            return Err(ApiError::new("User already exists").with_code(codes::USER_EXISTS));
        }

        let data = input.data.as_ref();
        let role = data_str(data, "role")
            .and_then(|r| serde_json::from_value(JsonValue::String(r)).ok())
            .unwrap_or(UserRole::ClientRep);
        let id = Uuid::new_v4();

        let profile = Profile {
            id: format!("profile-{}", id),
            user_id: format!("user-{}", id),
            org_id: data_str(data, "org_id"),
            role,
            given_name: data_str(data, "given_name").unwrap_or_else(|| "New".to_string()),
            family_name: data_str(data, "family_name").unwrap_or_else(|| "User".to_string()),
            phone: data_str(data, "phone"),
            status: ProfileStatus::Pending,
            email: input.email.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        let session = session_for(&profile);
        directory
            .passwords
            .insert(email, input.password.clone());
        directory.profiles.push(profile);

        Ok(session)
    }

    async fn sign_out(&self, _access_token: &str) -> ApiResult<()> {
        Ok(())
    }
}
