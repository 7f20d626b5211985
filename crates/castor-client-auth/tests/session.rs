//! Session lifecycle tests over the mock backend and in-memory storage.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use castor_client_auth::{
    AuthChangeEvent, Credentials, MemoryStorage, MockAuthBackend, Profile, ProfileStatus,
    SessionStorage, SessionStore, SignUpInput, UserRole, DEV_PASSWORD,
};
use castor_client_core::{codes, TokenProvider};

const STORAGE_KEY: &str = "castor.mock.session";

fn seed_profiles() -> Vec<Profile> {
    vec![Profile {
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
    }]
}

fn store() -> SessionStore {
    SessionStore::new(
        Box::new(MockAuthBackend::new(seed_profiles())),
        Box::new(MemoryStorage::new()),
        STORAGE_KEY,
    )
}

#[tokio::test]
async fn sign_up_then_sign_in_shares_user_id() {
    let store = store();
    let first = store
        .sign_up(SignUpInput::new("new@x.example", "Secret123"))
        .await
        .unwrap();
    let second = store
        .sign_in_with_password(Credentials::new("new@x.example", "Secret123"))
        .await
        .unwrap();
    assert_eq!(first.user.id, second.user.id);
}

#[tokio::test]
async fn failed_sign_in_leaves_prior_session_untouched() {
    let store = store();
    store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", DEV_PASSWORD))
        .await
        .unwrap();

    let err = store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.code.as_deref(), Some(codes::INVALID_CREDENTIALS));

    let session = store.session().expect("prior session kept");
    assert_eq!(session.user.id, "user-admin");
}

#[tokio::test]
async fn sign_out_clears_session_and_token() {
    let store = store();
    store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", DEV_PASSWORD))
        .await
        .unwrap();
    assert!(store.access_token().is_some());

    store.sign_out().await.unwrap();
    assert!(store.session().is_none());
    assert!(store.access_token().is_none());
}

#[tokio::test]
async fn listeners_fire_in_registration_order() {
    let store = store();
    let order = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&order);
    store.on_auth_state_change(move |event, _| {
        first.lock().unwrap().push(("first", event.to_string()));
    });
    let second = Arc::clone(&order);
    store.on_auth_state_change(move |event, _| {
        second.lock().unwrap().push(("second", event.to_string()));
    });

    store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", DEV_PASSWORD))
        .await
        .unwrap();
    store.sign_out().await.unwrap();

    let order = order.lock().unwrap();
    assert_eq!(
        order.as_slice(),
        &[
            ("first", "SIGNED_IN".to_string()),
            ("second", "SIGNED_IN".to_string()),
            ("first", "SIGNED_OUT".to_string()),
            ("second", "SIGNED_OUT".to_string()),
        ]
    );
}

#[tokio::test]
async fn unsubscribed_listener_is_not_invoked() {
    let store = store();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let subscription = store.on_auth_state_change(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", DEV_PASSWORD))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    subscription.unsubscribe();
    store.sign_out().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn listener_observes_session_payload() {
    let store = store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    store.on_auth_state_change(move |event, session| {
        sink.lock()
            .unwrap()
            .push((event, session.map(|s| s.user.id.clone())));
    });

    store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", DEV_PASSWORD))
        .await
        .unwrap();
    store.sign_out().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[
            (AuthChangeEvent::SignedIn, Some("user-admin".to_string())),
            (AuthChangeEvent::SignedOut, None),
        ]
    );
}

#[tokio::test]
async fn session_round_trips_through_shared_storage() {
    let storage = Arc::new(MemoryStorage::new());

    struct Shared(Arc<MemoryStorage>);
    impl SessionStorage for Shared {
        fn load(&self, key: &str) -> Option<String> {
            self.0.load(key)
        }
        fn store(&self, key: &str, value: &str) {
            self.0.store(key, value)
        }
        fn remove(&self, key: &str) {
            self.0.remove(key)
        }
    }

    let store = SessionStore::new(
        Box::new(MockAuthBackend::new(seed_profiles())),
        Box::new(Shared(Arc::clone(&storage))),
        STORAGE_KEY,
    );
    store
        .sign_in_with_password(Credentials::new("sasha.nguyen@castor.example", DEV_PASSWORD))
        .await
        .unwrap();

    // A fresh store over the same storage restores the persisted session.
    let restored = SessionStore::new(
        Box::new(MockAuthBackend::new(seed_profiles())),
        Box::new(Shared(Arc::clone(&storage))),
        STORAGE_KEY,
    );
    assert_eq!(
        restored.session().map(|s| s.user.id),
        Some("user-admin".to_string())
    );
}

#[tokio::test]
async fn corrupt_persisted_session_restores_as_signed_out() {
    let storage = MemoryStorage::new();
    storage.store(STORAGE_KEY, "{not json");

    let store = SessionStore::new(
        Box::new(MockAuthBackend::new(seed_profiles())),
        Box::new(storage),
        STORAGE_KEY,
    );
    assert!(store.session().is_none());
}
