// Integration tests driving the HTTP surface through actix's test harness
use crate::models::{Role, User, VisibilityFallback};
use crate::services::visibility_gate::VisibilityGate;
use crate::utils::jwt;
use crate::utils::store::DataStore;
use crate::AppState;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

macro_rules! test_app {
    ($env:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($env.state.clone()))
                .configure(crate::routes::init_routes),
        )
        .await
    };
}


// Isolated storage directory per test, removed on drop
pub(crate) struct TestEnv {
    pub state: AppState,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_fallback(VisibilityFallback::Allow)
    }

    pub fn with_fallback(fallback: VisibilityFallback) -> Self {
        let root = std::env::temp_dir().join(format!("steward-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&root).unwrap();
        Self {
            state: AppState::new(DataStore::new(root.clone()), VisibilityGate::new(fallback)),
            root,
        }
    }

    // Store a user directly and mint a token for it
    pub fn session(&self, tenant_id: Uuid, role: Role) -> (User, String) {
        let id = Uuid::new_v4();
        let user = User {
            id,
            tenant_id,
            email: format!("{}-{}@gracechurch.org", role, id.simple()),
            display_name: None,
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        };
        self.state.store.save_user(&user).unwrap();
        let token = jwt::generate_token(&user).unwrap();
        (user, token)
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub(crate) fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
