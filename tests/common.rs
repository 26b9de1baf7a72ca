use club_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_club_repo::SqliteClubRepo,
        sqlite_comment_repo::SqliteCommentRepo,
        sqlite_membership_repo::SqliteMembershipRepo,
        sqlite_post_repo::SqlitePostRepo,
        sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    domain::services::auth_service::AuthService,
    domain::services::authz::Authorizer,
    domain::services::club_service::ClubService,
    domain::services::post_service::PostService,
    domain::services::schedule_service::ScheduleService,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use tower::ServiceExt;
use serde_json::Value;

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let club_repo = Arc::new(SqliteClubRepo::new(pool.clone()));
        let membership_repo = Arc::new(SqliteMembershipRepo::new(pool.clone()));
        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let post_repo = Arc::new(SqlitePostRepo::new(pool.clone()));
        let comment_repo = Arc::new(SqliteCommentRepo::new(pool.clone()));
        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));

        let authorizer = Arc::new(Authorizer::new(membership_repo.clone()));
        let club_service = Arc::new(ClubService::new(
            club_repo.clone(),
            membership_repo.clone(),
            authorizer.clone(),
        ));
        let schedule_service = Arc::new(ScheduleService::new(
            schedule_repo.clone(),
            authorizer.clone(),
        ));
        let post_service = Arc::new(PostService::new(
            post_repo.clone(),
            comment_repo.clone(),
            authorizer.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config,
            user_repo,
            club_repo,
            membership_repo,
            schedule_repo,
            post_repo,
            comment_repo,
            auth_repo,
            authorizer,
            club_service,
            schedule_service,
            post_service,
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a user and returns their id.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> String {
        let payload = serde_json::json!({
            "email": email,
            "name": name,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        body_json["id"].as_str().expect("No id in register response").to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Register + login in one call, returning (user_id, headers).
    pub async fn register_and_login(&self, email: &str, name: &str) -> (String, AuthHeaders) {
        let user_id = self.register(email, name, "test-password").await;
        let auth = self.login(email, "test-password").await;
        (user_id, auth)
    }

    /// No promotion endpoint exists in the API, so tests flip the system
    /// role directly in the store.
    pub async fn make_system_admin(&self, user_id: &str) {
        sqlx::query("UPDATE users SET system_role = 'ADMIN' WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("Failed to promote user to ADMIN");
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
