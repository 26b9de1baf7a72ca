use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::authz::Authorizer;
use crate::domain::services::club_service::ClubService;
use crate::domain::services::post_service::PostService;
use crate::domain::services::schedule_service::ScheduleService;
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_club_repo::PostgresClubRepo,
    postgres_comment_repo::PostgresCommentRepo, postgres_membership_repo::PostgresMembershipRepo,
    postgres_post_repo::PostgresPostRepo, postgres_schedule_repo::PostgresScheduleRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_club_repo::SqliteClubRepo,
    sqlite_comment_repo::SqliteCommentRepo, sqlite_membership_repo::SqliteMembershipRepo,
    sqlite_post_repo::SqlitePostRepo, sqlite_schedule_repo::SqliteScheduleRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));
        let club_repo = Arc::new(PostgresClubRepo::new(pool.clone()));
        let membership_repo = Arc::new(PostgresMembershipRepo::new(pool.clone()));
        let schedule_repo = Arc::new(PostgresScheduleRepo::new(pool.clone()));
        let post_repo = Arc::new(PostgresPostRepo::new(pool.clone()));
        let comment_repo = Arc::new(PostgresCommentRepo::new(pool.clone()));
        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));

        assemble_state(
            config.clone(),
            user_repo, club_repo, membership_repo,
            schedule_repo, post_repo, comment_repo, auth_repo,
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let club_repo = Arc::new(SqliteClubRepo::new(pool.clone()));
        let membership_repo = Arc::new(SqliteMembershipRepo::new(pool.clone()));
        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let post_repo = Arc::new(SqlitePostRepo::new(pool.clone()));
        let comment_repo = Arc::new(SqliteCommentRepo::new(pool.clone()));
        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));

        assemble_state(
            config.clone(),
            user_repo, club_repo, membership_repo,
            schedule_repo, post_repo, comment_repo, auth_repo,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn assemble_state(
    config: Config,
    user_repo: Arc<dyn crate::domain::ports::UserRepository>,
    club_repo: Arc<dyn crate::domain::ports::ClubRepository>,
    membership_repo: Arc<dyn crate::domain::ports::MembershipRepository>,
    schedule_repo: Arc<dyn crate::domain::ports::ScheduleRepository>,
    post_repo: Arc<dyn crate::domain::ports::PostRepository>,
    comment_repo: Arc<dyn crate::domain::ports::CommentRepository>,
    auth_repo: Arc<dyn crate::domain::ports::AuthRepository>,
) -> AppState {
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

    AppState {
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
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
