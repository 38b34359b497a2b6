mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    DeleteResult, ICalendarRepo, IEventRepo, IFeedbackRepo, IFormRepo, IRegistrationRepo,
    IReminderRepo, IReminderTransaction, ReminderRepoError, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct FeedbackContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notification_center: Arc<dyn INotificationCenter>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl FeedbackContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let notification_center = HttpNotificationCenter::new(
            &config.notification_center_url,
            Duration::from_secs(config.notification_timeout_secs),
        )
        .expect("Notification center client to be created");
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notification_center: Arc::new(notification_center),
        }
    }

    /// Context with inmemory repositories and notification center, used in tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notification_center: Arc::new(InMemoryNotificationCenter::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> FeedbackContext {
    FeedbackContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
