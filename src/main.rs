mod telemetry;

use sac_event_feedback_api::Application;
use sac_event_feedback_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("sac_event_feedback_server".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .expect("Failed to run the database migrations");
    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
