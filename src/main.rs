mod telemetry;

use notimailer_infra::{run_migration, setup_context};
use notimailer_tasks::Application;
use telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("notimailer".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .expect("Database migrations should run");

    let (context, job_rx) = setup_context().await;

    let app = Application::new(context, job_rx);
    app.start().await;
    Ok(())
}
