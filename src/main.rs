use user_records::configuration::get_configuration;
use user_records::startup::Application;
use user_records::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("user_records".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration, None).await?;
    application.run_until_stopped().await?;
    Ok(())
}
