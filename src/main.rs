use anyhow::Context;
use solar_site_backend::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("solar-site-backend".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let config = get_configuration().context("Failed to read configuration")?;
    let application = Application::build(config).await?;
    tracing::info!(port = application.port(), "Server running");

    if let Err(e) = application.run_until_stopped().await {
        tracing::error!(error.cause_chain = ?e, error.message = %e, "API failed");
        return Err(e.into());
    }
    tracing::info!("API has exited");

    Ok(())
}
