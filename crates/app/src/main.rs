use std::time::Duration;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "aidchain={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .wallet_allowance(settings.account.wallet_allowance)
        .build();

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting aidchain on {addr}");

    let phase_delay = Duration::from_millis(settings.server.phase_delay_ms);
    server::run_with_listener(engine, phase_delay, listener).await?;

    Ok(())
}
