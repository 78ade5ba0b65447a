use catalog_mock::{MockConfig, MockState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_mock=info,tower_http=info".into()),
        )
        .init();

    let config = MockConfig::from_env();
    let port = config.port;
    info!(email = %config.admin_email, "Seeded admin account");

    let state = MockState::seeded(config).shared();
    let app = catalog_mock::router(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("catalog-mock listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
