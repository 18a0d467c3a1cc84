use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tra_timetable::config::AppConfig;
use tra_timetable::repository::TrainRepository;
use tra_timetable::settings::SettingsStore;
use tra_timetable::tdx::TdxClient;
use tra_timetable::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let settings = Arc::new(SettingsStore::open(config.settings_path.clone())?);
    if !settings.credentials().await.is_complete() {
        match config.seed_credentials.clone() {
            Some(seed) => {
                info!("seeding TDX credentials from the environment");
                settings.set_credentials(seed).await?;
            }
            None => warn!(
                "no TDX credentials configured; set them with PUT /api/credentials \
                 or TDX_CLIENT_ID/TDX_CLIENT_SECRET"
            ),
        }
    }

    let client = TdxClient::new(config.tdx.clone())?;
    let repo = TrainRepository::new(client, settings, &config.cache);

    // Warm both caches so the first screen renders without waiting.
    let (stations, alerts) = futures::join!(repo.fetch_all_stations(), repo.fetch_alerts(false));
    info!(
        cities = stations.len(),
        alerts = alerts.len(),
        "initial fetch complete"
    );

    let app = create_router(AppState::new(repo));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        addr = %config.listen_addr,
        settings = %config.settings_path.display(),
        "TRA timetable listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
