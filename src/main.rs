use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use globaledu_backend::config;
use globaledu_backend::geoip::{self, GeoLocator};
use globaledu_backend::scraper::NullScraper;
use globaledu_backend::session::SessionKeys;
use state::{AppState, JoinRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "globaledu_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config()?;
    config::init_config(app_config.clone())?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);
    tracing::info!("Build time: {}", env!("BUILD_TIME"));

    // Open the GeoIP database early so the first visitor does not pay for it / 预加载GeoIP数据库
    let manager = geoip::get_geoip_manager();
    if !manager.read().is_loaded() {
        tracing::warn!(
            "No GeoIP database in {:?}, country detection relies on the remote provider",
            app_config.get_geoip_dir()
        );
    }

    let state = Arc::new(AppState {
        geo: GeoLocator::from_config(&app_config.geoip),
        scraper: Arc::new(NullScraper),
        sessions: SessionKeys::from_config(&app_config.auth),
        joins: JoinRegistry::new(),
        config: app_config.clone(),
    });

    let app = api::build_router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>()).await?;

    Ok(())
}
