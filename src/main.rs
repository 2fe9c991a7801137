use std::sync::Arc;

use paddock::config::AppConfig;
use paddock::routes;
use paddock::services::gateway::HttpGateway;
use paddock::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("configuration failed");
    let gateway = HttpGateway::from_config(&config).expect("HTTP client init failed");

    let port = config.port;
    let state = AppState::new(config, Arc::new(gateway));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "paddock listening");
    axum::serve(listener, app).await.expect("server failed");
}
