//! faultline web host
//!
//! - Loads `faultline.yaml` (or the path given as the first argument)
//! - Attaches the exception strategy to dispatch.error / render.error
//! - Serves the routes behind the error pipeline

use tracing_subscriber::{fmt, EnvFilter};

use faultline_web::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "faultline.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen = cfg.server.listen_addr().expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "faultline-web starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
