use std::sync::Arc;

use veriframe::config::Config;
use veriframe::detector::{Detector, OnnxDetector};
use veriframe::server::{AppState, build_router};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .unwrap_or_else(|e| panic!("Failed to create upload dir {:?}: {}", config.upload_dir, e));

    // Model is loaded once here and shared read-only across requests.
    let detector: Arc<dyn Detector> = Arc::new(
        OnnxDetector::load(&config.model_path)
            .unwrap_or_else(|e| panic!("Failed to load model {:?}: {}", config.model_path, e)),
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        config: Arc::new(config),
        detector,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    log::info!("listening on http://{}", addr);
    axum::serve(listener, app).await.expect("Server failed");
}
