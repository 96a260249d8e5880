use backend::store::RedisTaskStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Config {
    redis_url: String,
    port: u16,
}

impl Config {
    fn from_env() -> Self {
        let redis_url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);
        Self { redis_url, port }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let store = RedisTaskStore::open(&config.redis_url).expect("Failed to open Redis client");

    let app = backend::app(Arc::new(store));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    info!(port = config.port, redis_url = %config.redis_url, "server running");
    axum::serve(listener, app).await.expect("Server error");
}
