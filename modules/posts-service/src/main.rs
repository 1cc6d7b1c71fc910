//! Posts Service — standalone binary serving CRUD and search over in-memory posts.
//!
//! Default: http://0.0.0.0:5002/posts

mod config;
mod error;
mod routes;
mod search;
mod store;
mod validate;

use config::Config;
use routes::AppState;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let seed = config.load_seed().unwrap_or_else(|e| {
        log::error!("{}", e);
        std::process::exit(1);
    });
    log::info!("Seeded store with {} posts", seed.len());

    let state = Arc::new(AppState {
        store: Arc::new(store::PostStore::new(seed)),
        search_mode: config.search_mode,
        start_time: Instant::now(),
    });
    log::info!("Search mode: {}", config.search_mode);

    let app = routes::router(state);

    let addr = config.addr();
    log::info!("Posts Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
