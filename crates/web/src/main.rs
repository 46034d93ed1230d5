use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use chess_pie_core::{GameId, GameRegistry};

mod config;
mod routes;

use config::Config;

pub struct AppState {
    pub games: GameRegistry,
    pub default_game: GameId,
}

impl AppState {
    pub fn new(default_game: GameId, max_games: usize) -> Self {
        Self {
            games: GameRegistry::with_limit(max_games),
            default_game,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", get(routes::start))
        .route("/move", get(routes::make_move))
        .route("/board", get(routes::board))
        .route("/games", post(routes::create_game))
        .route("/games/:id", delete(routes::delete_game))
        .route("/view", get(routes::view::board_view))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(config.default_game.clone(), config.max_games));

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
