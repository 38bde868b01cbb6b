use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api: Router<AppState> = Router::new()
        .route("/api/calculate", post(handlers::calculate_api))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::index))
        .route("/prefs/mode", post(handlers::set_mode))
        .route("/prefs/theme", post(handlers::set_theme))
        .route("/calculate", post(handlers::calculate_form))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/favicon.ico", get(handlers::favicon))
        .merge(api)
        .with_state(state)
}
