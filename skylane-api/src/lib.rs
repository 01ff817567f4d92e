use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod error;
pub mod flights;
pub mod mappers;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route(
            "/v1/flights",
            post(flights::create_flight).get(flights::list_flights),
        )
        .route("/v1/flights/search", get(flights::search_flights))
        .route("/v1/flights/tickets", get(flights::list_flights_with_tickets))
        .route("/v1/flights/{id}", get(flights::get_flight))
        .route("/v1/flights/{id}/times", put(flights::update_flight_times))
        .route(
            "/v1/admins",
            post(admin::create_admin)
                .get(admin::list_admins)
                .put(admin::update_admin),
        )
        .route("/v1/admins/{id}", get(admin::get_admin))
        .route(
            "/v1/admins/by-user/{user_id}",
            get(admin::get_admin_by_user).delete(admin::delete_admin),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
