use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, catalog, data};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Document service: liveness and the raw collection
    let document_routes = Router::new()
        .route("/", get(data::health))
        .route("/data", get(data::list_documents));

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        );

    // Public catalog and pricing, plus sign-in
    let api_routes = Router::new()
        .route("/cities", get(catalog::list_cities))
        .route("/cars", get(catalog::list_cars))
        .route("/quote", post(catalog::quote))
        .nest("/auth", auth_routes);

    // Combine all routes
    Router::new()
        .merge(document_routes)
        .nest("/api", api_routes)
        .with_state(state)
}
