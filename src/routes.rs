// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, customers, genres, movies, rentals, users},
    state::AppState,
    utils::jwt::{AUTH_TOKEN_HEADER, admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Every entity gets a public, an authenticated and an admin-only group,
///   merged under its `/api/...` prefix.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (database pool, config).
pub fn create_router(state: AppState) -> Router {
    let auth_layer = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let genre_routes = Router::new()
        .route("/", get(genres::list_genres))
        .route("/{id}", get(genres::get_genre))
        .merge(
            Router::new()
                .route("/", post(genres::create_genre))
                .route("/{id}", put(genres::update_genre))
                .route_layer(auth_layer()),
        )
        .merge(
            Router::new()
                .route("/{id}", delete(genres::delete_genre))
                // Auth first, then Admin check (layers run outside in)
                .route_layer(middleware::from_fn(admin_middleware))
                .route_layer(auth_layer()),
        );

    let customer_routes = Router::new()
        .route("/", get(customers::list_customers))
        .route("/{id}", get(customers::get_customer))
        .merge(
            Router::new()
                .route("/", post(customers::create_customer))
                .route("/{id}", put(customers::update_customer))
                .route_layer(auth_layer()),
        )
        .merge(
            Router::new()
                .route("/{id}", delete(customers::delete_customer))
                .route_layer(middleware::from_fn(admin_middleware))
                .route_layer(auth_layer()),
        );

    let movie_routes = Router::new()
        .route("/", get(movies::list_movies))
        .route("/{id}", get(movies::get_movie))
        .merge(
            Router::new()
                .route("/", post(movies::create_movie))
                .route("/{id}", put(movies::update_movie))
                .route_layer(auth_layer()),
        )
        .merge(
            Router::new()
                .route("/{id}", delete(movies::delete_movie))
                .route_layer(middleware::from_fn(admin_middleware))
                .route_layer(auth_layer()),
        );

    let user_routes = Router::new()
        .route("/", post(users::register))
        .merge(
            Router::new()
                .route("/me", get(users::me))
                .route("/{id}", get(users::get_user).put(users::update_user))
                .route_layer(auth_layer()),
        )
        .merge(
            Router::new()
                .route("/", get(users::list_users))
                .route_layer(middleware::from_fn(admin_middleware))
                .route_layer(auth_layer()),
        );

    let rental_routes = Router::new()
        .route("/", get(rentals::list_rentals))
        .route("/{id}", get(rentals::get_rental))
        .merge(
            Router::new()
                .route("/", post(rentals::create_rental))
                .route_layer(auth_layer()),
        );

    let auth_routes = Router::new().route("/", post(auth::login));

    Router::new()
        .nest("/api/genres", genre_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/movies", movie_routes)
        .nest("/api/users", user_routes)
        .nest("/api/rentals", rental_routes)
        .nest("/api/auth", auth_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(AUTH_TOKEN_HEADER),
        ])
        .expose_headers([HeaderName::from_static(AUTH_TOKEN_HEADER)])
}
