//! Application state and router builder
//!
//! Defines the shared application state and builds the Axum router with all
//! routes and middleware. Protected routes sit behind a bearer-token layer
//! that resolves the session through the identity manager and injects the
//! resulting [`CurrentUser`] into request extensions, so authentication
//! failures short-circuit before any task-store operation runs.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use ticklist_core::{identity::IdentityManager, models::CurrentUser, store::TaskStore};

use crate::config::Config;
use crate::error::ApiError;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses `Arc`
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// User records and session tokens
    pub identity: Arc<IdentityManager>,

    /// Per-user task collections
    pub tasks: Arc<TaskStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state with empty tables
    pub fn new(config: Config) -> Self {
        Self {
            identity: Arc::new(IdentityManager::new()),
            tasks: Arc::new(TaskStore::new()),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router
///
/// # Route layout
///
/// ```text
/// /
/// ├── GET  /                    # Health probe (public)
/// ├── GET  /health              # Health probe (public)
/// ├── POST /register            # Create account, returns token (public)
/// ├── POST /login               # Returns fresh token (public)
/// ├── POST /logout              # Drops the session (bearer, idempotent)
/// ├── GET  /me                  # Current user profile (bearer)
/// └── /todos                    # Task collection (bearer)
///     ├── POST   /              # Create task
///     ├── GET    /              # List tasks
///     ├── GET    /:id           # Get task
///     ├── PUT    /:id           # Replace task
///     ├── PATCH  /:id           # Partial update
///     ├── PATCH  /:id/toggle    # Flip completed
///     └── DELETE /:id           # Delete task
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: health probe and the credential exchange endpoints.
    // Logout is public on purpose; it reads the bearer header itself and
    // succeeds whether or not the token still maps to a session.
    let public_routes = Router::new()
        .route("/", get(routes::health::health_check))
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout));

    // Everything else requires a resolvable session token.
    let protected_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .route("/todos", post(routes::todos::create_todo))
        .route("/todos", get(routes::todos::list_todos))
        .route("/todos/:id", get(routes::todos::get_todo))
        .route("/todos/:id", put(routes::todos::replace_todo))
        .route("/todos/:id", patch(routes::todos::update_todo))
        .route("/todos/:id/toggle", patch(routes::todos::toggle_todo))
        .route("/todos/:id", delete(routes::todos::delete_todo))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    // Configure CORS based on configuration
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Extracts the bearer token from the Authorization header
///
/// Shared between the auth middleware and the logout handler.
pub(crate) fn bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))
}

/// Session authentication middleware layer
///
/// Resolves the bearer token against the session table and injects
/// [`CurrentUser`] into request extensions.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let current_user: CurrentUser = state.identity.resolve(token)?;

    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}
