use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::change_password;
use super::handlers::auth::delete_account;
use super::handlers::auth::login;
use super::handlers::auth::logout;
use super::handlers::auth::me;
use super::handlers::auth::refresh;
use super::handlers::auth::signup;
use super::handlers::auth::update_profile;
use super::handlers::health::health;
use super::handlers::items::create_item;
use super::handlers::items::delete_item;
use super::handlers::items::list_items;
use super::handlers::items::reorder_items;
use super::handlers::items::toggle_item;
use super::handlers::items::update_item;
use super::handlers::lists::create_list;
use super::handlers::lists::delete_list;
use super::handlers::lists::get_list;
use super::handlers::lists::list_lists;
use super::handlers::lists::update_list;
use super::handlers::ApiError;
use super::middleware::authenticate;
use crate::domain::access::gate::OwnershipGate;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::item::service::ItemService;
use crate::domain::list::ports::ListRepository;
use crate::domain::list::ports::ListServicePort;
use crate::domain::list::service::ListService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

/// Shared state for every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub list_service: Arc<dyn ListServicePort>,
    pub item_service: Arc<dyn ItemServicePort>,
    pub authenticator: Arc<Authenticator>,
    /// Mark the refresh cookie `Secure`.
    pub secure_cookies: bool,
    pub refresh_cookie_max_age: time::Duration,
}

impl AppState {
    /// Wire the domain services over one set of repositories.
    ///
    /// List and item services share a single [`OwnershipGate`].
    pub fn new<UR, LR, IR>(
        users: Arc<UR>,
        lists: Arc<LR>,
        items: Arc<IR>,
        authenticator: Arc<Authenticator>,
        secure_cookies: bool,
        refresh_cookie_max_age: time::Duration,
    ) -> Self
    where
        UR: UserRepository,
        LR: ListRepository,
        IR: ItemRepository,
    {
        let gate = Arc::new(OwnershipGate::new(Arc::clone(&lists), Arc::clone(&items)));

        Self {
            user_service: Arc::new(UserService::new(users)),
            list_service: Arc::new(ListService::new(
                lists,
                Arc::clone(&items),
                Arc::clone(&gate),
            )),
            item_service: Arc::new(ItemService::new(items, gate)),
            authenticator,
            secure_cookies,
            refresh_cookie_max_age,
        }
    }
}

pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    // Sibling routes must use the same parameter name at the same position.
    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/auth/profile", put(update_profile))
        .route("/api/auth/password", put(change_password))
        .route("/api/auth/account", delete(delete_account))
        .route("/api/lists", get(list_lists).post(create_list))
        .route(
            "/api/lists/:id",
            get(get_list).put(update_list).delete(delete_list),
        )
        .route("/api/lists/:id/items", get(list_items).post(create_item))
        .route(
            "/api/items/lists/:id/items",
            get(list_items).post(create_item),
        )
        .route("/api/items/reorder", post(reorder_items))
        .route("/api/items/:id", put(update_item).delete(delete_item))
        .route("/api/items/:id/toggle", patch(toggle_item))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                user_id = tracing::field::Empty,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Shopping List API is running",
    })
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
