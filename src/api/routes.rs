//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateItemRequest, ErrorResponse, FieldError, HealthResponse, ItemResponse,
    UpdateItemRequest,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "CRUD API for managing items over a local SQLite store",
        license(name = "MIT")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_items,
        handlers::get_item,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item,
    ),
    components(
        schemas(
            HealthResponse,
            ItemResponse,
            CreateItemRequest,
            UpdateItemRequest,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    // Item routes (generic over Database)
    let item_routes = routes!(D => {
        get "/items" => handlers::list_items,
        get "/items/{id}" => handlers::get_item,
        post "/items" => handlers::create_item,
        put "/items/{id}" => handlers::update_item,
        delete "/items/{id}" => handlers::delete_item,
    });

    system_routes
        .merge(item_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
