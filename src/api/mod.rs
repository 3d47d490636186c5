//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! Feed endpoints are mounted under `/api`; health sits at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every HTTP endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "relay-feed", description = "Live message relay over Server-Sent Events"),
    paths(
        handlers::messages::publish_handler,
        crate::sse::handler::subscribe_handler,
        handlers::system::health_handler,
        handlers::system::stats_handler,
    ),
    components(schemas(
        crate::domain::Event,
        dto::PublishRequest,
        dto::PublishResponse,
        dto::HealthResponse,
        dto::StatsResponse,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Messages", description = "Publish and subscribe"),
        (name = "System", description = "Health and statistics"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST and stream endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_feed_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/messages"));
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/api/stats"));
    }
}
