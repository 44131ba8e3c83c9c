//! REST exposure: assembles the final axum router
//!
//! Takes the registry-generated entity routes, the auth routes and any
//! custom routes, adds health checks and the middleware stack (request
//! tracing + permissive CORS for the browser front-end).

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Merge all routers and apply the middleware stack
    pub fn assemble(entity_routes: Router, extra_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(entity_routes);

        for router in extra_routes {
            app = app.merge(router);
        }

        app.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "bureau"
        }))
    }
}
