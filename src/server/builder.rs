//! ServerBuilder for fluent API to build the HTTP server

use anyhow::Result;
use axum::Router;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::entity_registry::{CrudDescriptor, EntityRegistry};
use super::rest::RestExposure;
use crate::auth::routes::{AuthState, auth_routes};
use crate::core::entity::Document;
use crate::core::service::DataService;
use crate::core::validation::ValidatableEntity;

/// Builder for creating the HTTP server with auto-registered routes
///
/// All entity services, the auth state and any custom routes are bound here
/// once at process start; nothing is registered through mutable globals.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .register::<Service>(Arc::new(InMemoryDataService::new()))
///     .register::<Customer>(customers.clone())
///     .with_auth(AuthState { users, customers, jwt })
///     .build()?;
/// ```
pub struct ServerBuilder {
    registry: EntityRegistry,
    auth: Option<AuthState>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            registry: EntityRegistry::new(),
            auth: None,
            custom_routes: Vec::new(),
        }
    }

    /// Register an entity with its storage service
    ///
    /// This mounts the full CRUD route set under `/api/{plural}` and makes
    /// the entity resolvable by populate.
    pub fn register<T>(mut self, service: Arc<dyn DataService<T>>) -> Self
    where
        T: Document + ValidatableEntity + Serialize + DeserializeOwned,
    {
        self.registry
            .register(Box::new(CrudDescriptor::<T>::new(service)));
        self
    }

    /// Mount the login/me routes
    pub fn with_auth(mut self, auth: AuthState) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes that don't fit the CRUD pattern (webhooks,
    /// exports, dashboard aggregates...).
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// This generates:
    /// - CRUD routes for all registered entities
    /// - Login routes when auth is configured
    /// - Health check routes and the middleware stack
    pub fn build(mut self) -> Result<Router> {
        let fetchers = Arc::new(self.registry.build_fetchers());
        let entity_routes = self.registry.build_routes(fetchers);

        let mut extra = std::mem::take(&mut self.custom_routes);
        if let Some(auth) = self.auth.take() {
            extra.push(auth_routes(auth));
        }

        Ok(RestExposure::assemble(entity_routes, extra))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the provided address and handles SIGTERM and Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
