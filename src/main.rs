//! bureau-server: the business-management API binary
//!
//! Wires every entity to the configured storage backend, mounts the auth
//! routes and serves until SIGTERM/Ctrl+C. The storage backend is chosen at
//! compile time: in-memory by default, MongoDB with `--features
//! mongodb_backend`.

use anyhow::Result;
use std::sync::Arc;

use bureau::auth::routes::AuthState;
use bureau::config::AppConfig;
use bureau::core::service::DataService;
use bureau::entities::{
    Contract, Customer, Project, Service, ServiceRequest, Task, Team, Transaction, User,
};
use bureau::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bureau=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let server = configure(&config).await?;

    server.serve(&config.addr).await
}

/// Build the server against the in-memory backend (default feature)
#[cfg(not(feature = "mongodb_backend"))]
async fn configure(config: &AppConfig) -> Result<ServerBuilder> {
    use bureau::storage::InMemoryDataService;

    tracing::info!("using in-memory storage");

    let users: Arc<dyn DataService<User>> = Arc::new(InMemoryDataService::new());
    let customers: Arc<dyn DataService<Customer>> = Arc::new(InMemoryDataService::new());

    Ok(ServerBuilder::new()
        .register::<Customer>(customers.clone())
        .register::<User>(users.clone())
        .register::<Service>(Arc::new(InMemoryDataService::new()))
        .register::<ServiceRequest>(Arc::new(InMemoryDataService::new()))
        .register::<Contract>(Arc::new(InMemoryDataService::new()))
        .register::<Project>(Arc::new(InMemoryDataService::new()))
        .register::<Task>(Arc::new(InMemoryDataService::new()))
        .register::<Team>(Arc::new(InMemoryDataService::new()))
        .register::<Transaction>(Arc::new(InMemoryDataService::new()))
        .with_auth(AuthState {
            users,
            customers,
            jwt: config.jwt.clone(),
        }))
}

/// Build the server against MongoDB
#[cfg(feature = "mongodb_backend")]
async fn configure(config: &AppConfig) -> Result<ServerBuilder> {
    use bureau::storage::MongoDataService;

    let client = mongodb::Client::with_uri_str(&config.mongodb_uri).await?;
    let db = client.database(&config.mongodb_db);
    tracing::info!(db = %config.mongodb_db, "connected to MongoDB");

    let users: Arc<dyn DataService<User>> = Arc::new(MongoDataService::new(db.clone()));
    let customers: Arc<dyn DataService<Customer>> = Arc::new(MongoDataService::new(db.clone()));

    Ok(ServerBuilder::new()
        .register::<Customer>(customers.clone())
        .register::<User>(users.clone())
        .register::<Service>(Arc::new(MongoDataService::new(db.clone())))
        .register::<ServiceRequest>(Arc::new(MongoDataService::new(db.clone())))
        .register::<Contract>(Arc::new(MongoDataService::new(db.clone())))
        .register::<Project>(Arc::new(MongoDataService::new(db.clone())))
        .register::<Task>(Arc::new(MongoDataService::new(db.clone())))
        .register::<Team>(Arc::new(MongoDataService::new(db.clone())))
        .register::<Transaction>(Arc::new(MongoDataService::new(db)))
        .with_auth(AuthState {
            users,
            customers,
            jwt: config.jwt.clone(),
        }))
}
