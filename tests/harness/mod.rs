//! Shared test harness: a fully wired in-memory application
//!
//! Builds the same router the binary serves (all nine entities + auth) over
//! in-memory storage, and keeps handles to the user/customer services so
//! tests can seed accounts with properly hashed passwords.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use serde_json::Value;
use tower::ServiceExt;

use bureau::auth::jwt::JwtConfig;
use bureau::auth::password::hash_password;
use bureau::auth::routes::AuthState;
use bureau::client::{Method, Transport};
use bureau::core::envelope::ApiResponse;
use bureau::core::service::DataService;
use bureau::entities::{
    Contract, Customer, Project, Service, ServiceRequest, Task, Team, Transaction, User,
};
use bureau::server::ServerBuilder;
use bureau::storage::InMemoryDataService;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// A wired application plus the service handles tests seed through
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryDataService<User>>,
    pub customers: Arc<InMemoryDataService<Customer>>,
}

pub fn build_app() -> TestApp {
    let users = Arc::new(InMemoryDataService::<User>::new());
    let customers = Arc::new(InMemoryDataService::<Customer>::new());

    let router = ServerBuilder::new()
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
            users: users.clone(),
            customers: customers.clone(),
            jwt: JwtConfig::new(TEST_JWT_SECRET),
        })
        .build()
        .expect("test app should build");

    TestApp {
        router,
        users,
        customers,
    }
}

/// Seed a staff account with a real Argon2id hash
pub async fn seed_user(app: &TestApp, name: &str, phone: &str, password: &str, role: &str) -> User {
    let user = User::new(
        name.to_string(),
        "active".to_string(),
        phone.to_string(),
        hash_password(password).expect("hashing succeeds"),
        role.to_string(),
        vec![],
    );
    app.users.create(user).await.expect("seed user")
}

/// Seed a customer account with a real Argon2id hash
pub async fn seed_customer(app: &TestApp, name: &str, phone: &str, password: &str) -> Customer {
    let customer = Customer::new(
        name.to_string(),
        "active".to_string(),
        phone.to_string(),
        format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        hash_password(password).expect("hashing succeeds"),
        None,
        None,
    );
    app.customers.create(customer).await.expect("seed customer")
}

/// In-process transport driving the real router, for renderer tests
pub struct RouterTransport {
    router: Router,
}

impl RouterTransport {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for RouterTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        let builder = axum::http::Request::builder()
            .method(method.as_str())
            .uri(path);

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| anyhow::anyhow!("router call failed: {:?}", e))?;

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
