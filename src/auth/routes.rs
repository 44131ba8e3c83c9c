//! Login routes for staff and customer accounts
//!
//! `POST /api/users/login` and `POST /api/customers/login` accept
//! `{phone_number, password}`, verify the Argon2id hash and issue a 7-day
//! JWT. `GET /api/users/me` returns the profile behind a bearer token.
//!
//! Failure semantics: wrong phone number and wrong password both produce the
//! same 401 so the endpoint cannot be used to enumerate accounts; an account
//! whose status is not "active" gets a 403 after its password checks out.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use validator::Validate;

use crate::auth::context::{AuthContext, context_from_headers};
use crate::auth::jwt::{JwtConfig, SubjectKind, generate_token};
use crate::auth::password::verify_password;
use crate::core::entity::Entity;
use crate::core::envelope::ApiResponse;
use crate::core::error::{AuthError, Error, RequestError};
use crate::core::service::DataService;
use crate::entities::{Customer, User};

/// Shared state for the auth routes
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn DataService<User>>,
    pub customers: Arc<dyn DataService<Customer>>,
    pub jwt: JwtConfig,
}

/// Login payload for both staff and customer endpoints
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 8, message = "phone number is too short"))]
    pub phone_number: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Build the auth router
pub fn auth_routes(state: AuthState) -> Router {
    Router::new()
        .route("/api/users/login", post(login_user))
        .route("/api/customers/login", post(login_customer))
        .route("/api/users/me", get(me))
        .with_state(state)
}

/// POST /api/users/login
async fn login_user(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse>, Error> {
    check_payload(&payload)?;

    let matches = state
        .users
        .search("phone_number", &payload.phone_number)
        .await?;
    let user = matches.first().ok_or(AuthError::InvalidCredentials)?;

    verify_account_password(&payload.password, &user.password_hash)?;
    if !user.can_login() {
        return Err(AuthError::AccountDeactivated.into());
    }

    let token = generate_token(
        user.id(),
        SubjectKind::User,
        &user.role,
        user.permissions.clone(),
        &state.jwt,
    )
    .map_err(|e| Error::Internal(format!("token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id(), role = %user.role, "staff login");

    Ok(Json(ApiResponse::success(json!({
        "token": token,
        "profile": sanitize_profile(serde_json::to_value(user)?),
    }))))
}

/// POST /api/customers/login
async fn login_customer(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse>, Error> {
    check_payload(&payload)?;

    let matches = state
        .customers
        .search("phone_number", &payload.phone_number)
        .await?;
    let customer = matches.first().ok_or(AuthError::InvalidCredentials)?;

    verify_account_password(&payload.password, &customer.password_hash)?;
    if !customer.is_active() {
        return Err(AuthError::AccountDeactivated.into());
    }

    let token = generate_token(
        customer.id(),
        SubjectKind::Customer,
        "customer",
        vec![],
        &state.jwt,
    )
    .map_err(|e| Error::Internal(format!("token generation failed: {}", e)))?;

    tracing::info!(customer_id = %customer.id(), "customer login");

    Ok(Json(ApiResponse::success(json!({
        "token": token,
        "profile": sanitize_profile(serde_json::to_value(customer)?),
    }))))
}

/// GET /api/users/me: the staff profile behind a bearer token
async fn me(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse>, Error> {
    let context = context_from_headers(&headers, &state.jwt)?;

    match context {
        AuthContext::Staff { user_id, .. } => {
            let user = state
                .users
                .get(&user_id)
                .await?
                .ok_or(AuthError::InvalidToken)?;
            Ok(Json(ApiResponse::success(sanitize_profile(
                serde_json::to_value(&user)?,
            ))))
        }
        AuthContext::Customer { .. } => Err(AuthError::Forbidden {
            message: "staff endpoint".to_string(),
        }
        .into()),
        AuthContext::Anonymous => Err(AuthError::MissingToken.into()),
    }
}

/// Run the declarative payload checks, mapping failures to a 400
fn check_payload(payload: &LoginRequest) -> Result<(), Error> {
    payload.validate().map_err(|e| {
        Error::Request(RequestError::InvalidBody {
            message: e.to_string(),
        })
    })
}

/// Verify a password, folding hash-parse failures into the credentials error
/// so a corrupt hash cannot be distinguished from a wrong password.
fn verify_account_password(password: &str, hash: &str) -> Result<(), Error> {
    match verify_password(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::InvalidCredentials.into()),
        Err(e) => {
            tracing::error!(error = %e, "stored password hash failed to parse");
            Err(AuthError::InvalidCredentials.into())
        }
    }
}

/// Strip the password hash from a serialized profile
fn sanitize_profile(mut profile: Value) -> Value {
    if let Some(object) = profile.as_object_mut() {
        object.remove("password_hash");
    }
    profile
}
