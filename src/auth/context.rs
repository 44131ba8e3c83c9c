//! Authorization context and policies
//!
//! The context is decoded from a bearer token's claims; policies describe
//! which contexts may perform an operation. The front-end decodes the same
//! claims from local storage to gate role-specific views, so the policy
//! vocabulary here mirrors what the token carries: kind, role, permissions.

use axum::http::HeaderMap;

use crate::auth::jwt::{Claims, JwtConfig, SubjectKind, validate_token};
use crate::core::error::AuthError;
use uuid::Uuid;

/// Authorization context extracted from a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated staff account
    Staff {
        user_id: Uuid,
        role: String,
        permissions: Vec<String>,
    },

    /// Authenticated customer account
    Customer { customer_id: Uuid },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Build a context from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        match claims.kind {
            SubjectKind::User => AuthContext::Staff {
                user_id: claims.sub,
                role: claims.role.clone(),
                permissions: claims.permissions.clone(),
            },
            SubjectKind::Customer => AuthContext::Customer {
                customer_id: claims.sub,
            },
        }
    }

    /// Get the subject id if authenticated
    pub fn subject_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::Staff { user_id, .. } => Some(*user_id),
            AuthContext::Customer { customer_id } => Some(*customer_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Check if context represents an admin staff account
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::Staff { role, .. } if role == "admin")
    }

    /// Check if the context carries a permission claim
    pub fn has_permission(&self, permission: &str) -> bool {
        match self {
            AuthContext::Staff { permissions, .. } => {
                permissions.iter().any(|p| p == permission)
            }
            _ => false,
        }
    }
}

/// Extract the auth context from request headers.
///
/// Returns `Anonymous` when no `Authorization` header is present and an
/// error when a bearer token is present but invalid.
pub fn context_from_headers(
    headers: &HeaderMap,
    config: &JwtConfig,
) -> Result<AuthContext, AuthError> {
    let Some(header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(AuthContext::Anonymous);
    };

    let value = header.to_str().map_err(|_| AuthError::InvalidToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)?;

    let claims = validate_token(token, config).map_err(|_| AuthError::InvalidToken)?;
    Ok(AuthContext::from_claims(&claims))
}

/// Authorization policy for an operation
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated account
    Authenticated,

    /// Staff account with one of these roles
    HasRole(Vec<String>),

    /// Staff account carrying a permission claim
    HasPermission(String),

    /// Admin staff only
    AdminOnly,

    /// Combination of policies (OR)
    Or(Vec<AuthPolicy>),
}

impl AuthPolicy {
    /// Check if an auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,

            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),

            AuthPolicy::HasRole(required_roles) => match context {
                AuthContext::Staff { role, .. } => required_roles.contains(role),
                _ => false,
            },

            AuthPolicy::HasPermission(permission) => context.has_permission(permission),

            AuthPolicy::AdminOnly => context.is_admin(),

            AuthPolicy::Or(policies) => policies.iter().any(|p| p.check(context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_token;

    fn staff_context(role: &str, permissions: Vec<&str>) -> AuthContext {
        AuthContext::Staff {
            user_id: Uuid::new_v4(),
            role: role.to_string(),
            permissions: permissions.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_policy_check_roles() {
        let manager = staff_context("manager", vec![]);

        assert!(AuthPolicy::Authenticated.check(&manager));
        assert!(AuthPolicy::HasRole(vec!["manager".into()]).check(&manager));
        assert!(!AuthPolicy::HasRole(vec!["admin".into()]).check(&manager));
        assert!(!AuthPolicy::AdminOnly.check(&manager));

        assert!(AuthPolicy::Public.check(&AuthContext::Anonymous));
        assert!(!AuthPolicy::Authenticated.check(&AuthContext::Anonymous));
    }

    #[test]
    fn test_policy_check_permissions() {
        let bookkeeper = staff_context("employee", vec!["transactions:read"]);

        assert!(AuthPolicy::HasPermission("transactions:read".into()).check(&bookkeeper));
        assert!(!AuthPolicy::HasPermission("transactions:write".into()).check(&bookkeeper));
    }

    #[test]
    fn test_policy_check_or() {
        let admin = staff_context("admin", vec![]);
        let policy = AuthPolicy::Or(vec![
            AuthPolicy::HasPermission("exports:run".into()),
            AuthPolicy::AdminOnly,
        ]);
        assert!(policy.check(&admin));
        assert!(!policy.check(&AuthContext::Anonymous));
    }

    #[test]
    fn test_customer_context_has_no_role() {
        let customer = AuthContext::Customer {
            customer_id: Uuid::new_v4(),
        };
        assert!(!customer.is_admin());
        assert!(!AuthPolicy::HasRole(vec!["admin".into()]).check(&customer));
        assert!(AuthPolicy::Authenticated.check(&customer));
    }

    #[test]
    fn test_context_from_headers_roundtrip() {
        let config = JwtConfig::new("context-test-secret");
        let id = Uuid::new_v4();
        let token = generate_token(
            id,
            SubjectKind::User,
            "admin",
            vec!["users:write".to_string()],
            &config,
        )
        .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );

        let context = context_from_headers(&headers, &config).unwrap();
        assert_eq!(context.subject_id(), Some(id));
        assert!(context.is_admin());
    }

    #[test]
    fn test_context_from_headers_missing_is_anonymous() {
        let config = JwtConfig::new("context-test-secret");
        let context = context_from_headers(&HeaderMap::new(), &config).unwrap();
        assert!(matches!(context, AuthContext::Anonymous));
    }

    #[test]
    fn test_context_from_headers_rejects_malformed() {
        let config = JwtConfig::new("context-test-secret");
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer not.a.token".parse().unwrap(),
        );
        assert!(context_from_headers(&headers, &config).is_err());
    }
}
