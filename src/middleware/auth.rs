// ABOUTME: Bearer-token authentication for protected HTTP routes
// ABOUTME: Parses the Authorization header and resolves the caller's user id from the token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::sync::Arc;

use axum::http::HeaderMap;
use companion_core::constants::auth::BEARER_PREFIX;
use companion_core::errors::{AppError, AppResult};
use uuid::Uuid;

use crate::auth::AuthManager;

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Email embedded in the token
    pub email: String,
}

/// Middleware for bearer token authentication
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>) -> Self {
        Self { auth_manager }
    }

    /// Authenticate using the `Authorization` header of a request
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate_request`]
    pub fn authenticate_headers(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let auth_header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        self.authenticate_request(auth_header)
    }

    /// Authenticate a raw `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when the header is missing, `AuthMalformed` when it
    /// is not a bearer token, and the token validation error otherwise
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(header) = auth_header else {
            tracing::debug!("Authentication failed: missing authorization header");
            tracing::Span::current().record("success", false);
            return Err(AppError::auth_required());
        };

        let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
            tracing::warn!("Authentication failed: authorization header is not a bearer token");
            tracing::Span::current().record("success", false);
            return Err(AppError::auth_malformed(
                "Authorization header must be 'Bearer <token>'",
            ));
        };

        match self
            .auth_manager
            .validate_token(token.trim())
            .and_then(|claims| claims.user_id().map(|id| (id, claims.email)))
        {
            Ok((user_id, email)) => {
                tracing::Span::current()
                    .record("user_id", user_id.to_string())
                    .record("success", true);
                Ok(AuthResult { user_id, email })
            }
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::warn!("JWT authentication failed: {}", e);
                Err(e)
            }
        }
    }

    /// Underlying token manager
    #[must_use]
    pub fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::errors::ErrorCode;

    fn middleware() -> AuthMiddleware {
        AuthMiddleware::new(Arc::new(AuthManager::new(b"middleware-secret", 7)))
    }

    #[test]
    fn test_missing_header_requires_auth() {
        let err = middleware().authenticate_request(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.http_status(), 401);
    }

    #[test]
    fn test_non_bearer_scheme_is_malformed() {
        let err = middleware()
            .authenticate_request(Some("Basic dXNlcjpwYXNz"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthMalformed);
    }

    #[test]
    fn test_valid_bearer_token_resolves_user() {
        let middleware = middleware();
        let user_id = Uuid::new_v4();
        let token = middleware
            .auth_manager()
            .generate_token(user_id, "runner@example.com")
            .unwrap();
        let auth = middleware
            .authenticate_request(Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.email, "runner@example.com");
    }
}
