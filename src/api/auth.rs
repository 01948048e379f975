//! Administrator authorization for the compliance endpoints.
//!
//! Tokens are provisioned through configuration and presented as
//! `Authorization: Token <key>` (`Bearer <key>` is accepted as well).

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// Extractor that only admits administrators.
///
/// Rejects with 401 when the token is missing or unknown and with 403 when
/// the token belongs to a non-administrator.
///
/// # Example
///
/// ```ignore
/// async fn admin_only(AdminUser(username): AdminUser) -> String {
///     format!("Hello, {}!", username)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(token_key)
            .ok_or_else(|| ApiErrorResponse::unauthorized("Authentication required"))?;

        let token = state.config().token(key).ok_or_else(|| {
            warn!("Rejected unknown access token");
            ApiErrorResponse::unauthorized("Invalid token")
        })?;

        if !token.is_admin {
            warn!(username = %token.username, "Non-administrator denied");
            return Err(ApiErrorResponse::forbidden());
        }

        Ok(AdminUser(token.username.clone()))
    }
}

/// Extracts the key from a `Token <key>` or `Bearer <key>` header value.
fn token_key(header: &str) -> Option<&str> {
    header
        .strip_prefix("Token ")
        .or_else(|| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_scheme() {
        assert_eq!(token_key("Token abc123"), Some("abc123"));
    }

    #[test]
    fn test_bearer_scheme() {
        assert_eq!(token_key("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert_eq!(token_key("Basic YWRtaW46cGFzcw=="), None);
        assert_eq!(token_key("abc123"), None);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(token_key("Token   "), None);
    }
}
