use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use storage::{Database, repository::user::UserRepository, services::access::Principal};

use crate::error::WebError;
use crate::jwt::JwtKeys;

/// State for the authentication layer
#[derive(Clone)]
pub struct AuthState {
    pub keys: JwtKeys,
    pub db: Database,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verifies the bearer token and attaches the caller's `Principal`.
///
/// The user is reloaded on every request so role changes and deletions
/// take effect before the token expires.
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(req.headers()).ok_or(WebError::Unauthorized)?;
    let claims = auth.keys.verify(token)?;

    let user = UserRepository::new(auth.db.pool())
        .find_optional(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = %claims.sub, "Token for unknown user");
            WebError::Unauthorized
        })?;

    req.extensions_mut().insert(Principal::from(&user));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
