use sqlx::PgPool;
use storage::{
    dto::user::{LoginRequest, LoginResponse, UserResponse},
    repository::user::UserRepository,
    services::access::Principal,
};

use crate::error::{WebError, WebResult};
use crate::jwt::JwtKeys;

/// Check credentials and issue an access token
pub async fn login(pool: &PgPool, keys: &JwtKeys, req: &LoginRequest) -> WebResult<LoginResponse> {
    let repo = UserRepository::new(pool);

    let user = match repo.find_by_email(&req.email).await? {
        Some(user) if user.verify_password(&req.password) => user,
        _ => {
            tracing::warn!("Failed login attempt");
            return Err(WebError::Unauthorized);
        }
    };

    let token = keys.issue(&user)?;
    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: keys.ttl_seconds(),
        user: UserResponse::from(user),
    })
}

/// The user behind the current token
pub async fn current_user(pool: &PgPool, principal: &Principal) -> WebResult<UserResponse> {
    let user = UserRepository::new(pool).find_by_id(principal.user_id).await?;
    Ok(UserResponse::from(user))
}
