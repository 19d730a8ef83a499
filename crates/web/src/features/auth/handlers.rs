use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{LoginRequest, LoginResponse, UserResponse},
    services::access::Principal,
};
use validator::Validate;

use crate::error::WebError;
use crate::jwt::JwtKeys;

use super::services;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Wrong credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    Extension(keys): Extension<JwtKeys>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::login(db.pool(), &keys, &req).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn me(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, WebError> {
    let user = services::current_user(db.pool(), &principal).await?;

    Ok(Json(user).into_response())
}
