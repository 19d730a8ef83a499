use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse},
    repository::user::UserRepository,
    services::access::{Action, Principal, Resource, authorize},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_users(
    pool: &PgPool,
    principal: &Principal,
    page: PaginationParams,
) -> WebResult<(Vec<UserResponse>, i64)> {
    authorize(principal, Action::Update, &Resource::User)?;

    let (users, total) = UserRepository::new(pool).list(page).await?;
    Ok((users.into_iter().map(UserResponse::from).collect(), total))
}

pub async fn get_user(pool: &PgPool, principal: &Principal, id: Uuid) -> WebResult<UserResponse> {
    if principal.user_id != id {
        authorize(principal, Action::Update, &Resource::User)?;
    }

    let user = UserRepository::new(pool).find_by_id(id).await?;
    Ok(UserResponse::from(user))
}

pub async fn create_user(
    pool: &PgPool,
    principal: &Principal,
    req: &CreateUserRequest,
) -> WebResult<UserResponse> {
    authorize(principal, Action::Create, &Resource::User)?;

    let user = UserRepository::new(pool).create(req).await?;
    Ok(UserResponse::from(user))
}

pub async fn update_user(
    pool: &PgPool,
    principal: &Principal,
    id: Uuid,
    req: &UpdateUserRequest,
) -> WebResult<UserResponse> {
    authorize(principal, Action::Update, &Resource::User)?;

    let repo = UserRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    let user = repo.update(&existing, req).await?;

    Ok(UserResponse::from(user))
}

pub async fn delete_user(pool: &PgPool, principal: &Principal, id: Uuid) -> WebResult<()> {
    authorize(principal, Action::Delete, &Resource::User)?;

    if principal.user_id == id {
        return Err(WebError::BadRequest("Cannot delete your own account".to_string()));
    }

    UserRepository::new(pool).delete(id).await?;
    Ok(())
}
