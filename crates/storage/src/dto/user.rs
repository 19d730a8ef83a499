use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,

    pub role: Role,
    pub league_id: Option<Uuid>,
    pub club_id: Option<Uuid>,
}

impl CreateUserRequest {
    pub fn validate_scope(&self) -> Result<(), &'static str> {
        validate_role_scope(self.role, self.league_id, self.club_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: Option<String>,

    pub role: Option<Role>,
    pub league_id: Option<Uuid>,
    pub club_id: Option<Uuid>,
}

/// Checks that a role carries exactly the scope it needs: league admins
/// are bound to a league, club admins to a club, app admins to neither.
pub fn validate_role_scope(
    role: Role,
    league_id: Option<Uuid>,
    club_id: Option<Uuid>,
) -> Result<(), &'static str> {
    match (role, league_id, club_id) {
        (Role::AdminApp, None, None) => Ok(()),
        (Role::AdminApp, _, _) => Err("ADMIN_APP users cannot be scoped to a league or club"),
        (Role::AdminLiga, Some(_), None) => Ok(()),
        (Role::AdminLiga, None, _) => Err("ADMIN_LIGA users require a league_id"),
        (Role::AdminLiga, Some(_), Some(_)) => Err("ADMIN_LIGA users cannot be scoped to a club"),
        (Role::AdminClub, _, Some(_)) => Ok(()),
        (Role::AdminClub, _, None) => Err("ADMIN_CLUB users require a club_id"),
    }
}

/// Public view of a user; the password hash never leaves the storage layer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub league_id: Option<Uuid>,
    pub club_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            role: user.role,
            league_id: user.league_id,
            club_id: user.club_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_scope_rules() {
        let league = Some(Uuid::new_v4());
        let club = Some(Uuid::new_v4());

        assert!(validate_role_scope(Role::AdminApp, None, None).is_ok());
        assert!(validate_role_scope(Role::AdminApp, league, None).is_err());

        assert!(validate_role_scope(Role::AdminLiga, league, None).is_ok());
        assert!(validate_role_scope(Role::AdminLiga, None, None).is_err());
        assert!(validate_role_scope(Role::AdminLiga, league, club).is_err());

        assert!(validate_role_scope(Role::AdminClub, None, club).is_ok());
        assert!(validate_role_scope(Role::AdminClub, league, club).is_ok());
        assert!(validate_role_scope(Role::AdminClub, league, None).is_err());
    }

    #[test]
    fn test_create_user_validation() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: Role::AdminApp,
            league_id: None,
            club_id: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_user_response_has_no_password() {
        let now = Utc::now();
        let user = User {
            user_id: Uuid::new_v4(),
            email: "admin@liga.test".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: Role::AdminApp,
            league_id: None,
            club_id: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "ADMIN_APP");
    }
}
