use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::user::{CreateUserRequest, UpdateUserRequest, validate_role_scope};
use crate::error::{Result, StorageError};
use crate::models::User;

const USER_COLUMNS: &str =
    "user_id, email, password_hash, role, league_id, club_id, created_at, updated_at";
const EMAIL_TAKEN: &str = "Email already registered";
const UNKNOWN_SCOPE: &str = "League or club does not exist";

const BCRYPT_COST: u32 = if cfg!(test) { 4 } else { bcrypt::DEFAULT_COST };

pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, BCRYPT_COST)?)
}

/// Emails are compared case-insensitively by storing them lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: PaginationParams) -> Result<(Vec<User>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY email LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((users, total))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(normalize_email(email))
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn create(&self, req: &CreateUserRequest) -> Result<User> {
        req.validate_scope()
            .map_err(|e| StorageError::Invalid(e.to_string()))?;

        let password_hash = hash_password(&req.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, role, league_id, club_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(normalize_email(&req.email))
        .bind(password_hash)
        .bind(req.role)
        .bind(req.league_id)
        .bind(req.club_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, EMAIL_TAKEN, UNKNOWN_SCOPE))?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User created");
        Ok(user)
    }

    /// Partial update. A role change resets the scope to whatever the request
    /// carries, so a promoted club admin does not keep a stale club_id.
    pub async fn update(&self, existing: &User, req: &UpdateUserRequest) -> Result<User> {
        let role = req.role.unwrap_or(existing.role);
        let (league_id, club_id) = if req.role.is_some_and(|r| r != existing.role) {
            (req.league_id, req.club_id)
        } else {
            (
                req.league_id.or(existing.league_id),
                req.club_id.or(existing.club_id),
            )
        };

        validate_role_scope(role, league_id, club_id)
            .map_err(|e| StorageError::Invalid(e.to_string()))?;

        let password_hash = match &req.password {
            Some(password) => hash_password(password)?,
            None => existing.password_hash.clone(),
        };
        let email = req
            .email
            .as_deref()
            .map(normalize_email)
            .unwrap_or_else(|| existing.email.clone());

        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, role = $4, league_id = $5, club_id = $6,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(existing.user_id)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(league_id)
        .bind(club_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, EMAIL_TAKEN, UNKNOWN_SCOPE))?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Liga.TEST "), "admin@liga.test");
    }

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(bcrypt::verify("correct horse", &hash).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hash).unwrap());
    }
}
