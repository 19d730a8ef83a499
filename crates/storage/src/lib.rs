pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;

/// Shared handle on the Postgres connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool, e.g. one created with `connect_lazy`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    const INIT_MIGRATION: &str = include_str!("../migrations/20250101000000_init.sql");

    fn users_table() -> &'static str {
        let start = INIT_MIGRATION.find("CREATE TABLE users").unwrap();
        &INIT_MIGRATION[start..]
    }

    #[test]
    fn test_scoped_admins_keep_their_scope() {
        let users = users_table();
        assert!(!users.contains("SET NULL"));
        assert!(users.contains("REFERENCES leagues (league_id) ON DELETE RESTRICT"));
        assert!(users.contains("REFERENCES clubs (club_id) ON DELETE RESTRICT"));
        assert!(users.contains("role = 'ADMIN_LIGA' AND league_id IS NOT NULL"));
        assert!(users.contains("role = 'ADMIN_CLUB' AND club_id IS NOT NULL"));
    }
}
