//! Profile administration - user directory and role management

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Profile, UserRole};

/// Query parameters for listing users
#[derive(Debug, serde::Deserialize, Default)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
    /// Case-insensitive match against full name or email
    pub search: Option<String>,
}

/// Profile service for the admin user directory
pub struct ProfileService {
    db_pool: PgPool,
}

impl ProfileService {
    /// Create new profile service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// List users, newest first, optionally filtered by role and search term
    pub async fn list_users(&self, query: ListUsersQuery) -> Result<Vec<Profile>> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("SELECT * FROM profiles WHERE 1=1");

        if let Some(role) = query.role {
            query_builder.push(" AND role = ");
            query_builder.push_bind(role);
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            query_builder.push(" AND (full_name ILIKE ");
            query_builder.push_bind(pattern.clone());
            query_builder.push(" OR email ILIKE ");
            query_builder.push_bind(pattern);
            query_builder.push(")");
        }

        query_builder.push(" ORDER BY created_at DESC");

        let profiles = query_builder
            .build_query_as::<Profile>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(profiles)
    }

    /// Fetch a single profile by ID
    pub async fn get_user(&self, id: &Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(profile)
    }

    /// Change a user's role, returning the updated profile if it exists
    pub async fn update_role(&self, id: &Uuid, role: UserRole) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET role = $1 WHERE id = $2 RETURNING *",
        )
        .bind(role)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        if let Some(ref p) = profile {
            tracing::info!(user_id = %p.id, role = ?p.role, "User role updated");
        }

        Ok(profile)
    }

    /// Count all users (for the dashboard)
    pub async fn count_users(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count)
    }
}
