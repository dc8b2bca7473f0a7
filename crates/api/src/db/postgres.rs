//! `PostgreSQL` record store.
//!
//! Profiles live in `profiles.user_profile`. Queries are checked at runtime
//! (`query_as`), so building the crate never needs a live database.

use async_trait::async_trait;
use sqlx::PgPool;

use profile_directory_core::{Email, PersonName, PhoneNumber, ProfileData, UserId, UserProfile};

use super::{RepositoryError, UserStore};

/// Raw row as stored; text columns are re-validated on the way out.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: UserId,
    name: String,
    email: String,
    number: String,
    avatar: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let name = PersonName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid name in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let number = PhoneNumber::parse(&row.number).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid number in database: {e}"))
        })?;
        let avatar = row.avatar.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid avatar in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name,
            email,
            number,
            avatar,
        })
    }
}

/// User store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, name, email, number, avatar
            FROM profiles.user_profile
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserProfile::try_from).collect()
    }

    async fn insert(&self, data: ProfileData) -> Result<UserProfile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO profiles.user_profile (name, email, number, avatar)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, number, avatar
            ",
        )
        .bind(data.name.as_str())
        .bind(data.email.as_str())
        .bind(data.number.as_str())
        .bind(data.avatar)
        .fetch_one(&self.pool)
        .await?;

        UserProfile::try_from(row)
    }

    async fn replace(
        &self,
        id: UserId,
        data: ProfileData,
    ) -> Result<UserProfile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            UPDATE profiles.user_profile
            SET name = $2, email = $3, number = $4, avatar = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, number, avatar
            ",
        )
        .bind(id)
        .bind(data.name.as_str())
        .bind(data.email.as_str())
        .bind(data.number.as_str())
        .bind(data.avatar)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
            .and_then(UserProfile::try_from)
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM profiles.user_profile
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
