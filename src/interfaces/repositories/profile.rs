use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::profile::{Profile, ProfileFields, ProfileRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

/// Storage collaborator for the profile aggregate. Every read joins the
/// owner's display fields.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Cheap round trip used by the health check
    async fn check_connection(&self) -> Result<(), AppError>;

    async fn find_by_owner(&self, owner_id: &Uuid) -> Result<Option<Profile>, AppError>;

    async fn find_all(&self) -> Result<Vec<Profile>, AppError>;

    /// Inserts a new profile built from the present fields
    async fn create_profile(&self, owner_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError>;

    /// Overwrites only the present fields of an existing profile
    async fn update_profile(&self, owner_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError>;

    /// Writes the whole document back, nested lists included
    async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError>;

    /// Removes the owner's profile (if any) and the owning user
    async fn delete_account(&self, owner_id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

const PROFILE_COLUMNS: &str = r#"
    p.id, p.owner_id, p.company, p.website, p.location, p.status, p.bio,
    p.github_username, p.skills, p.social, p.experience, p.education,
    p.created_at, p.updated_at,
    u.name AS owner_name, u.avatar AS owner_avatar
"#;

/// Wraps a data-modifying statement that `RETURNING *` so the result is joined
/// with the owner like any other read.
fn joined(statement: &str) -> String {
    format!(
        "WITH p AS ({statement}) SELECT {PROFILE_COLUMNS} FROM p LEFT JOIN users u ON u.id = p.owner_id"
    )
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn find_by_owner(&self, owner_id: &Uuid) -> Result<Option<Profile>, AppError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles p LEFT JOIN users u ON u.id = p.owner_id WHERE p.owner_id = $1"
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn find_all(&self) -> Result<Vec<Profile>, AppError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles p LEFT JOIN users u ON u.id = p.owner_id ORDER BY p.created_at ASC"
        );

        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn create_profile(&self, owner_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError> {
        let sql = joined(
            r#"
            INSERT INTO profiles (
                owner_id, company, website, location, status, bio,
                github_username, skills, social
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(owner_id)
            .bind(&fields.company)
            .bind(&fields.website)
            .bind(&fields.location)
            .bind(&fields.status)
            .bind(&fields.bio)
            .bind(&fields.github_username)
            .bind(fields.skills.clone().unwrap_or_default())
            .bind(Json(fields.social.clone().unwrap_or_default()))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn update_profile(&self, owner_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError> {
        let sql = joined(
            r#"
            UPDATE profiles
            SET
                company = COALESCE($2, company),
                website = COALESCE($3, website),
                location = COALESCE($4, location),
                status = COALESCE($5, status),
                bio = COALESCE($6, bio),
                github_username = COALESCE($7, github_username),
                skills = COALESCE($8, skills),
                social = COALESCE($9, social),
                updated_at = NOW()
            WHERE owner_id = $1
            RETURNING *
            "#,
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(owner_id)
            .bind(&fields.company)
            .bind(&fields.website)
            .bind(&fields.location)
            .bind(&fields.status)
            .bind(&fields.bio)
            .bind(&fields.github_username)
            .bind(&fields.skills)
            .bind(fields.social.clone().map(Json))
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::from)
            .ok_or_else(|| AppError::NotFound("Profile record".into()))
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        let sql = joined(
            r#"
            UPDATE profiles
            SET
                company = $2,
                website = $3,
                location = $4,
                status = $5,
                bio = $6,
                github_username = $7,
                skills = $8,
                social = $9,
                experience = $10,
                education = $11,
                updated_at = NOW()
            WHERE owner_id = $1
            RETURNING *
            "#,
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(profile.owner_id())
            .bind(&profile.company)
            .bind(&profile.website)
            .bind(&profile.location)
            .bind(&profile.status)
            .bind(&profile.bio)
            .bind(&profile.github_username)
            .bind(&profile.skills)
            .bind(Json(&profile.social))
            .bind(Json(&profile.experience))
            .bind(Json(&profile.education))
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::from)
            .ok_or_else(|| AppError::NotFound("Profile record".into()))
    }

    async fn delete_account(&self, owner_id: &Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let profiles = sqlx::query("DELETE FROM profiles WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            profiles = profiles.rows_affected(),
            users = users.rows_affected(),
            "Account rows removed"
        );
        Ok(())
    }
}
