use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use skylane_core::admin::{Admin, CreateUserParams, User};
use skylane_core::repository::AdminRepository;
use skylane_core::{RepositoryError, RepositoryResult};

pub struct PostgresAdminRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn create_admin_tx(&self, params: CreateUserParams) -> RepositoryResult<User> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::storage)?;

        let user: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, email, password_hash, first_name, last_name, created_at
            "#,
        )
        .bind(&params.email)
        .bind(&params.password_hash)
        .bind(&params.first_name)
        .bind(&params.last_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::storage)?;

        let admin = Admin::new(user.user_id);
        sqlx::query(
            r#"
            INSERT INTO admins (id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(admin.id)
        .bind(admin.user_id)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::storage)?;

        // An uncommitted transaction rolls both inserts back on drop
        tx.commit().await.map_err(RepositoryError::storage)?;

        Ok(user.into())
    }

    async fn list_admins(&self) -> RepositoryResult<Vec<Admin>> {
        let rows: Vec<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM admins
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(rows.into_iter().map(Admin::from).collect())
    }

    async fn get_admin(&self, admin_id: Uuid) -> RepositoryResult<Admin> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.map(Admin::from).ok_or(RepositoryError::NotFound)
    }

    async fn get_admin_by_user(&self, user_id: i64) -> RepositoryResult<Admin> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM admins
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.map(Admin::from).ok_or(RepositoryError::NotFound)
    }

    async fn update_admin(&self, admin: Admin) -> RepositoryResult<Admin> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            UPDATE admins
            SET user_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(admin.id)
        .bind(admin.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.map(Admin::from).ok_or(RepositoryError::NotFound)
    }

    async fn delete_admin(&self, user_id: i64) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM admins
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
