use sqlx::SqlitePool;

use crate::auth::repo_types::{NewUser, Role, User};

impl User {
    /// Find a user by email (exact, case-sensitive match).
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, approved, active
            FROM user
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, approved, active
            FROM user
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_admin(db: &SqlitePool) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, approved, active
            FROM user
            WHERE role = 'admin'
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(db)
        .await
    }

    pub async fn create(db: &SqlitePool, new: &NewUser<'_>) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO user (name, email, password, role, approved, active)
            VALUES (?, ?, ?, ?, ?, 1)
            RETURNING id, name, email, password, role, approved, active
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.role)
        .bind(new.approved)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_role(db: &SqlitePool, role: Role) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, approved, active
            FROM user
            WHERE role = ?
            ORDER BY id
            "#,
        )
        .bind(role)
        .fetch_all(db)
        .await
    }

    pub async fn count_by_role(db: &SqlitePool, role: Role) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user WHERE role = ?")
            .bind(role)
            .fetch_one(db)
            .await
    }

    pub async fn count_all(db: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user")
            .fetch_one(db)
            .await
    }

    /// Sets `approved` on a company account. Returns false when no company has this id.
    pub async fn approve_company(db: &SqlitePool, id: i64) -> sqlx::Result<bool> {
        let res = sqlx::query("UPDATE user SET approved = 1 WHERE id = ? AND role = 'company'")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Returns false when no user has this id.
    pub async fn set_active(db: &SqlitePool, id: i64, active: bool) -> sqlx::Result<bool> {
        let res = sqlx::query("UPDATE user SET active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
