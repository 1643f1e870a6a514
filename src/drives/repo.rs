use sqlx::SqlitePool;

use super::repo_types::{Drive, DriveStatus, NewDrive};

impl Drive {
    pub async fn create(db: &SqlitePool, new: &NewDrive<'_>) -> sqlx::Result<Drive> {
        sqlx::query_as::<_, Drive>(
            r#"
            INSERT INTO drive (company_id, title, description, eligibility, deadline, status)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, company_id, title, description, eligibility, deadline, status
            "#,
        )
        .bind(new.company_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.eligibility)
        .bind(new.deadline)
        .bind(DriveStatus::Pending)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<Drive>> {
        sqlx::query_as::<_, Drive>(
            r#"
            SELECT id, company_id, title, description, eligibility, deadline, status
            FROM drive
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_all(db: &SqlitePool) -> sqlx::Result<Vec<Drive>> {
        sqlx::query_as::<_, Drive>(
            r#"
            SELECT id, company_id, title, description, eligibility, deadline, status
            FROM drive
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn list_by_company(db: &SqlitePool, company_id: i64) -> sqlx::Result<Vec<Drive>> {
        sqlx::query_as::<_, Drive>(
            r#"
            SELECT id, company_id, title, description, eligibility, deadline, status
            FROM drive
            WHERE company_id = ?
            ORDER BY id
            "#,
        )
        .bind(company_id)
        .fetch_all(db)
        .await
    }

    pub async fn list_by_status(db: &SqlitePool, status: DriveStatus) -> sqlx::Result<Vec<Drive>> {
        sqlx::query_as::<_, Drive>(
            r#"
            SELECT id, company_id, title, description, eligibility, deadline, status
            FROM drive
            WHERE status = ?
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(db)
        .await
    }

    /// Unconditional single-row write; last writer wins.
    /// Returns false when no drive has this id.
    pub async fn set_status(db: &SqlitePool, id: i64, status: DriveStatus) -> sqlx::Result<bool> {
        let res = sqlx::query("UPDATE drive SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
