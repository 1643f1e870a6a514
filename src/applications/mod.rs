//! Student applications to drives. Stored and readable; no route exposes them yet.

use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

/// Stored as its variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
pub enum ApplicationStatus {
    #[default]
    Applied,
}

/// Application record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: i64,
    pub student_id: i64,
    pub drive_id: i64,
    pub applied_on: OffsetDateTime,
    pub status: ApplicationStatus,
}

impl Application {
    /// Inserts with `applied_on = now` and the default status.
    /// Duplicate (student, drive) pairs are accepted.
    pub async fn create(db: &SqlitePool, student_id: i64, drive_id: i64) -> sqlx::Result<Application> {
        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO application (student_id, drive_id, applied_on, status)
            VALUES (?, ?, ?, ?)
            RETURNING id, student_id, drive_id, applied_on, status
            "#,
        )
        .bind(student_id)
        .bind(drive_id)
        .bind(OffsetDateTime::now_utc())
        .bind(ApplicationStatus::default())
        .fetch_one(db)
        .await
    }

    pub async fn list_by_student(db: &SqlitePool, student_id: i64) -> sqlx::Result<Vec<Application>> {
        sqlx::query_as::<_, Application>(
            r#"
            SELECT id, student_id, drive_id, applied_on, status
            FROM application
            WHERE student_id = ?
            ORDER BY id
            "#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{repo_types::NewUser, Role, User},
        drives::{repo_types::NewDrive, Drive},
        state::AppState,
    };

    async fn user(state: &AppState, email: &str, role: Role) -> User {
        User::create(
            &state.db,
            &NewUser {
                name: email,
                email,
                password_hash: "$argon2id$placeholder",
                role,
                approved: true,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn defaults_and_no_uniqueness() {
        let state = AppState::fake().await;
        let ann = user(&state, "ann@s.edu", Role::Student).await;
        let acme = user(&state, "hr@acme.com", Role::Company).await;
        let drive = Drive::create(
            &state.db,
            &NewDrive {
                company_id: acme.id,
                title: "SDE Intern",
                description: "Backend",
                eligibility: None,
                deadline: None,
            },
        )
        .await
        .unwrap();

        let before = OffsetDateTime::now_utc() - time::Duration::seconds(5);
        let first = Application::create(&state.db, ann.id, drive.id).await.unwrap();
        assert_eq!(first.status, ApplicationStatus::Applied);
        assert!(first.applied_on >= before);

        Application::create(&state.db, ann.id, drive.id).await.unwrap();
        let listed = Application::list_by_student(&state.db, ann.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|a| a.status == ApplicationStatus::Applied));

        let raw: String = sqlx::query_scalar("SELECT status FROM application WHERE id = ?")
            .bind(first.id)
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(raw, "Applied");
    }
}
