use sqlx::SqlitePool;
use tracing::{debug, info};

use super::repo_types::{Drive, DriveDecision, NewDrive};
use crate::{
    auth::{Role, Session},
    error::AppError,
};

/// Form fields for a new drive; blank optionals count as absent.
#[derive(Debug, Default)]
pub struct DriveDraft<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub eligibility: Option<&'a str>,
    pub deadline: Option<&'a str>,
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// Creates a `Pending` drive owned by the calling company.
pub async fn create_drive(
    db: &SqlitePool,
    company: &Session,
    draft: DriveDraft<'_>,
) -> Result<Drive, AppError> {
    if company.role != Role::Company {
        return Err(AppError::Unauthorized);
    }
    let title = draft.title.trim();
    let description = draft.description.trim();
    if title.is_empty() || description.is_empty() {
        return Err(AppError::MissingFields);
    }

    let drive = Drive::create(
        db,
        &NewDrive {
            company_id: company.user_id,
            title,
            description,
            eligibility: non_blank(draft.eligibility),
            deadline: non_blank(draft.deadline),
        },
    )
    .await?;

    info!(drive_id = drive.id, company_id = drive.company_id, "drive created");
    Ok(drive)
}

/// Records an admin decision on a drive, overwriting any earlier one.
/// Missing drives are a silent no-op reported as `false`.
pub async fn decide(
    db: &SqlitePool,
    drive_id: i64,
    decision: DriveDecision,
) -> Result<bool, AppError> {
    let status = decision.outcome();
    if !Drive::set_status(db, drive_id, status).await? {
        debug!(drive_id, ?decision, "drive not found; ignoring");
        return Ok(false);
    }
    info!(drive_id, to = %status, "drive status set");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::repo_types::NewUser,
        auth::User,
        drives::repo_types::DriveStatus,
        state::AppState,
    };

    async fn company(state: &AppState) -> Session {
        let user = User::create(
            &state.db,
            &NewUser {
                name: "Acme",
                email: "hr@acme.com",
                password_hash: "$argon2id$placeholder",
                role: Role::Company,
                approved: true,
            },
        )
        .await
        .unwrap();
        Session {
            user_id: user.id,
            role: user.role,
            approved: user.approved,
        }
    }

    fn draft<'a>(title: &'a str) -> DriveDraft<'a> {
        DriveDraft {
            title,
            description: "Backend internship",
            eligibility: Some("  "),
            deadline: Some("2026-12-01"),
        }
    }

    #[tokio::test]
    async fn new_drive_is_pending_and_owned() {
        let state = AppState::fake().await;
        let acme = company(&state).await;
        let drive = create_drive(&state.db, &acme, draft("SDE Intern")).await.unwrap();
        assert_eq!(drive.status, DriveStatus::Pending);
        assert_eq!(drive.company_id, acme.user_id);
        assert_eq!(drive.eligibility, None);
        assert_eq!(drive.deadline.as_deref(), Some("2026-12-01"));
    }

    #[tokio::test]
    async fn blank_title_is_refused() {
        let state = AppState::fake().await;
        let acme = company(&state).await;
        let err = create_drive(&state.db, &acme, draft("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingFields));
        assert!(Drive::list_all(&state.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_company_session_cannot_create() {
        let state = AppState::fake().await;
        let admin = Session {
            user_id: 1,
            role: Role::Admin,
            approved: true,
        };
        let err = create_drive(&state.db, &admin, draft("X")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn approve_then_reject_leaves_rejected() {
        let state = AppState::fake().await;
        let acme = company(&state).await;
        let drive = create_drive(&state.db, &acme, draft("SDE Intern")).await.unwrap();

        assert!(decide(&state.db, drive.id, DriveDecision::Approve).await.unwrap());
        assert!(decide(&state.db, drive.id, DriveDecision::Reject).await.unwrap());

        let stored = Drive::find_by_id(&state.db, drive.id).await.unwrap().unwrap();
        assert_eq!(stored.status, DriveStatus::Rejected);

        assert!(decide(&state.db, drive.id, DriveDecision::Approve).await.unwrap());
        assert!(decide(&state.db, drive.id, DriveDecision::Approve).await.unwrap());
        let stored = Drive::find_by_id(&state.db, drive.id).await.unwrap().unwrap();
        assert_eq!(stored.status, DriveStatus::Approved);
    }

    #[tokio::test]
    async fn deciding_a_missing_drive_is_a_noop() {
        let state = AppState::fake().await;
        assert!(!decide(&state.db, 9999, DriveDecision::Approve).await.unwrap());
    }

    #[tokio::test]
    async fn listing_by_status() {
        let state = AppState::fake().await;
        let acme = company(&state).await;
        let a = create_drive(&state.db, &acme, draft("A")).await.unwrap();
        let _b = create_drive(&state.db, &acme, draft("B")).await.unwrap();
        decide(&state.db, a.id, DriveDecision::Approve).await.unwrap();

        let open = Drive::list_by_status(&state.db, DriveStatus::Approved).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, a.id);
        assert_eq!(Drive::list_by_company(&state.db, acme.user_id).await.unwrap().len(), 2);
    }
}
