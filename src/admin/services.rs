use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{
    auth::{Role, User},
    error::AppError,
};

/// Headcounts shown on the admin dashboard, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub students_count: i64,
    pub companies_count: i64,
    pub users_count: i64,
}

pub async fn summary(db: &SqlitePool) -> Result<DashboardSummary, AppError> {
    Ok(DashboardSummary {
        students_count: User::count_by_role(db, Role::Student).await?,
        companies_count: User::count_by_role(db, Role::Company).await?,
        users_count: User::count_all(db).await?,
    })
}

/// Marks a company approved. Unknown ids and non-company users are left alone.
pub async fn approve_company(db: &SqlitePool, user_id: i64) -> Result<bool, AppError> {
    let updated = User::approve_company(db, user_id).await?;
    if updated {
        info!(user_id, "company approved");
    } else {
        debug!(user_id, "no company with this id; ignoring");
    }
    Ok(updated)
}

/// Flips the `active` flag. Unknown ids are a no-op.
pub async fn set_active(db: &SqlitePool, user_id: i64, active: bool) -> Result<bool, AppError> {
    let updated = User::set_active(db, user_id, active).await?;
    if updated {
        info!(user_id, active, "user activation changed");
    } else {
        debug!(user_id, "no user with this id; ignoring");
    }
    Ok(updated)
}
