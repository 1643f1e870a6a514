use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use crate::{
    auth::StudentSession,
    drives::{Drive, DriveStatus},
    error::AppError,
    flash::IncomingFlash,
    state::AppState,
    views::Page,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/student/dashboard", get(dashboard))
}

#[derive(Serialize)]
struct DashboardView {
    drives: Vec<Drive>,
}

/// Lists approved drives only; pending and rejected ones stay hidden from students.
pub async fn dashboard(
    State(state): State<AppState>,
    _student: StudentSession,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    let drives = Drive::list_by_status(&state.db, DriveStatus::Approved).await?;
    state
        .views
        .page("student/dashboard.html", &DashboardView { drives }, flash)
}
