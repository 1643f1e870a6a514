use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::instrument;

use super::services;
use crate::{
    auth::{AdminSession, Role, User},
    drives::{services::decide, Drive, DriveDecision},
    error::AppError,
    flash::IncomingFlash,
    state::AppState,
    views::Page,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/students", get(students))
        .route("/admin/companies", get(companies))
        .route("/admin/approve_company/:id", get(approve_company))
        .route("/admin/drives", get(drives))
        .route("/admin/approve-drive/:id", get(approve_drive))
        .route("/admin/reject-drive/:id", get(reject_drive))
        .route("/admin/activate/:id", get(activate))
        .route("/admin/deactivate/:id", get(deactivate))
}

#[derive(Serialize)]
struct StudentsView {
    students: Vec<User>,
}

#[derive(Serialize)]
struct CompaniesView {
    companies: Vec<User>,
}

#[derive(Serialize)]
struct DrivesView {
    drives: Vec<Drive>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminSession,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    let summary = services::summary(&state.db).await?;
    state.views.page("admin/dashboard.html", &summary, flash)
}

pub async fn students(
    State(state): State<AppState>,
    _admin: AdminSession,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    let students = User::list_by_role(&state.db, Role::Student).await?;
    state
        .views
        .page("admin/students.html", &StudentsView { students }, flash)
}

pub async fn companies(
    State(state): State<AppState>,
    _admin: AdminSession,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    let companies = User::list_by_role(&state.db, Role::Company).await?;
    state
        .views
        .page("admin/companies.html", &CompaniesView { companies }, flash)
}

pub async fn drives(
    State(state): State<AppState>,
    _admin: AdminSession,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    let drives = Drive::list_all(&state.db).await?;
    state.views.page("admin/drives.html", &DrivesView { drives }, flash)
}

#[instrument(skip(state, admin), fields(admin_id = admin.session.user_id))]
pub async fn approve_company(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    services::approve_company(&state.db, id).await?;
    Ok(Redirect::to("/admin/companies"))
}

#[instrument(skip(state, admin), fields(admin_id = admin.session.user_id))]
pub async fn approve_drive(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    decide(&state.db, id, DriveDecision::Approve).await?;
    Ok(Redirect::to("/admin/drives"))
}

#[instrument(skip(state, admin), fields(admin_id = admin.session.user_id))]
pub async fn reject_drive(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    decide(&state.db, id, DriveDecision::Reject).await?;
    Ok(Redirect::to("/admin/drives"))
}

#[instrument(skip(state, admin), fields(admin_id = admin.session.user_id))]
pub async fn activate(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    services::set_active(&state.db, id, true).await?;
    Ok(Redirect::to("/admin/students"))
}

#[instrument(skip(state, admin), fields(admin_id = admin.session.user_id))]
pub async fn deactivate(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    services::set_active(&state.db, id, false).await?;
    Ok(Redirect::to("/admin/students"))
}
