use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    auth::CompanySession,
    drives::{
        services::{create_drive as create, DriveDraft},
        Drive,
    },
    error::AppError,
    flash::{self, Flash, IncomingFlash},
    state::AppState,
    views::Empty,
};

pub const WAITING_FOR_APPROVAL: &str = "Waiting for admin approval";

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/company/dashboard", get(dashboard))
        .route("/company/create-drive", get(create_drive_page).post(create_drive))
}

#[derive(Debug, Deserialize)]
pub struct CreateDriveForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub eligibility: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Serialize)]
struct DashboardView {
    drives: Vec<Drive>,
}

/// Unapproved sessions get a placeholder instead of a redirect.
pub async fn dashboard(
    State(state): State<AppState>,
    company: CompanySession,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    if !company.session.approved {
        return Ok(WAITING_FOR_APPROVAL.into_response());
    }
    let drives = Drive::list_by_company(&state.db, company.session.user_id).await?;
    Ok(state
        .views
        .page("company/dashboard.html", &DashboardView { drives }, flash)?
        .into_response())
}

pub async fn create_drive_page(
    State(state): State<AppState>,
    company: CompanySession,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    if !company.session.approved {
        return Ok(WAITING_FOR_APPROVAL.into_response());
    }
    Ok(state
        .views
        .page("company/create_drive.html", &Empty {}, flash)?
        .into_response())
}

#[instrument(skip(state, company, form), fields(company_id = company.session.user_id))]
pub async fn create_drive(
    State(state): State<AppState>,
    company: CompanySession,
    Form(form): Form<CreateDriveForm>,
) -> Result<Response, AppError> {
    if !company.session.approved {
        return Ok(WAITING_FOR_APPROVAL.into_response());
    }
    let draft = DriveDraft {
        title: &form.title,
        description: &form.description,
        eligibility: form.eligibility.as_deref(),
        deadline: form.deadline.as_deref(),
    };
    let secure = state.config.session.cookie_secure;
    match create(&state.db, &company.session, draft).await {
        Ok(drive) => {
            info!(drive_id = drive.id, "drive submitted for approval");
            Ok(flash::redirect_with("/company/dashboard", Flash::DriveCreated, secure))
        }
        Err(e) => match e.flash() {
            Some(f) => Ok(flash::redirect_with("/company/create-drive", f, secure)),
            None => Err(e),
        },
    }
}
