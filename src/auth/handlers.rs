use axum::{
    extract::{FromRef, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        services,
        session::{Session, SessionKeys, SESSION_COOKIE},
    },
    cookies,
    error::AppError,
    flash::{self, Flash, IncomingFlash, FLASH_COOKIE},
    state::AppState,
    views::{Empty, Page},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/register", get(register_page).post(register))
}

pub async fn login_page(
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    state.views.page("login.html", &Empty {}, flash)
}

#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = match services::login(&state.db, &form).await {
        Ok(u) => u,
        Err(e) => {
            return match e.flash() {
                Some(f) => Ok(state
                    .views
                    .page("login.html", &Empty {}, IncomingFlash(Some(f)))?
                    .with_status(StatusCode::UNAUTHORIZED)
                    .into_response()),
                None => Err(e),
            };
        }
    };

    let keys = SessionKeys::from_ref(&state);
    let token = keys
        .sign(Session {
            user_id: user.id,
            role: user.role,
            approved: user.approved,
        })
        .map_err(|e| {
            error!(error = %e, "session sign failed");
            AppError::Internal(e)
        })?;

    Ok((
        AppendHeaders([
            (SET_COOKIE, keys.cookie(&token)),
            (SET_COOKIE, cookies::expire(FLASH_COOKIE, keys.secure_cookie)),
        ]),
        Redirect::to(user.role.dashboard()),
    )
        .into_response())
}

/// Clears the session whether or not one exists.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("logout");
    let secure = state.config.session.cookie_secure;
    (
        AppendHeaders([(SET_COOKIE, cookies::expire(SESSION_COOKIE, secure))]),
        Redirect::to("/login"),
    )
}

pub async fn register_page(
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<Page, AppError> {
    state.views.page("register.html", &Empty {}, flash)
}

#[instrument(skip(state, form), fields(email = %form.email, role = %form.role))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let secure = state.config.session.cookie_secure;
    match services::register(&state.db, &form).await {
        Ok(_) => Ok(flash::redirect_with("/login", Flash::Registered, secure)),
        Err(e) => match e.flash() {
            Some(f) => Ok(flash::redirect_with("/register", f, secure)),
            None => Err(e),
        },
    }
}
