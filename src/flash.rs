//! One-shot flash messages carried between a redirect and the next rendered page.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::SET_COOKIE, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use crate::cookies;

pub const FLASH_COOKIE: &str = "portal_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    InvalidCredentials,
    NotApproved,
    AdminRoleForbidden,
    EmailTaken,
    InvalidRole,
    InvalidEmail,
    MissingFields,
    Registered,
    DriveCreated,
}

impl Flash {
    const ALL: [Flash; 9] = [
        Flash::InvalidCredentials,
        Flash::NotApproved,
        Flash::AdminRoleForbidden,
        Flash::EmailTaken,
        Flash::InvalidRole,
        Flash::InvalidEmail,
        Flash::MissingFields,
        Flash::Registered,
        Flash::DriveCreated,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Flash::InvalidCredentials => "invalid_credentials",
            Flash::NotApproved => "not_approved",
            Flash::AdminRoleForbidden => "admin_forbidden",
            Flash::EmailTaken => "email_taken",
            Flash::InvalidRole => "invalid_role",
            Flash::InvalidEmail => "invalid_email",
            Flash::MissingFields => "missing_fields",
            Flash::Registered => "registered",
            Flash::DriveCreated => "drive_created",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::InvalidCredentials => "Invalid credentials",
            Flash::NotApproved => "Company not approved by admin yet",
            Flash::AdminRoleForbidden => "Admin registration not allowed",
            Flash::EmailTaken => "Email already registered",
            Flash::InvalidRole => "Unknown role",
            Flash::InvalidEmail => "Invalid email",
            Flash::MissingFields => "Please fill in all required fields",
            Flash::Registered => "Registration successful. Please login.",
            Flash::DriveCreated => "Drive created successfully!",
        }
    }
}

/// Flash message pending for this request, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl IncomingFlash {
    pub fn message(&self) -> Option<&'static str> {
        self.0.map(Flash::message)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(IncomingFlash(
            cookies::read(&parts.headers, FLASH_COOKIE).and_then(Flash::from_code),
        ))
    }
}

/// 303 to `to`, leaving `flash` for the page rendered there.
pub fn redirect_with(to: &str, flash: Flash, secure: bool) -> Response {
    let cookie = cookies::build(FLASH_COOKIE, flash.code(), 60, secure);
    (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(to)).into_response()
}
