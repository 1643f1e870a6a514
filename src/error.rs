use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::flash::Flash;

/// Every failure a portal request can end in.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("company not approved")]
    NotApproved,
    #[error("admin registration not allowed")]
    AdminRoleForbidden,
    #[error("email already registered")]
    EmailTaken,
    #[error("unknown role")]
    InvalidRole,
    #[error("invalid email")]
    InvalidEmail,
    #[error("missing required fields")]
    MissingFields,
    #[error("unauthorized")]
    Unauthorized,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The one-shot message shown to the user, if this failure is user-facing.
    pub fn flash(&self) -> Option<Flash> {
        match self {
            AppError::InvalidCredentials => Some(Flash::InvalidCredentials),
            AppError::NotApproved => Some(Flash::NotApproved),
            AppError::AdminRoleForbidden => Some(Flash::AdminRoleForbidden),
            AppError::EmailTaken => Some(Flash::EmailTaken),
            AppError::InvalidRole => Some(Flash::InvalidRole),
            AppError::InvalidEmail => Some(Flash::InvalidEmail),
            AppError::MissingFields => Some(Flash::MissingFields),
            AppError::Unauthorized | AppError::Database(_) | AppError::Internal(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            AppError::Database(ref e) => {
                error!(error = %e, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            AppError::Internal(ref e) => {
                error!(error = %e, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            other => (StatusCode::BAD_REQUEST, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn user_facing_errors_carry_a_flash() {
        assert_eq!(AppError::NotApproved.flash(), Some(Flash::NotApproved));
        assert_eq!(AppError::EmailTaken.flash(), Some(Flash::EmailTaken));
        assert!(AppError::Unauthorized.flash().is_none());
        assert!(AppError::Internal(anyhow::anyhow!("boom")).flash().is_none());
    }

    #[test]
    fn unauthorized_redirects_to_login() {
        let res = AppError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(LOCATION).unwrap(), "/login");
    }

    #[test]
    fn internal_errors_are_opaque_500s() {
        let res = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
