use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{
    repo_types::Role,
    session::{Session, SessionKeys, SESSION_COOKIE},
};
use crate::{cookies, error::AppError};

/// Marker naming the role a route requires.
pub trait RequiredRole: Send + Sync + 'static {
    const ROLE: Role;
}

pub struct AdminOnly;
pub struct CompanyOnly;
pub struct StudentOnly;

impl RequiredRole for AdminOnly {
    const ROLE: Role = Role::Admin;
}
impl RequiredRole for CompanyOnly {
    const ROLE: Role = Role::Company;
}
impl RequiredRole for StudentOnly {
    const ROLE: Role = Role::Student;
}

/// Extracts the session and admits it only if its role is `R::ROLE`.
/// Any other caller is redirected to `/login` before the handler runs.
pub struct RoleGuard<R: RequiredRole> {
    pub session: Session,
    _role: PhantomData<R>,
}

pub type AdminSession = RoleGuard<AdminOnly>;
pub type CompanySession = RoleGuard<CompanyOnly>;
pub type StudentSession = RoleGuard<StudentOnly>;

/// The flat role check: present and equal, nothing hierarchical.
pub fn authorize(session: Option<Session>, required: Role) -> Result<Session, AppError> {
    match session {
        Some(s) if s.role == required => Ok(s),
        Some(s) => {
            warn!(user_id = s.user_id, role = %s.role, required = %required, "role mismatch");
            Err(AppError::Unauthorized)
        }
        None => Err(AppError::Unauthorized),
    }
}

#[async_trait]
impl<S, R> FromRequestParts<S> for RoleGuard<R>
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
    R: RequiredRole,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let session = match cookies::read(&parts.headers, SESSION_COOKIE) {
            Some(token) => match keys.verify(token) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(error = %e, "invalid or expired session");
                    None
                }
            },
            None => None,
        };
        let session = authorize(session, R::ROLE)?;
        Ok(RoleGuard {
            session,
            _role: PhantomData,
        })
    }
}
