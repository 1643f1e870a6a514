use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod session;

pub use extractors::{AdminSession, CompanySession, StudentSession};
pub use repo_types::{Role, User};
pub use session::Session;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
