use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// The three kinds of portal account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Company,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Company => "company",
            Role::Student => "student",
        }
    }

    /// Where a freshly logged-in user of this role lands.
    pub fn dashboard(self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Company => "/company/dashboard",
            Role::Student => "/student/dashboard",
        }
    }

    /// Students approve themselves; companies wait for an admin.
    pub fn approved_on_registration(self) -> bool {
        matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "company" => Ok(Role::Company),
            "student" => Ok(Role::Student),
            _ => Err(AppError::InvalidRole),
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String, // Argon2 PHC string, never rendered
    pub role: Role,
    pub approved: bool,
    pub active: bool,
}

/// Insert payload; `password_hash` must already be hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub approved: bool,
}
