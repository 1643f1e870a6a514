use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

/// Approval state of a drive. New drives start `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, sqlx::Type)]
pub enum DriveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for DriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriveStatus::Pending => "Pending",
            DriveStatus::Approved => "Approved",
            DriveStatus::Rejected => "Rejected",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveDecision {
    Approve,
    Reject,
}

impl DriveDecision {
    /// Status a drive ends up in, whatever it was before.
    pub fn outcome(self) -> DriveStatus {
        match self {
            DriveDecision::Approve => DriveStatus::Approved,
            DriveDecision::Reject => DriveStatus::Rejected,
        }
    }
}

/// Drive record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Drive {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub eligibility: Option<String>,
    pub deadline: Option<String>, // opaque, as entered
    pub status: DriveStatus,
}

#[derive(Debug)]
pub struct NewDrive<'a> {
    pub company_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub eligibility: Option<&'a str>,
    pub deadline: Option<&'a str>,
}
