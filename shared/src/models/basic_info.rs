//! Basic info model (step 1 of the admin wizard)

use super::NOT_AVAILABLE;
use super::serde_helpers::flexible_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Job role of an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeRole {
    Ops,
    Admin,
    Engineer,
    Finance,
}

impl EmployeeRole {
    /// Options in the order the role select shows them
    pub const ALL: [EmployeeRole; 4] = [Self::Ops, Self::Admin, Self::Engineer, Self::Finance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ops => "Ops",
            Self::Admin => "Admin",
            Self::Engineer => "Engineer",
            Self::Finance => "Finance",
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown employee role: {s}"))
    }
}

/// Basic info record as stored by the basic-info service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    /// Server-assigned id (absent until the service stores the record)
    #[serde(
        default,
        deserialize_with = "flexible_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: EmployeeRole,
    pub employee_id: String,
}

impl BasicInfo {
    /// Field equality ignoring the server-assigned id.
    pub fn same_content(&self, other: &BasicInfo) -> bool {
        self.full_name == other.full_name
            && self.email == other.email
            && self.department == other.department
            && self.role == other.role
            && self.employee_id == other.employee_id
    }

    /// Stand-in identity for a details record that has no basic info.
    pub fn placeholder(employee_id: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            department: NOT_AVAILABLE.to_string(),
            role: EmployeeRole::Ops,
            employee_id: employee_id.into(),
        }
    }
}
