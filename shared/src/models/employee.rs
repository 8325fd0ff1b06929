//! Employee listing models

use super::{BasicInfo, Details, EmployeeRole};
use serde::{Deserialize, Serialize};

/// One row of the employee listing: basic info joined with details.
///
/// Derived on the client, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: EmployeeRole,
    pub location: String,
    pub photo: String,
    pub employee_id: String,
}

/// A record pair kept in local fallback storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEmployee {
    pub basic_info: BasicInfo,
    pub details: Details,
}
