//! Details model (step 2 of the wizard)

use super::serde_helpers::flexible_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employment contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Intern,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Intern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Intern => "Intern",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown employment type: {s}"))
    }
}

/// Details record as stored by the details service
///
/// `employee_id` points at a [`BasicInfo`](super::BasicInfo) record but the
/// details service does not enforce it; ops-created records use `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(
        default,
        deserialize_with = "flexible_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub employee_id: String,
    /// Encoded image payload (`data:image/...;base64,...`)
    pub photo: String,
    pub employment_type: EmploymentType,
    pub office_location: String,
    #[serde(default)]
    pub notes: String,
}
