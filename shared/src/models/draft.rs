//! Draft models
//!
//! In-progress wizard input, persisted per role. Every field is optional
//! in practice: a draft may be saved after a single keystroke.

use super::serde_helpers::empty_as_none;
use super::{BasicInfo, Details, EmployeeRole, EmploymentType};
use serde::{Deserialize, Serialize};

/// Partially filled basic info form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfoDraft {
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub role: Option<EmployeeRole>,
    pub employee_id: String,
}

impl BasicInfoDraft {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<&BasicInfo> for BasicInfoDraft {
    fn from(info: &BasicInfo) -> Self {
        Self {
            full_name: info.full_name.clone(),
            email: info.email.clone(),
            department: info.department.clone(),
            role: Some(info.role),
            employee_id: info.employee_id.clone(),
        }
    }
}

/// Partially filled details form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailsDraft {
    pub photo: String,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    pub office_location: String,
    pub notes: String,
}

impl DetailsDraft {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<&Details> for DetailsDraft {
    fn from(details: &Details) -> Self {
        Self {
            photo: details.photo.clone(),
            employment_type: Some(details.employment_type),
            office_location: details.office_location.clone(),
            notes: details.notes.clone(),
        }
    }
}

/// Persisted wizard state for one role
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfoDraft>,
    pub details: DetailsDraft,
    /// Milliseconds since the Unix epoch at write time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl DraftData {
    /// Nothing worth persisting
    pub fn is_empty(&self) -> bool {
        self.basic_info.is_none() && self.details.is_empty()
    }

    /// Same form content, ignoring when it was written
    pub fn same_content(&self, other: &DraftData) -> bool {
        self.basic_info == other.basic_info && self.details == other.details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_select_reads_as_unset() {
        let json = r#"{"details":{"photo":"","employmentType":"","officeLocation":"Depok"}}"#;
        let draft: DraftData = serde_json::from_str(json).unwrap();
        assert_eq!(draft.details.employment_type, None);
        assert_eq!(draft.details.office_location, "Depok");
        assert!(draft.basic_info.is_none());
    }

    #[test]
    fn test_is_empty() {
        let mut draft = DraftData::default();
        assert!(draft.is_empty());
        draft.details.notes = "x".into();
        assert!(!draft.is_empty());

        let only_basic = DraftData {
            basic_info: Some(BasicInfoDraft::default()),
            ..Default::default()
        };
        assert!(!only_basic.is_empty());
    }

    #[test]
    fn test_same_content_ignores_timestamp() {
        let a = DraftData {
            timestamp: Some(1),
            ..Default::default()
        };
        let b = DraftData {
            timestamp: Some(2),
            ..Default::default()
        };
        assert!(a.same_content(&b));
        assert_ne!(a, b);
    }
}
