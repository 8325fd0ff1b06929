//! Form validation
//!
//! Field-scoped checks for the two wizard steps. Errors are keyed by the
//! camelCase field name so a form can show each message next to its input.
//! Validation never touches the network.

use crate::models::{BasicInfo, BasicInfoDraft, Details, DetailsDraft};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

/// Basic email shape check: something@something.something, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_errors(.0))]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Drop the error for one field (the user started editing it)
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

fn join_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// On-blur email check. Wording differs slightly from the submit check.
pub fn validate_email_field(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

/// Validate step 1 and build the record to submit
pub fn validate_basic_info(draft: &BasicInfoDraft) -> Result<BasicInfo, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.full_name.trim().is_empty() {
        errors.insert("fullName", "Full name is required");
    }

    if draft.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&draft.email) {
        errors.insert("email", "Invalid email format");
    }

    if draft.department.trim().is_empty() {
        errors.insert("department", "Department is required");
    }

    if draft.role.is_none() {
        errors.insert("role", "Role is required");
    }

    if draft.employee_id.is_empty() {
        errors.insert("employeeId", "Employee ID has not been generated");
    }

    errors.into_result(|| BasicInfo {
        id: None,
        full_name: draft.full_name.clone(),
        email: draft.email.clone(),
        department: draft.department.clone(),
        role: draft.role.unwrap_or(crate::models::EmployeeRole::Ops),
        employee_id: draft.employee_id.clone(),
    })
}

/// Validate step 2 and build the record to submit
pub fn validate_details(draft: &DetailsDraft, employee_id: &str) -> Result<Details, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.photo.trim().is_empty() {
        errors.insert("photo", "Photo is required");
    }

    if draft.employment_type.is_none() {
        errors.insert("employmentType", "Employment type is required");
    }

    if draft.office_location.trim().is_empty() {
        errors.insert("officeLocation", "Office location is required");
    }

    errors.into_result(|| Details {
        id: None,
        employee_id: employee_id.to_string(),
        photo: draft.photo.clone(),
        employment_type: draft
            .employment_type
            .unwrap_or(crate::models::EmploymentType::FullTime),
        office_location: draft.office_location.clone(),
        notes: draft.notes.clone(),
    })
}

impl BasicInfoDraft {
    /// Whether the "Next" button is enabled
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && is_valid_email(&self.email)
            && !self.department.trim().is_empty()
            && self.role.is_some()
            && !self.employee_id.is_empty()
    }
}

impl DetailsDraft {
    /// Whether the "Submit" button is enabled
    pub fn is_complete(&self) -> bool {
        !self.photo.trim().is_empty()
            && self.employment_type.is_some()
            && !self.office_location.trim().is_empty()
    }
}
