//! Employee id generation
//!
//! Ids look like `ENG-003`: the first three letters of the department,
//! upper-cased, and a sequence one past the number of existing ids that
//! start with that code. The count comes from a snapshot of the current
//! records, so two sessions generating at the same time can produce the
//! same id; nothing checks uniqueness against the remote store.

use crate::models::BasicInfo;

/// Generate the next employee id for `department`
pub fn generate_employee_id(department: &str, existing: &[BasicInfo]) -> String {
    let code = department_code(department);
    let taken = existing
        .iter()
        .filter(|e| e.employee_id.starts_with(&code))
        .count();
    format!("{}-{:03}", code, taken + 1)
}

/// First three characters, upper-cased
pub fn department_code(department: &str) -> String {
    department.chars().take(3).collect::<String>().to_uppercase()
}
