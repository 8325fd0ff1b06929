//! Shared types for the roster wizard
//!
//! Record models exchanged with the basic-info and details services,
//! draft and progress types, the pagination envelope, and the pure
//! helpers (validation, employee id generation) used on both sides of
//! the wire.

pub mod employee_id;
pub mod models;
pub mod pagination;
pub mod photo;
pub mod util;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use employee_id::generate_employee_id;
pub use models::{
    BasicInfo, BasicInfoDraft, Details, DetailsDraft, DraftData, EmployeeRole, EmployeeView,
    EmploymentType, NamedRef, StoredEmployee, SubmitProgress, SubmitStep,
};
pub use pagination::PaginatedResponse;
pub use validation::FieldErrors;
