//! Roster Client - data layer for the employee wizard
//!
//! Talks to the basic-info and details services, keeps working when they
//! are down (local durable fallback), persists wizard drafts per role and
//! drives the two-phase submission.

pub mod autocomplete;
pub mod cache;
pub mod config;
pub mod draft;
pub mod error;
pub mod http;
pub mod listing;
pub mod local;
pub mod logger;
pub mod reconcile;
pub mod service;
pub mod store;
pub mod submission;
pub mod wizard;

pub use autocomplete::{Autocomplete, ReferenceLookup, SuggestionSource};
pub use cache::ResponseCache;
pub use config::{ClientConfig, WizardTiming};
pub use draft::{DraftController, DraftState, Role};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use listing::EmployeeListing;
pub use local::LocalRecords;
pub use reconcile::merge;
pub use service::{RecordPage, RecordService, ReferenceKind};
pub use store::DurableStore;
pub use submission::Submission;
pub use wizard::{Wizard, WizardStep};

// Re-export shared types for convenience
pub use shared::models::{
    BasicInfo, BasicInfoDraft, Details, DetailsDraft, DraftData, EmployeeRole, EmployeeView,
    EmploymentType, NamedRef, SubmitProgress, SubmitStep,
};
pub use shared::{FieldErrors, PaginatedResponse};
