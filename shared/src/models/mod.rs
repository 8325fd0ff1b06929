//! Data models
//!
//! Field names follow the JSON shape of the basic-info and details
//! services (camelCase). Records coming back from the services may carry
//! a server-assigned `id`, which is accepted as either a string or a number.

pub mod basic_info;
pub mod details;
pub mod draft;
pub mod employee;
pub mod progress;
pub mod reference;
pub(crate) mod serde_helpers;

// Re-exports
pub use basic_info::*;
pub use details::*;
pub use draft::*;
pub use employee::*;
pub use progress::*;
pub use reference::*;

/// Placeholder text used for identity fields that are unknown.
pub const NOT_AVAILABLE: &str = "N/A";
