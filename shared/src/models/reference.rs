//! Reference data (departments, locations)

use super::serde_helpers::required_flexible_id;
use serde::{Deserialize, Serialize};

/// A named lookup entry as served by `/departments` and `/locations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(deserialize_with = "required_flexible_id")]
    pub id: String,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match on the name
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
