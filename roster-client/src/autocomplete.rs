//! Autocomplete field state
//!
//! Free text narrows the suggestions; only picking a suggestion (or clearing
//! the input) changes the bound value. Dismissing the list with unpicked
//! text reverts the input to the last selection.

use async_trait::async_trait;
use shared::models::NamedRef;

use crate::service::{RecordService, ReferenceKind};
use crate::ClientResult;

/// Where suggestions come from
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn search(&self, query: &str) -> ClientResult<Vec<NamedRef>>;
}

/// Suggestions from a reference collection of the record service
#[derive(Debug, Clone)]
pub struct ReferenceLookup {
    service: RecordService,
    kind: ReferenceKind,
}

impl ReferenceLookup {
    pub fn new(service: RecordService, kind: ReferenceKind) -> Self {
        Self { service, kind }
    }

    pub fn departments(service: RecordService) -> Self {
        Self::new(service, ReferenceKind::Departments)
    }

    pub fn locations(service: RecordService) -> Self {
        Self::new(service, ReferenceKind::Locations)
    }
}

#[async_trait]
impl SuggestionSource for ReferenceLookup {
    async fn search(&self, query: &str) -> ClientResult<Vec<NamedRef>> {
        Ok(self.service.search(self.kind, query).await)
    }
}

#[derive(Debug)]
pub struct Autocomplete<S> {
    source: S,
    input: String,
    selected: String,
    value: String,
    suggestions: Vec<NamedRef>,
    open: bool,
}

impl<S: SuggestionSource> Autocomplete<S> {
    pub fn new(source: S, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            source,
            input: value.clone(),
            selected: value.clone(),
            value,
            suggestions: Vec::new(),
            open: false,
        }
    }

    /// Text shown in the input
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Bound value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn suggestions(&self) -> &[NamedRef] {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Bound value changed from outside (draft restore, form reset)
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.input = value.clone();
        self.selected = value.clone();
        self.value = value;
    }

    pub async fn type_query(&mut self, query: &str) {
        self.input = query.to_string();

        if query.trim().is_empty() {
            self.suggestions.clear();
            self.open = false;
            self.selected.clear();
            self.value.clear();
            return;
        }

        match self.source.search(query).await {
            Ok(found) => {
                self.suggestions = found;
                self.open = true;
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Suggestion lookup failed");
                self.suggestions.clear();
                self.open = false;
            }
        }
    }

    pub fn select(&mut self, suggestion: &NamedRef) {
        self.input = suggestion.name.clone();
        self.selected = suggestion.name.clone();
        self.value = suggestion.name.clone();
        self.open = false;
    }

    /// Close the list (click outside)
    pub fn dismiss(&mut self) {
        self.open = false;
        if self.input != self.selected {
            self.input = self.selected.clone();
            self.value = self.selected.clone();
        }
    }
}
