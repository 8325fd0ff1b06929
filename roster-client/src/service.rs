//! Resilient record service
//!
//! Reads and creates basic-info and details records and looks up reference
//! data (departments, locations). Every operation degrades instead of
//! failing when a service is unreachable:
//!
//! - record lists fall back to the locally stored employees
//! - reference lookups fall back to a built-in list
//! - creates fall back to committing the record locally
//!
//! Only failures the fallback itself cannot absorb (an undecodable 2xx
//! body, a local storage error) are returned to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::{BasicInfo, Details, NamedRef};
use shared::pagination::page_bounds;

use crate::cache::ResponseCache;
use crate::local::LocalRecords;
use crate::store::DurableStore;
use crate::{ClientConfig, ClientResult, HttpClient};

/// A list read: the requested slice plus the size of the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    BasicInfo,
    Details,
}

impl RecordKind {
    fn path(&self) -> &'static str {
        match self {
            Self::BasicInfo => "basicInfo",
            Self::Details => "details",
        }
    }
}

/// Reference collections used by the autocomplete fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Departments,
    Locations,
}

impl ReferenceKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::Locations => "locations",
        }
    }

    /// Built-in list used when the service cannot be reached
    pub fn fallback(&self) -> Vec<NamedRef> {
        let names: &[&str] = match self {
            Self::Departments => &["Lending", "Funding", "Operations", "Engineering"],
            Self::Locations => &["Jakarta", "Depok", "Surabaya"],
        };
        names
            .iter()
            .enumerate()
            .map(|(i, name)| NamedRef::new((i + 1).to_string(), *name))
            .collect()
    }
}

/// Pagination only applies when both values are present and non-zero
fn requested_page(page: Option<u32>, limit: Option<u32>) -> Option<(u32, u32)> {
    match (page, limit) {
        (Some(page), Some(limit)) if page > 0 && limit > 0 => Some((page, limit)),
        _ => None,
    }
}

fn list_cache_key(kind: RecordKind, page: Option<u32>, limit: Option<u32>) -> String {
    let part = |v: Option<u32>| v.map_or_else(|| "_".to_string(), |v| v.to_string());
    format!("{}:{}:{}", kind.path(), part(page), part(limit))
}

fn paginate_locally<T>(items: Vec<T>, page: Option<u32>, limit: Option<u32>) -> RecordPage<T> {
    let total = items.len();
    let items = match requested_page(page, limit) {
        Some((page, limit)) => {
            let (start, end) = page_bounds(page, limit);
            items
                .into_iter()
                .skip(start)
                .take(end.saturating_sub(start))
                .collect()
        }
        None => items,
    };
    RecordPage { items, total }
}

/// Record service shared by the wizard and the listing
///
/// Cloning is cheap; clones share the cache and the durable store.
#[derive(Debug, Clone)]
pub struct RecordService {
    http: HttpClient,
    basic_info_url: String,
    details_url: String,
    cache: ResponseCache,
    local: LocalRecords,
}

impl RecordService {
    pub fn new(config: &ClientConfig, store: DurableStore) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            basic_info_url: config.basic_info_url.clone(),
            details_url: config.details_url.clone(),
            cache: ResponseCache::new(config.cache_ttl),
            local: LocalRecords::new(store),
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn local(&self) -> &LocalRecords {
        &self.local
    }

    fn record_url(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::BasicInfo => &self.basic_info_url,
            RecordKind::Details => &self.details_url,
        }
    }

    fn reference_url(&self, kind: ReferenceKind) -> &str {
        match kind {
            ReferenceKind::Departments => &self.basic_info_url,
            ReferenceKind::Locations => &self.details_url,
        }
    }

    /// Drop every cached response
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    // ========== Record lists ==========

    pub async fn list_basic_info(&self, page: Option<u32>, limit: Option<u32>) -> RecordPage<BasicInfo> {
        self.list(RecordKind::BasicInfo, page, limit, || self.local.all_basic_info())
            .await
    }

    pub async fn list_details(&self, page: Option<u32>, limit: Option<u32>) -> RecordPage<Details> {
        self.list(RecordKind::Details, page, limit, || self.local.all_details())
            .await
    }

    async fn list<T>(
        &self,
        kind: RecordKind,
        page: Option<u32>,
        limit: Option<u32>,
        local: impl FnOnce() -> Vec<T>,
    ) -> RecordPage<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let key = list_cache_key(kind, page, limit);
        if let Some(cached) = self.cache.get::<RecordPage<T>>(&key).await {
            return cached;
        }

        match self.fetch_page::<T>(kind, page, limit).await {
            Ok(result) => {
                self.cache.insert(key, &result).await;
                result
            }
            Err(e) => {
                tracing::warn!(kind = kind.path(), error = %e, "Service unavailable, using local records");
                paginate_locally(local(), page, limit)
            }
        }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<RecordPage<T>> {
        let base = self.record_url(kind);

        match requested_page(page, limit) {
            Some((page, limit)) => {
                let (start, end) = page_bounds(page, limit);
                let query = [("_start", start.to_string()), ("_end", end.to_string())];
                let (items, everything) = tokio::try_join!(
                    self.http.get_with_query::<Vec<T>>(base, kind.path(), &query),
                    self.http.get::<Vec<serde_json::Value>>(base, kind.path()),
                )?;
                Ok(RecordPage {
                    items,
                    total: everything.len(),
                })
            }
            None => {
                let items: Vec<T> = self.http.get(base, kind.path()).await?;
                let total = items.len();
                Ok(RecordPage { items, total })
            }
        }
    }

    // ========== Reference data ==========

    /// Full reference collection, or the built-in list when unreachable
    pub async fn all_references(&self, kind: ReferenceKind) -> Vec<NamedRef> {
        let key = format!("{}:all", kind.path());
        if let Some(cached) = self.cache.get::<Vec<NamedRef>>(&key).await {
            return cached;
        }

        match self
            .http
            .get::<Vec<NamedRef>>(self.reference_url(kind), kind.path())
            .await
        {
            Ok(data) => {
                self.cache.insert(key, &data).await;
                data
            }
            Err(e) => {
                tracing::warn!(kind = kind.path(), error = %e, "Service unavailable, using fallback list");
                kind.fallback()
            }
        }
    }

    /// Entries whose name contains `query`, case-insensitively
    pub async fn search(&self, kind: ReferenceKind, query: &str) -> Vec<NamedRef> {
        let query = query.to_lowercase();
        let key = format!("{}:search:{}", kind.path(), query);
        if let Some(cached) = self.cache.get::<Vec<NamedRef>>(&key).await {
            return cached;
        }

        let filtered: Vec<NamedRef> = self
            .all_references(kind)
            .await
            .into_iter()
            .filter(|r| r.matches(&query))
            .collect();
        self.cache.insert(key, &filtered).await;
        filtered
    }

    pub async fn all_departments(&self) -> Vec<NamedRef> {
        self.all_references(ReferenceKind::Departments).await
    }

    pub async fn all_locations(&self) -> Vec<NamedRef> {
        self.all_references(ReferenceKind::Locations).await
    }

    pub async fn search_departments(&self, query: &str) -> Vec<NamedRef> {
        self.search(ReferenceKind::Departments, query).await
    }

    pub async fn search_locations(&self, query: &str) -> Vec<NamedRef> {
        self.search(ReferenceKind::Locations, query).await
    }

    // ========== Creates ==========

    /// Create a basic info record.
    ///
    /// The accepted record (echoed by the service, or the submitted one when
    /// the service is unreachable) becomes the pending basic info that the
    /// details phase pairs with. A resubmission of the record already in the
    /// pending slot is answered from the slot instead of posting it twice. A
    /// corrected record replaces a pending one that only reached the local
    /// queue; one the service already accepted is kept as is.
    pub async fn create_basic_info(&self, record: &BasicInfo) -> ClientResult<BasicInfo> {
        if let Some(pending) = self.pending_for(&record.employee_id) {
            if pending.same_content(record) {
                tracing::info!(employee_id = %record.employee_id, "Basic info already accepted, not posting again");
                return Ok(pending);
            }
            // the service already holds this employee, a second post would duplicate it
            if pending.id.is_some() {
                tracing::warn!(employee_id = %record.employee_id, "Basic info changed after the service accepted it, keeping the accepted record");
                return Ok(pending);
            }
            tracing::info!(employee_id = %record.employee_id, "Queued basic info changed, submitting the corrected record");
        }

        let result = self
            .http
            .post::<BasicInfo, _>(&self.basic_info_url, RecordKind::BasicInfo.path(), record)
            .await;
        self.cache.clear().await;

        match result {
            Ok(created) => {
                tracing::info!(employee_id = %created.employee_id, "Basic info created");
                self.local.set_pending(&created);
                Ok(created)
            }
            Err(e) if e.is_network() => {
                tracing::warn!(employee_id = %record.employee_id, error = %e, "Basic info service unavailable, keeping record as pending");
                self.local.set_pending(record);
                Ok(record.clone())
            }
            Err(e) => Err(e),
        }
    }

    /// Create a details record.
    ///
    /// When the service is unreachable the record is committed locally,
    /// paired with the pending basic info of the same employee or with a
    /// placeholder identity when there is none.
    pub async fn create_details(&self, record: &Details) -> ClientResult<Details> {
        let result = self
            .http
            .post::<Details, _>(&self.details_url, RecordKind::Details.path(), record)
            .await;
        self.cache.clear().await;

        match result {
            Ok(created) => {
                tracing::info!(employee_id = %created.employee_id, "Details created");
                if let Some(pending) = self.pending_for(&record.employee_id) {
                    // no service id: the basic info only ever reached the local queue
                    if pending.id.is_none() {
                        tracing::warn!(employee_id = %pending.employee_id, "Basic info was never accepted remotely, keeping the pair locally");
                        self.local.add(pending, created.clone())?;
                    }
                    self.local.clear_pending();
                }
                Ok(created)
            }
            Err(e) if e.is_network() => {
                tracing::warn!(employee_id = %record.employee_id, error = %e, "Details service unavailable, storing locally");
                match self.pending_for(&record.employee_id) {
                    Some(pending) => {
                        self.local.add(pending, record.clone())?;
                        self.local.clear_pending();
                    }
                    None => self.local.add_details_only(record.clone())?,
                }
                Ok(record.clone())
            }
            Err(e) => Err(e),
        }
    }

    fn pending_for(&self, employee_id: &str) -> Option<BasicInfo> {
        self.local
            .pending()
            .filter(|p| p.employee_id == employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_page() {
        assert_eq!(requested_page(Some(2), Some(5)), Some((2, 5)));
        assert_eq!(requested_page(None, Some(5)), None);
        assert_eq!(requested_page(Some(1), None), None);
        assert_eq!(requested_page(Some(0), Some(5)), None);
    }

    #[test]
    fn test_list_cache_keys_differ_by_page() {
        assert_eq!(list_cache_key(RecordKind::BasicInfo, None, None), "basicInfo:_:_");
        assert_eq!(list_cache_key(RecordKind::Details, Some(2), Some(5)), "details:2:5");
    }

    #[test]
    fn test_paginate_locally() {
        let items: Vec<u32> = (1..=7).collect();
        let page = paginate_locally(items.clone(), Some(2), Some(5));
        assert_eq!(page.items, vec![6, 7]);
        assert_eq!(page.total, 7);

        let all = paginate_locally(items, None, None);
        assert_eq!(all.items.len(), 7);
    }

    #[test]
    fn test_fallback_lists() {
        let departments: Vec<_> = ReferenceKind::Departments
            .fallback()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(departments, vec!["Lending", "Funding", "Operations", "Engineering"]);
        assert_eq!(ReferenceKind::Locations.fallback().len(), 3);
        assert_eq!(ReferenceKind::Locations.fallback()[0], NamedRef::new("1", "Jakarta"));
    }
}
