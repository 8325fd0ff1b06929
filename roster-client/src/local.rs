//! Local record storage
//!
//! Records that could not reach their service are committed here and read
//! back by the listing when the services are down. The pending slot holds
//! the basic info of a submission whose details have not been stored yet.

use shared::models::{BasicInfo, Details, StoredEmployee};

use crate::store::{DurableStore, StoreResult};

/// Key of the locally committed employee set
pub const EMPLOYEES_KEY: &str = "employee-wizard-employees";
/// Key of the single pending basic-info slot
pub const PENDING_BASIC_INFO_KEY: &str = "employee-wizard-pending-basic-info";

#[derive(Debug, Clone)]
pub struct LocalRecords {
    store: DurableStore,
}

impl LocalRecords {
    pub fn new(store: DurableStore) -> Self {
        Self { store }
    }

    /// All stored employees, oldest first
    pub fn all(&self) -> Vec<StoredEmployee> {
        self.store.read(EMPLOYEES_KEY, Vec::new())
    }

    /// Commit a basic-info/details pair
    pub fn add(&self, basic_info: BasicInfo, details: Details) -> StoreResult<()> {
        let mut employees = self.all();
        employees.push(StoredEmployee {
            basic_info,
            details,
        });
        self.store.try_write(EMPLOYEES_KEY, &employees)?;
        tracing::info!(total = employees.len(), "Stored employee locally");
        Ok(())
    }

    /// Commit details that have no basic info, paired with a placeholder
    pub fn add_details_only(&self, details: Details) -> StoreResult<()> {
        let placeholder = BasicInfo::placeholder(details.employee_id.clone());
        self.add(placeholder, details)
    }

    pub fn all_basic_info(&self) -> Vec<BasicInfo> {
        let result: Vec<_> = self.all().into_iter().map(|e| e.basic_info).collect();
        tracing::debug!(count = result.len(), "Local basic info read");
        result
    }

    pub fn all_details(&self) -> Vec<Details> {
        let result: Vec<_> = self.all().into_iter().map(|e| e.details).collect();
        tracing::debug!(count = result.len(), "Local details read");
        result
    }

    // ========== Pending basic info ==========

    /// Replace the pending slot (a previous value is overwritten silently)
    pub fn set_pending(&self, basic_info: &BasicInfo) {
        self.store.write(PENDING_BASIC_INFO_KEY, basic_info);
    }

    /// Peek at the pending slot
    pub fn pending(&self) -> Option<BasicInfo> {
        self.store.read_opt(PENDING_BASIC_INFO_KEY)
    }

    pub fn clear_pending(&self) {
        self.store.remove(PENDING_BASIC_INFO_KEY);
    }

    /// Drop every locally stored record and the pending slot
    pub fn clear(&self) {
        self.store.remove(EMPLOYEES_KEY);
        self.store.remove(PENDING_BASIC_INFO_KEY);
    }
}
