//! Employee listing
//!
//! Reads both record collections concurrently, joins them into display
//! rows and pages the result on the client.

use shared::models::EmployeeView;
use shared::PaginatedResponse;

use crate::reconcile::merge;
use crate::service::RecordService;

/// Rows per listing page
pub const PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone)]
pub struct EmployeeListing {
    service: RecordService,
    page_size: u32,
}

impl EmployeeListing {
    pub fn new(service: RecordService) -> Self {
        Self {
            service,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Every employee, merged
    pub async fn load_all(&self) -> Vec<EmployeeView> {
        let (basic_info, details) = tokio::join!(
            self.service.list_basic_info(None, None),
            self.service.list_details(None, None)
        );
        tracing::debug!(
            basic_info = basic_info.items.len(),
            details = details.items.len(),
            "Loaded employee records"
        );
        merge(&basic_info.items, &details.items)
    }

    /// One page of merged rows, 1-based
    pub async fn load_page(&self, page: u32) -> PaginatedResponse<EmployeeView> {
        PaginatedResponse::from_full_list(self.load_all().await, page.max(1), self.page_size)
    }
}
