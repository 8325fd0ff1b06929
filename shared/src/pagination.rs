//! 分页响应

use serde::{Deserialize, Serialize};

/// One page of a list plus the numbers needed to render a pager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// 数据列表
    pub data: Vec<T>,
    /// 总记录数
    pub total: u64,
    /// 当前页码 (从 1 开始)
    pub page: u32,
    /// 每页数量
    pub limit: u32,
    /// 总页数
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(u64::from(limit)) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Slice page `page` (1-based) out of a full list
    pub fn from_full_list(items: Vec<T>, page: u32, limit: u32) -> Self {
        let total = items.len() as u64;
        let (start, end) = page_bounds(page, limit);
        let data = items
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect();
        Self::new(data, total, page, limit)
    }
}

/// Half-open index range `[start, end)` of a 1-based page.
///
/// Page 0 is treated as page 1.
pub fn page_bounds(page: u32, limit: u32) -> (usize, usize) {
    let start = page.max(1).saturating_sub(1) as usize * limit as usize;
    (start, start + limit as usize)
}
