//! Table pagination and filter defaults

use serde::{Deserialize, Serialize};

/// Pagination block as returned by the backend's paginated endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: u32,
    pub next_page: Option<u32>,
    pub page: u32,
    pub paging_counter: u32,
    pub prev_page: Option<u32>,
    pub total_docs: u64,
    pub total_pages: u32,
}

impl PaginationOptions {
    /// Pagination for an empty first page
    pub fn reset(table_length: u32) -> Self {
        Self {
            has_next_page: false,
            has_prev_page: false,
            limit: table_length,
            next_page: None,
            page: 1,
            paging_counter: 1,
            prev_page: None,
            total_docs: 0,
            total_pages: 1,
        }
    }
}

/// Filters applied to the order tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilterOptions {
    pub searchkey: String,
    pub operator: String,
    pub vendor: String,
    pub customer: String,
    pub product: String,
    pub period: Option<String>,
    pub order_status: String,
}

impl Default for TableFilterOptions {
    fn default() -> Self {
        Self {
            searchkey: String::new(),
            operator: String::new(),
            vendor: String::new(),
            customer: String::new(),
            product: String::new(),
            period: None,
            order_status: "open".to_string(),
        }
    }
}

/// Row-number query; missing fields take their defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub index: Option<u64>,
    pub pageno: Option<u64>,
    pub tablelength: Option<u64>,
}

impl PageQuery {
    /// Row number using `table_length` when the query carries none
    pub fn page_number(&self, table_length: u64) -> Option<u64> {
        page_number(
            self.index.unwrap_or(1),
            self.pageno.unwrap_or(1),
            self.tablelength.unwrap_or(table_length),
        )
    }
}

/// One-based row number of the row at zero-based `index` on page `pageno`.
/// `None` if the row number does not fit in a `u64`.
pub fn page_number(index: u64, pageno: u64, table_length: u64) -> Option<u64> {
    table_length
        .checked_mul(pageno.saturating_sub(1))?
        .checked_add(index)?
        .checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_pagination_serializes_camel_case() {
        let json = serde_json::to_value(PaginationOptions::reset(10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hasNextPage": false,
                "hasPrevPage": false,
                "limit": 10,
                "nextPage": null,
                "page": 1,
                "pagingCounter": 1,
                "prevPage": null,
                "totalDocs": 0,
                "totalPages": 1
            })
        );
    }

    #[test]
    fn filters_default_to_open_orders() {
        let filters = TableFilterOptions::default();
        assert_eq!(filters.order_status, "open");
        assert!(filters.searchkey.is_empty());
        assert_eq!(filters.period, None);
    }

    #[test]
    fn page_numbers() {
        assert_eq!(page_number(0, 1, 10), Some(1));
        assert_eq!(page_number(9, 1, 10), Some(10));
        assert_eq!(page_number(0, 3, 10), Some(21));
        assert_eq!(page_number(4, 2, 25), Some(30));
    }

    #[test]
    fn page_number_overflow_is_none() {
        assert_eq!(page_number(0, 3, u64::MAX), None);
        assert_eq!(page_number(u64::MAX, 1, 10), None);
        assert_eq!(page_number(u64::MAX - 1, 1, 10), Some(u64::MAX));
    }

    #[test]
    fn page_query_defaults() {
        assert_eq!(PageQuery::default().page_number(10), Some(2));
        let query = PageQuery {
            index: Some(0),
            pageno: Some(2),
            tablelength: None,
        };
        assert_eq!(query.page_number(15), Some(16));
    }
}
