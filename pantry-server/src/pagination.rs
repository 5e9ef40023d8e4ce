//! Page arithmetic for the community wall

/// Posts per wall page
pub const PAGE_SIZE: i64 = 12;

/// Which slice of the wall a request reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based, always within `1..=max(total_pages, 1)`
    pub page: i64,
    pub total_pages: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Clamp `requested` onto the pages `total` posts fill
    ///
    /// An empty wall reports zero pages but still serves page 1.
    pub fn clamp(total: i64, requested: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total > 0 { (total - 1) / per_page + 1 } else { 0 };
        let page = requested.clamp(1, total_pages.max(1));

        Self {
            page,
            total_pages,
            limit: per_page,
            offset: (page - 1) * per_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let p = Pagination::clamp(30, 2, PAGE_SIZE);
        assert_eq!(p, Pagination { page: 2, total_pages: 3, limit: 12, offset: 12 });
        assert!(p.has_next());
    }

    #[test]
    fn test_requested_page_clamped() {
        let high = Pagination::clamp(13, 99, PAGE_SIZE);
        assert_eq!((high.page, high.offset), (2, 12));
        assert!(!high.has_next());

        let low = Pagination::clamp(13, -4, PAGE_SIZE);
        assert_eq!((low.page, low.offset), (1, 0));
    }

    #[test]
    fn test_empty_wall() {
        let p = Pagination::clamp(0, 3, PAGE_SIZE);
        assert_eq!(p, Pagination { page: 1, total_pages: 0, limit: 12, offset: 0 });
        assert!(!p.has_next());
    }

    #[test]
    fn test_full_last_page() {
        let p = Pagination::clamp(24, 2, PAGE_SIZE);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next());
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let p = Pagination::clamp(3, 2, 0);
        assert_eq!((p.total_pages, p.limit, p.offset), (3, 1, 1));
    }
}
