/// Results shown per page on the result grid
pub const DEFAULT_ITEMS_PER_PAGE: usize = 16;

/// Client-side pager over an already fetched result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    items_per_page: usize,
    /// 1-based
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            current_page: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page)
    }

    /// Jump to `page`, clamped to the valid range
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        let last = self.total_pages(total_items).max(1);
        self.current_page = page.clamp(1, last);
    }

    /// Items of the current page; empty when the page is past the end
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1) * self.items_per_page;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.items_per_page).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (0..40).collect();
        let mut pager = Pagination::default();

        assert_eq!(pager.total_pages(items.len()), 3);
        assert_eq!(pager.slice(&items).len(), 16);

        pager.go_to(3, items.len());
        assert_eq!(pager.slice(&items), &items[32..40]);

        pager.go_to(9, items.len());
        assert_eq!(pager.current_page(), 3);
    }

    #[test]
    fn test_empty_list() {
        let mut pager = Pagination::new(16);
        let items: Vec<u32> = Vec::new();
        assert_eq!(pager.total_pages(0), 0);
        pager.go_to(2, 0);
        assert_eq!(pager.current_page(), 1);
        assert!(pager.slice(&items).is_empty());
    }
}
