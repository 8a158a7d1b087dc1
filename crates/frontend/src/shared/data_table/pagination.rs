//! Client-side pagination

/// Page sizes offered in the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];
/// Page-number buttons shown at once
const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items per page
    pub page_size: usize,
    /// Current page number (1-indexed)
    pub current_page: usize,
    /// Total number of items after filtering
    pub total_items: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_items: 0,
        }
    }

    /// `ceil(total_items / page_size)`; zero for an empty set
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size.max(1))
    }

    /// Start index of the current page (0-indexed)
    pub fn start_index(&self) -> usize {
        (self.current_page.saturating_sub(1) * self.page_size).min(self.total_items)
    }

    /// End index of the current page (exclusive)
    pub fn end_index(&self) -> usize {
        (self.start_index() + self.page_size).min(self.total_items)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index().min(items.len());
        let end = self.end_index().min(items.len()).max(start);
        &items[start..end]
    }

    /// Update the item count, pulling the current page back into range
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.set_page(self.current_page);
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Up to five page numbers centred on the current page, anchored at the
    /// first and last pages
    pub fn page_window(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total <= PAGE_WINDOW {
            return (1..=total).collect();
        }
        let half = PAGE_WINDOW / 2;
        let start = if self.current_page <= half + 1 {
            1
        } else if self.current_page + half >= total {
            total + 1 - PAGE_WINDOW
        } else {
            self.current_page - half
        };
        (start..start + PAGE_WINDOW).collect()
    }
}
