//! Paged-list position tracking.
//!
//! The backend counts pages from 1, the UI from 0. `Paginator` keeps the
//! 0-based view and converts at the edges.

use contracts::shared::api::{ListQuery, PaginatedData};

/// A navigation request from the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Previous,
    Next,
    Last,
    /// 0-based
    To(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    /// 0-based
    pub current_page: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on the page, as reported by the server
    pub from: Option<usize>,
    pub to: Option<usize>,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 0,
            page_size: page_size.max(1),
            total_elements: 0,
            total_pages: 0,
            from: None,
            to: None,
        }
    }

    /// Mirror the server's page payload. Values are stored as sent.
    pub fn update_from_response<T>(&mut self, page: &PaginatedData<T>) {
        self.current_page = page.current_page.saturating_sub(1);
        self.page_size = page.per_page;
        self.total_elements = page.total;
        self.total_pages = page.last_page;
        self.from = page.from;
        self.to = page.to;
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 0 && self.total_pages > 0
    }

    /// Returns whether the page moved.
    pub fn next_page(&mut self) -> bool {
        if self.can_go_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.can_go_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Out-of-range targets are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < self.total_pages && page != self.current_page {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn go_to_first(&mut self) -> bool {
        self.go_to_page(0)
    }

    pub fn go_to_last(&mut self) -> bool {
        match self.total_pages {
            0 => false,
            n => self.go_to_page(n - 1),
        }
    }

    /// Returns true when the current page changed.
    pub fn apply(&mut self, step: PageMove) -> bool {
        match step {
            PageMove::First => self.go_to_first(),
            PageMove::Previous => self.previous_page(),
            PageMove::Next => self.next_page(),
            PageMove::Last => self.go_to_last(),
            PageMove::To(page) => self.go_to_page(page),
        }
    }

    /// Changing the page size restarts from the first page. Zero is ignored.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 || size == self.page_size {
            return false;
        }
        self.page_size = size;
        self.current_page = 0;
        true
    }

    /// Back to the first page, keeping the page size.
    pub fn reset(&mut self) {
        self.current_page = 0;
    }

    /// Window of at most `max_visible` page indices around the current page.
    ///
    /// The window is shifted (not shrunk) near the edges, so it stays exactly
    /// `min(total_pages, max_visible)` wide.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages == 0 || max_visible == 0 {
            return Vec::new();
        }
        if self.total_pages <= max_visible {
            return (0..self.total_pages).collect();
        }
        let current = self.current_page.min(self.total_pages - 1);
        let half = max_visible / 2;
        let start = current
            .saturating_sub(half)
            .min(self.total_pages - max_visible);
        (start..start + max_visible).collect()
    }

    /// Query for the backend (1-based page).
    pub fn to_query(&self, search: Option<&str>) -> ListQuery {
        ListQuery::new(self.current_page + 1, self.page_size, search)
    }

    /// "11–20 of 25"
    pub fn range_label(&self) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) => format!("{}–{} of {}", from, to, self.total_elements),
            _ => format!("0 of {}", self.total_elements),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(current: usize, per_page: usize, total: usize, last: usize) -> PaginatedData<u8> {
        PaginatedData {
            current_page: current,
            data: Vec::new(),
            from: Some((current - 1) * per_page + 1),
            to: Some((current * per_page).min(total)),
            last_page: last,
            per_page,
            total,
        }
    }

    fn paginator_with(total: usize, page_size: usize) -> Paginator {
        let mut p = Paginator::new(page_size);
        p.total_elements = total;
        p.total_pages = total.div_ceil(page_size);
        p
    }

    #[test]
    fn test_update_from_response_converts_to_zero_based() {
        let mut p = Paginator::new(5);
        p.update_from_response(&page(2, 10, 25, 3));
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page_size, 10);
        assert_eq!(p.total_elements, 25);
        assert!(p.can_go_next());
        assert!(p.can_go_previous());
        assert_eq!(p.range_label(), "11–20 of 25");
    }

    #[test]
    fn test_round_trip_for_every_page() {
        for k in 1..=7 {
            let mut p = Paginator::new(10);
            p.update_from_response(&page(k, 10, 70, 7));
            assert_eq!(p.current_page, k - 1);
            assert_eq!(p.to_query(None).page, k);
        }
    }

    #[test]
    fn test_next_and_previous_stay_in_bounds() {
        let mut p = paginator_with(25, 10);
        assert!(!p.previous_page());
        assert!(p.next_page());
        assert!(p.next_page());
        assert!(!p.next_page());
        assert_eq!(p.current_page, 2);
        assert!(p.previous_page());
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn test_go_to_page_never_leaves_range() {
        for page_size in 1..=12 {
            for total in 0..=40 {
                let mut p = paginator_with(total, page_size);
                let last = total.div_ceil(page_size);
                for target in 0..=last + 2 {
                    p.go_to_page(target);
                    if last == 0 {
                        assert_eq!(p.current_page, 0);
                    } else {
                        assert!(p.current_page < last);
                    }
                }
            }
        }
    }

    #[test]
    fn test_go_to_out_of_range_is_ignored() {
        let mut p = paginator_with(30, 10);
        p.go_to_page(1);
        assert!(!p.go_to_page(3));
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn test_page_numbers_window_properties() {
        for total_pages in 0..=15 {
            for max_visible in 1..=7 {
                for current in 0..total_pages.max(1) {
                    let mut p = Paginator::new(10);
                    p.total_pages = total_pages;
                    p.current_page = current;
                    let pages = p.page_numbers(max_visible);
                    assert_eq!(pages.len(), total_pages.min(max_visible));
                    assert!(pages.iter().all(|&n| n < total_pages));
                    assert!(pages.windows(2).all(|w| w[1] == w[0] + 1));
                    if total_pages > 0 {
                        assert!(pages.contains(&current));
                    }
                }
            }
        }
    }

    #[test]
    fn test_page_numbers_centered() {
        let mut p = paginator_with(200, 10);
        p.current_page = 10;
        assert_eq!(p.page_numbers(5), vec![8, 9, 10, 11, 12]);
        p.current_page = 0;
        assert_eq!(p.page_numbers(5), vec![0, 1, 2, 3, 4]);
        p.current_page = 19;
        assert_eq!(p.page_numbers(5), vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_empty_list() {
        let p = paginator_with(0, 10);
        assert!(p.page_numbers(5).is_empty());
        assert!(!p.can_go_next());
        assert!(!p.can_go_previous());
        assert_eq!(p.range_label(), "0 of 0");
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut p = paginator_with(100, 10);
        p.go_to_page(4);
        assert!(p.set_page_size(25));
        assert_eq!(p.current_page, 0);
        assert!(!p.set_page_size(0));
        assert_eq!(p.page_size, 25);
    }

    #[test]
    fn test_apply_page_moves() {
        let mut p = paginator_with(45, 10);
        assert!(!p.apply(PageMove::Previous));
        assert!(!p.apply(PageMove::First));
        assert!(p.apply(PageMove::Next));
        assert_eq!(p.current_page, 1);
        assert!(p.apply(PageMove::Last));
        assert_eq!(p.current_page, 4);
        assert!(!p.apply(PageMove::Next));
        assert!(!p.apply(PageMove::Last));
        assert!(p.apply(PageMove::Previous));
        assert_eq!(p.current_page, 3);
        assert!(p.apply(PageMove::To(2)));
        assert!(!p.apply(PageMove::To(5)));
        assert_eq!(p.current_page, 2);
        assert!(p.apply(PageMove::First));
        assert_eq!(p.current_page, 0);
    }

    #[test]
    fn test_last_on_empty_list_is_ignored() {
        let mut p = paginator_with(0, 10);
        assert!(!p.apply(PageMove::Last));
        assert_eq!(p.current_page, 0);
    }
}
