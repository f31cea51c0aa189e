use contracts::domain::common::{CrudEntity, EntityId};
use contracts::shared::api::{ListQuery, PaginatedData};

use super::columns::Columns;
use crate::shared::http::ApiError;
use crate::shared::paginator::Paginator;

/// State of one paged, searchable list screen.
///
/// Every load takes a generation number from `begin_load`; `finish_load`
/// drops responses whose generation is no longer the latest, so the last
/// *requested* load wins regardless of arrival order.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub paginator: Paginator,
    pub columns: Columns,
    /// Text in the search box, not yet applied
    pub search_input: String,
    /// Term sent with list requests
    pub search: String,
    pub loading: bool,
    /// Set together with `loading` for loads started by a search
    pub searching: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> ListState<T> {
    pub fn new(page_size: usize, columns: Columns) -> Self {
        Self {
            items: Vec::new(),
            paginator: Paginator::new(page_size),
            columns,
            search_input: String::new(),
            search: String::new(),
            loading: false,
            searching: false,
            error: None,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Query for the current page and active search term.
    pub fn query(&self) -> ListQuery {
        self.paginator.to_query(Some(&self.search))
    }

    /// Idle -> Loading. Supersedes any load still in flight.
    pub fn begin_load(&mut self, is_search: bool) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.searching = is_search;
        self.error = None;
        self.generation
    }

    /// Loading -> Idle. Returns false when the response was stale and ignored.
    pub fn finish_load(&mut self, generation: u64, result: Result<PaginatedData<T>, ApiError>) -> bool {
        if !self.is_current(generation) {
            log::warn!(
                "Dropping stale list response (generation {}, latest {})",
                generation,
                self.generation
            );
            return false;
        }
        self.loading = false;
        self.searching = false;
        match result {
            Ok(page) => {
                self.paginator.update_from_response(&page);
                self.items = page.data;
            }
            Err(e) => {
                log::error!("List load failed: {:?}", e);
                self.error = Some(e.user_message());
            }
        }
        true
    }

    pub fn stage_search(&mut self, text: &str) {
        self.search_input = text.to_string();
    }

    /// Apply the staged search term. No-op (returns false) when it equals
    /// the active one; otherwise resets to the first page.
    pub fn commit_search(&mut self) -> bool {
        let staged = self.search_input.trim();
        if staged == self.search {
            return false;
        }
        self.search = staged.to_string();
        self.paginator.reset();
        true
    }

    /// Drop the search term. Returns false when none was active.
    pub fn clear_search(&mut self) -> bool {
        self.search_input.clear();
        if self.search.is_empty() {
            return false;
        }
        self.search.clear();
        self.paginator.reset();
        true
    }

    pub fn toggle_column(&mut self, key: &str) -> bool {
        self.columns.toggle(key)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: CrudEntity> ListState<T> {
    /// Flip the status flag of one loaded item in place. Returns false when
    /// the item is not on the current page or has no status flag.
    pub fn set_item_status(&mut self, id: EntityId, active: bool) -> bool {
        match self.items.iter_mut().find(|item| item.id() == Some(id)) {
            Some(item) if item.status().is_some() => {
                item.set_status(active);
                true
            }
            _ => false,
        }
    }

    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::crud::columns::Column;
    use contracts::domain::a001_unit::Unit;

    fn unit(id: i64, name: &str) -> Unit {
        Unit {
            id: Some(id),
            name: name.into(),
            short_name: String::new(),
            status: true,
        }
    }

    fn page(current: usize, last: usize, total: usize, data: Vec<Unit>) -> PaginatedData<Unit> {
        PaginatedData {
            current_page: current,
            data,
            from: Some((current - 1) * 10 + 1),
            to: Some(((current - 1) * 10 + 10).min(total)),
            last_page: last,
            per_page: 10,
            total,
        }
    }

    fn state() -> ListState<Unit> {
        ListState::new(10, Columns::new(vec![Column::new("name", "Name")]))
    }

    #[test]
    fn test_successful_load_updates_paginator() {
        let mut s = state();
        let g = s.begin_load(false);
        assert!(s.loading);
        let items = (1..=10).map(|i| unit(i, "u")).collect();
        assert!(s.finish_load(g, Ok(page(2, 3, 25, items))));

        assert!(!s.loading);
        assert_eq!(s.items.len(), 10);
        assert_eq!(s.paginator.current_page, 1);
        assert_eq!(s.paginator.total_pages, 3);
        assert_eq!(s.paginator.page_size, 10);
        assert!(s.paginator.can_go_next());
        assert!(s.paginator.can_go_previous());
    }

    #[test]
    fn test_failed_load_sets_error_and_keeps_items() {
        let mut s = state();
        let g = s.begin_load(false);
        s.finish_load(g, Ok(page(1, 1, 1, vec![unit(1, "a")])));

        let g = s.begin_load(false);
        s.finish_load(g, Err(ApiError::NotFound));
        assert!(!s.loading);
        assert_eq!(s.items.len(), 1);
        assert_eq!(
            s.error.as_deref(),
            Some("The requested resource was not found.")
        );

        // Next load clears the banner
        s.begin_load(false);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_last_requested_load_wins() {
        let mut s = state();
        let first = s.begin_load(false);
        let second = s.begin_load(true);
        assert!(s.searching);

        // Second answers first, then the stale first response arrives
        assert!(s.finish_load(second, Ok(page(1, 1, 1, vec![unit(2, "new")]))));
        assert!(!s.finish_load(first, Ok(page(1, 1, 1, vec![unit(1, "old")]))));

        assert_eq!(s.items[0].name, "new");
        assert!(!s.loading);
        assert!(!s.searching);
    }

    #[test]
    fn test_stale_error_ignored() {
        let mut s = state();
        let first = s.begin_load(false);
        let second = s.begin_load(false);
        assert!(!s.finish_load(first, Err(ApiError::Server(500))));
        assert!(s.loading);
        assert!(s.error.is_none());
        assert!(s.finish_load(second, Ok(page(1, 1, 0, vec![]))));
    }

    #[test]
    fn test_commit_search_only_when_changed() {
        let mut s = state();
        s.paginator.total_pages = 3;
        s.paginator.current_page = 2;

        s.stage_search("abc");
        assert!(s.commit_search());
        assert_eq!(s.search, "abc");
        assert_eq!(s.paginator.current_page, 0);

        // Enter pressed again without changes
        assert!(!s.commit_search());
        s.stage_search("  abc ");
        assert!(!s.commit_search());

        assert_eq!(s.query().search.as_deref(), Some("abc"));
    }

    #[test]
    fn test_clear_search() {
        let mut s = state();
        assert!(!s.clear_search());
        s.stage_search("x");
        s.commit_search();
        assert!(s.clear_search());
        assert!(s.search.is_empty());
        assert_eq!(s.query().search, None);
    }

    #[test]
    fn test_set_item_status_in_place() {
        let mut s = state();
        let g = s.begin_load(false);
        s.finish_load(g, Ok(page(1, 1, 2, vec![unit(1, "a"), unit(2, "b")])));

        assert!(s.set_item_status(2, false));
        assert!(!s.find(2).map(|u| u.status).unwrap_or(true));
        assert!(s.find(1).map(|u| u.status).unwrap_or(false));
        assert!(!s.set_item_status(99, false));
    }
}
