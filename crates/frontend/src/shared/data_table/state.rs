use super::cell::row_id;
use super::filter::filter_rows;
use super::pagination::{Pagination, PAGE_SIZE_OPTIONS};
use super::selection::{PageCheckState, Selection};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Everything the table derives from its rows for one render
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub page_rows: Vec<Value>,
    pub filtered_rows: Vec<Value>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_window: Vec<usize>,
    pub page_check: PageCheckState,
}

impl TableView {
    pub fn page_ids(&self) -> Vec<String> {
        self.page_rows.iter().filter_map(row_id).collect()
    }
}

/// Interaction state of a table: search box, column filters, paging and
/// checked rows.
///
/// Every search or filter change prunes the selection to rows that are still
/// visible, so a bulk action never reaches a row the user cannot see.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub search: String,
    pub column_filters: BTreeMap<String, String>,
    pub pagination: Pagination,
    pub selection: Selection,
    /// Search is delegated to the backend; no local text filtering
    pub server_search: bool,
}

impl TableState {
    pub fn new(page_size: usize, server_search: bool) -> Self {
        Self {
            search: String::new(),
            column_filters: BTreeMap::new(),
            pagination: Pagination::new(page_size),
            selection: Selection::default(),
            server_search,
        }
    }

    pub fn filtered(&self, rows: &[Value]) -> Vec<Value> {
        filter_rows(rows, &self.search, &self.column_filters, self.server_search)
    }

    pub fn set_search(&mut self, term: impl Into<String>, rows: &[Value]) {
        self.search = term.into();
        self.after_filter_change(rows);
    }

    /// `None` or an empty value removes the filter on `key`
    pub fn set_column_filter(&mut self, key: &str, value: Option<String>, rows: &[Value]) {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                self.column_filters.insert(key.to_string(), v);
            }
            None => {
                self.column_filters.remove(key);
            }
        }
        self.after_filter_change(rows);
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || !self.column_filters.is_empty()
    }

    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.column_filters.clear();
        self.selection.clear();
        self.pagination.set_page(1);
    }

    /// Only sizes from [`PAGE_SIZE_OPTIONS`] are accepted. The selection is
    /// scoped to the loaded page layout, so it is cleared.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return false;
        }
        self.pagination.set_page_size(page_size);
        self.selection.clear();
        true
    }

    pub fn go_to_page(&mut self, page: usize, rows: &[Value]) {
        self.pagination.set_total(self.filtered(rows).len());
        self.pagination.set_page(page);
    }

    /// The rows changed (refetch after a mutation): forget ids that are gone
    pub fn sync_rows(&mut self, rows: &[Value]) {
        let filtered = self.filtered(rows);
        self.pagination.set_total(filtered.len());
        self.selection.retain(&ids_of(&filtered));
    }

    /// Sync only once a load has finished. An in-flight refetch has no rows,
    /// which would otherwise clamp the page and empty the selection.
    pub fn sync_loaded(&mut self, rows: &[Value], loading: bool) {
        if !loading {
            self.sync_rows(rows);
        }
    }

    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        self.selection.set(id, checked);
    }

    pub fn toggle_page(&mut self, checked: bool, rows: &[Value]) {
        let page_ids = self.view(rows).page_ids();
        self.selection.set_page(&page_ids, checked);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids()
    }

    pub fn view(&self, rows: &[Value]) -> TableView {
        let filtered_rows = self.filtered(rows);

        let mut pagination = self.pagination;
        pagination.set_total(filtered_rows.len());

        let page_rows = pagination.slice(&filtered_rows).to_vec();
        let page_ids: Vec<String> = page_rows.iter().filter_map(row_id).collect();

        TableView {
            page_check: self.selection.page_state(&page_ids),
            current_page: pagination.current_page,
            total_pages: pagination.total_pages(),
            page_window: pagination.page_window(),
            page_rows,
            filtered_rows,
        }
    }

    fn after_filter_change(&mut self, rows: &[Value]) {
        let filtered = self.filtered(rows);
        self.pagination.set_total(filtered.len());
        self.pagination.set_page(1);
        self.selection.retain(&ids_of(&filtered));
    }
}

fn ids_of(rows: &[Value]) -> BTreeSet<String> {
    rows.iter().filter_map(row_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|i| json!({ "_id": i, "name": format!("Item {}", i), "group": if i % 2 == 0 { "even" } else { "odd" } }))
            .collect()
    }

    #[test]
    fn test_search_scenario() {
        let rows = vec![json!({ "_id": 1, "name": "Ann" }), json!({ "_id": 2, "name": "Bob" })];
        let mut state = TableState::new(10, false);
        state.set_search("an", &rows);

        let view = state.view(&rows);
        assert_eq!(view.page_rows, vec![json!({ "_id": 1, "name": "Ann" })]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_empty_data_has_no_pages() {
        let state = TableState::new(10, false);
        let view = state.view(&[]);
        assert_eq!(view.total_pages, 0);
        assert!(view.page_window.is_empty());
        assert!(view.page_rows.is_empty());
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let rows = numbered(35);
        let mut state = TableState::new(10, false);
        state.go_to_page(3, &rows);
        assert_eq!(state.view(&rows).current_page, 3);

        state.set_column_filter("group", Some("even".into()), &rows);
        let view = state.view(&rows);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.filtered_rows.len(), 17);
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn test_select_all_only_selects_visible_page() {
        let rows = numbered(25);
        let mut state = TableState::new(10, false);
        state.go_to_page(2, &rows);
        state.toggle_page(true, &rows);

        let expected: Vec<String> = (11..=20).map(|i| i.to_string()).collect();
        let mut selected = state.selected_ids();
        selected.sort_by_key(|id| id.parse::<usize>().unwrap_or(0));
        assert_eq!(selected, expected);
        assert_eq!(state.view(&rows).page_check, PageCheckState::Checked);
    }

    #[test]
    fn test_selection_survives_page_navigation() {
        let rows = numbered(25);
        let mut state = TableState::new(10, false);
        state.toggle_row("3", true);
        state.go_to_page(3, &rows);
        state.go_to_page(1, &rows);
        assert!(state.selection.contains("3"));
    }

    #[test]
    fn test_filtering_prunes_hidden_selection() {
        let rows = numbered(6);
        let mut state = TableState::new(10, false);
        state.toggle_row("1", true);
        state.toggle_row("2", true);

        state.set_column_filter("group", Some("even".into()), &rows);

        assert_eq!(state.selected_ids(), vec!["2".to_string()]);
    }

    #[test]
    fn test_page_size_change_clears_selection() {
        let rows = numbered(30);
        let mut state = TableState::new(10, false);
        state.toggle_page(true, &rows);
        assert!(state.set_page_size(20));
        assert!(state.selection.is_empty());
        assert_eq!(state.view(&rows).page_rows.len(), 20);
        assert!(!state.set_page_size(15));
    }

    #[test]
    fn test_reset_filters() {
        let rows = numbered(4);
        let mut state = TableState::new(10, false);
        state.set_search("Item 1", &rows);
        state.set_column_filter("group", Some("odd".into()), &rows);
        state.toggle_row("1", true);
        assert!(state.has_active_filters());

        state.reset_filters();

        assert!(!state.has_active_filters());
        assert!(state.selection.is_empty());
        assert_eq!(state.view(&rows).filtered_rows.len(), 4);
    }

    #[test]
    fn test_sync_rows_forgets_deleted_ids() {
        let rows = numbered(3);
        let mut state = TableState::new(10, false);
        state.toggle_row("1", true);
        state.toggle_row("3", true);

        let remaining: Vec<Value> = rows.into_iter().filter(|r| r["_id"] != json!(3)).collect();
        state.sync_rows(&remaining);

        assert_eq!(state.selected_ids(), vec!["1".to_string()]);
    }

    #[test]
    fn test_refetch_keeps_page_and_selection() {
        let rows = numbered(30);
        let mut state = TableState::new(10, false);
        state.go_to_page(3, &rows);
        state.toggle_row("5", true);
        state.toggle_row("25", true);
        state.toggle_row("24", true);

        state.sync_loaded(&[], true);
        assert_eq!(state.pagination.current_page, 3);
        assert_eq!(state.selected_ids().len(), 3);

        let remaining: Vec<Value> = rows.into_iter().filter(|r| r["_id"] != json!(24)).collect();
        state.sync_loaded(&remaining, false);

        assert_eq!(state.view(&remaining).current_page, 3);
        let mut selected = state.selected_ids();
        selected.sort();
        assert_eq!(selected, vec!["25".to_string(), "5".to_string()]);
    }

    #[test]
    fn test_filtered_to_nothing_has_no_pages() {
        let rows = numbered(4);
        let mut state = TableState::new(10, false);
        state.set_search("no such item", &rows);
        let view = state.view(&rows);
        assert!(view.filtered_rows.is_empty());
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn test_server_search_keeps_rows() {
        let rows = numbered(3);
        let mut state = TableState::new(10, true);
        state.set_search("nothing matches", &rows);
        assert_eq!(state.view(&rows).filtered_rows.len(), 3);
    }
}
