use std::collections::BTreeSet;

/// Header checkbox state for the visible page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Ids of the checked rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn set(&mut self, id: &str, checked: bool) {
        if checked {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn toggle(&mut self, id: &str) {
        let checked = !self.contains(id);
        self.set(id, checked);
    }

    /// Check or uncheck only the given (visible page) ids
    pub fn set_page(&mut self, page_ids: &[String], checked: bool) {
        for id in page_ids {
            self.set(id, checked);
        }
    }

    pub fn page_state(&self, page_ids: &[String]) -> PageCheckState {
        let selected = page_ids.iter().filter(|id| self.contains(id)).count();
        if page_ids.is_empty() || selected == 0 {
            PageCheckState::Unchecked
        } else if selected == page_ids.len() {
            PageCheckState::Checked
        } else {
            PageCheckState::Indeterminate
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop every id not in `visible`
    pub fn retain(&mut self, visible: &BTreeSet<String>) {
        self.ids.retain(|id| visible.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_all_touches_only_the_page() {
        let mut sel = Selection::default();
        sel.set("outside", true);
        sel.set_page(&ids(&["1", "2"]), true);
        assert_eq!(sel.ids(), ids(&["1", "2", "outside"]));

        sel.set_page(&ids(&["1", "2"]), false);
        assert_eq!(sel.ids(), ids(&["outside"]));
    }

    #[test]
    fn test_page_state() {
        let mut sel = Selection::default();
        let page = ids(&["1", "2"]);
        assert_eq!(sel.page_state(&page), PageCheckState::Unchecked);
        sel.toggle("1");
        assert_eq!(sel.page_state(&page), PageCheckState::Indeterminate);
        sel.toggle("2");
        assert_eq!(sel.page_state(&page), PageCheckState::Checked);
        assert_eq!(sel.page_state(&[]), PageCheckState::Unchecked);
    }

    #[test]
    fn test_retain_and_clear() {
        let mut sel = Selection::default();
        sel.set_page(&ids(&["1", "2", "3"]), true);
        sel.retain(&["2".to_string()].into_iter().collect());
        assert_eq!(sel.ids(), ids(&["2"]));
        sel.clear();
        assert!(sel.is_empty());
    }
}
