//! Root wrapper of every routed page.
//!
//! Puts two attributes on the root element so a page can be found from the
//! DOM inspector:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a001_attribute--list"`
//!   - `data-page-category`: [`PageCategory::as_str`]

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    /// Table of records
    List,
    /// Create/edit form of one record
    Detail,
}

impl PageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Self::List => "page",
            Self::Detail => "page page--detail",
        }
    }
}

/// `true` for ids shaped `{entity}--{category}`
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a002_product--detail"`
    page_id: &'static str,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("page id `{}` is not `entity--category`", page_id);
    }

    view! {
        <div
            id=page_id
            class=category.css_class()
            data-page-category=category.as_str()
        >
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_attribute--list"));
        assert!(!is_valid_page_id("a001_attribute"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_attribute--"));
    }
}
