use super::cell::row_id;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Where "edit" goes for a row
#[derive(Clone)]
pub enum EditPath {
    /// Base route; the row id is substituted for `:id` or appended
    Static(String),
    ForRow(Arc<dyn Fn(&Value) -> String + Send + Sync>),
}

impl EditPath {
    pub fn for_row<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self::ForRow(Arc::new(f))
    }

    pub fn resolve(&self, row: &Value) -> String {
        match self {
            Self::ForRow(f) => f(row),
            Self::Static(base) => {
                let id = row_id(row).unwrap_or_default();
                if base.contains(":id") {
                    base.replace(":id", &urlencoding::encode(&id))
                } else {
                    format!("{}/{}", base.trim_end_matches('/'), urlencoding::encode(&id))
                }
            }
        }
    }
}

impl fmt::Debug for EditPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(base) => f.debug_tuple("Static").field(base).finish(),
            Self::ForRow(_) => f.write_str("ForRow(..)"),
        }
    }
}

/// Outcome of an add/edit click. A route wins over a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    Navigate(String),
    Callback,
    Unavailable,
}

impl ActionTarget {
    pub fn for_add(add_path: Option<&str>, has_callback: bool) -> Self {
        match add_path {
            Some(path) => Self::Navigate(path.to_string()),
            None if has_callback => Self::Callback,
            None => Self::Unavailable,
        }
    }

    pub fn for_edit(edit_path: Option<&EditPath>, has_callback: bool, row: &Value) -> Self {
        match edit_path {
            Some(path) => Self::Navigate(path.resolve(row)),
            None if has_callback => Self::Callback,
            None => Self::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_takes_precedence_over_callback() {
        assert_eq!(
            ActionTarget::for_add(Some("/attributes/new"), true),
            ActionTarget::Navigate("/attributes/new".into())
        );
        assert_eq!(ActionTarget::for_add(None, true), ActionTarget::Callback);
        assert_eq!(ActionTarget::for_add(None, false), ActionTarget::Unavailable);
    }

    #[test]
    fn test_static_edit_path_appends_or_substitutes_id() {
        let row = json!({ "_id": "a1" });
        assert_eq!(EditPath::Static("/attributes".into()).resolve(&row), "/attributes/a1");
        assert_eq!(
            EditPath::Static("/attributes/:id/edit".into()).resolve(&row),
            "/attributes/a1/edit"
        );
    }

    #[test]
    fn test_edit_path_for_row() {
        let path = EditPath::for_row(|row| format!("/products/{}", row["code"].as_str().unwrap_or("")));
        let row = json!({ "_id": "p1", "code": "SKU-1" });
        assert_eq!(
            ActionTarget::for_edit(Some(&path), true, &row),
            ActionTarget::Navigate("/products/SKU-1".into())
        );
        assert_eq!(ActionTarget::for_edit(None, true, &row), ActionTarget::Callback);
    }
}
