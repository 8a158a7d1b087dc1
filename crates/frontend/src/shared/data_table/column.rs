use leptos::prelude::AnyView;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Custom cell projection: `(cell value, whole row) -> view`
pub type CellRender = Arc<dyn Fn(&Value, &Value) -> AnyView + Send + Sync>;

/// One table column. `key` may be a dotted path into nested objects
/// (`"category.name"`).
#[derive(Clone)]
pub struct ColumnSchema {
    pub key: String,
    pub header: String,
    pub filterable: bool,
    pub render: Option<CellRender>,
}

impl ColumnSchema {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            filterable: false,
            render: None,
        }
    }

    /// Offer a dropdown of the column's distinct values
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Value) -> AnyView + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("filterable", &self.filterable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
