use serde::{Deserialize, Serialize};

/// Body of a bulk `DELETE` request: `{"ids": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

impl BulkDeleteRequest {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_ids_object() {
        let req = BulkDeleteRequest::new(vec!["a".into(), "b".into()]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "ids": ["a", "b"] })
        );
    }
}
