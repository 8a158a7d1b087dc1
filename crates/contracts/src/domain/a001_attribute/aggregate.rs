use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One allowed value of an attribute (e.g. "Cotton" for "Material")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttributeValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: bool,
}

/// Product attribute as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Attribute {
    /// Comma-joined value names for list display
    pub fn values_label(&self) -> String {
        self.values
            .iter()
            .map(|v| v.name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create/update payload; the id travels in the URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttributeDto {
    pub name: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl From<Attribute> for AttributeDto {
    fn from(a: Attribute) -> Self {
        Self {
            name: a.name,
            status: a.status,
            values: a.values,
        }
    }
}
