use contracts::domain::a001_attribute::aggregate::{Attribute, AttributeDto};
use serde_json::{json, Value};

pub const ATTRIBUTES_URL: &str = "/api/attributes";

pub fn initial_values(attribute: &Attribute) -> Value {
    serde_json::to_value(attribute).unwrap_or_else(|_| json!({}))
}

/// Attribute to send; value rows left without a name are dropped
pub fn to_payload(values: &Value) -> Result<AttributeDto, serde_json::Error> {
    let mut dto: AttributeDto = serde_json::from_value(values.clone())?;
    dto.name = dto.name.trim().to_string();
    dto.values.retain(|v| !v.name.trim().is_empty());
    Ok(dto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_value_rows_are_dropped() {
        let dto = to_payload(&json!({
            "name": " Size ",
            "status": true,
            "values": [
                { "name": "S", "status": true },
                { "name": "  ", "status": false },
                { "name": "M", "status": false }
            ]
        }))
        .unwrap();
        assert_eq!(dto.name, "Size");
        assert_eq!(dto.values.len(), 2);
        assert_eq!(dto.values[1].name, "M");
    }

    #[test]
    fn test_initial_values_carry_rows() {
        let attribute: Attribute = serde_json::from_value(json!({
            "_id": "a1",
            "name": "Color",
            "values": [{ "name": "Red", "status": true }]
        }))
        .unwrap();
        let values = initial_values(&attribute);
        assert_eq!(values["name"], json!("Color"));
        assert_eq!(values["values"][0]["name"], json!("Red"));
    }
}
