//! Describe payload model.
//!
//! The describe collaborator returns one JSON document per object:
//! `{ "name": ..., "fields": [{ "name", "custom", "type", "length",
//! "precision", "extraTypeInfo" }, ...] }`. Parsing is separate from the call
//! itself so malformed payloads can be handled at the call site.

use serde::Deserialize;

/// One raw field entry from a describe payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    /// Field API name.
    pub name: String,

    /// Whether the field was added beyond the built-in schema.
    #[serde(default)]
    pub custom: bool,

    /// Declared field type.
    #[serde(rename = "type")]
    pub field_type: String,

    /// Declared maximum text length, for types that carry one.
    #[serde(default)]
    pub length: Option<u32>,

    /// Declared numeric precision, for types that carry one.
    #[serde(default)]
    pub precision: Option<u32>,

    /// Subtype hint code (e.g. "externallookup", "plaintextarea").
    #[serde(default)]
    pub extra_type_info: Option<String>,
}

/// Top-level describe payload for one object.
#[derive(Debug, Clone, Deserialize)]
pub struct DescribeResponse {
    /// Object API name as reported by the service.
    pub name: String,

    /// Full field list in schema order.
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// Parse a describe payload.
pub fn parse_describe(payload: &str) -> Result<DescribeResponse, serde_json::Error> {
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_realistic_payload() {
        let payload = r#"{
            "name": "Routing_Rule__mdt",
            "label": "Routing Rule",
            "fields": [
                {
                    "name": "Payload__c",
                    "custom": true,
                    "type": "string",
                    "length": 300,
                    "extraTypeInfo": "plaintextarea",
                    "nillable": true
                },
                {
                    "name": "Weight__c",
                    "custom": true,
                    "type": "double",
                    "precision": 18,
                    "scale": 2
                }
            ]
        }"#;

        let described = parse_describe(payload).unwrap();
        assert_eq!(described.name, "Routing_Rule__mdt");
        assert_eq!(described.fields.len(), 2);

        let payload_field = &described.fields[0];
        assert!(payload_field.custom);
        assert_eq!(payload_field.field_type, "string");
        assert_eq!(payload_field.length, Some(300));
        assert_eq!(payload_field.extra_type_info.as_deref(), Some("plaintextarea"));

        let weight_field = &described.fields[1];
        assert_eq!(weight_field.precision, Some(18));
        assert_eq!(weight_field.length, None);
        assert_eq!(weight_field.extra_type_info, None);
    }

    #[test]
    fn missing_optional_attributes_default() {
        let payload = r#"{"name": "X__mdt", "fields": [{"name": "F", "type": "boolean"}]}"#;

        let described = parse_describe(payload).unwrap();
        let field = &described.fields[0];
        assert!(!field.custom);
        assert_eq!(field.length, None);
        assert_eq!(field.precision, None);
    }

    #[test]
    fn missing_fields_array_is_empty() {
        let described = parse_describe(r#"{"name": "X__mdt"}"#).unwrap();
        assert!(described.fields.is_empty());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_describe("not json").is_err());
        assert!(parse_describe(r#"{"fields": []}"#).is_err());
    }
}
