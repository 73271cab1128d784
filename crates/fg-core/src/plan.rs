//! Query planner: one retrieval query per object with flagged fields.

use fg_common::ClassifiedSchema;

/// One planned record-retrieval query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    /// Object the query selects from.
    pub object: String,

    /// SOQL statement selecting exactly the flagged fields.
    pub soql: String,
}

/// Build one query per object with at least one classified field.
///
/// Objects with an empty classified list produce no query: there is nothing
/// oversized to measure.
pub fn plan_queries(schema: &ClassifiedSchema) -> Vec<PlannedQuery> {
    schema
        .iter()
        .filter(|(_, fields)| !fields.is_empty())
        .map(|(object, fields)| {
            let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
            PlannedQuery {
                object: object.clone(),
                soql: format!("SELECT {} FROM {}", names.join(", "), object),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_common::{FieldDescriptor, LimitKind};

    fn descriptor(name: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            field_type: "string".to_string(),
            limit_kind: LimitKind::Length,
            declared_length: Some(300),
            declared_precision: None,
            extra_type_info: None,
        }
    }

    #[test]
    fn objects_without_flagged_fields_produce_no_query() {
        let mut schema = ClassifiedSchema::new();
        schema.insert("Flagged__mdt".to_string(), vec![descriptor("Payload__c")]);
        schema.insert("Clean__mdt".to_string(), Vec::new());

        let queries = plan_queries(&schema);

        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].object, "Flagged__mdt");
        assert_eq!(queries[0].soql, "SELECT Payload__c FROM Flagged__mdt");
    }

    #[test]
    fn field_order_follows_the_classified_list() {
        let mut schema = ClassifiedSchema::new();
        schema.insert(
            "Rule__mdt".to_string(),
            vec![descriptor("Zeta__c"), descriptor("Alpha__c")],
        );

        let queries = plan_queries(&schema);

        assert_eq!(queries[0].soql, "SELECT Zeta__c, Alpha__c FROM Rule__mdt");
    }

    #[test]
    fn empty_schema_plans_nothing() {
        assert!(plan_queries(&ClassifiedSchema::new()).is_empty());
    }
}
