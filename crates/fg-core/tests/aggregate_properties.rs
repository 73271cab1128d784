//! Property tests for the statistics aggregator.

use fg_common::ClassifiedSchema;
use fg_core::aggregate::aggregate;
use fg_core::query::{Record, RecordBatch};
use proptest::prelude::*;
use serde_json::{json, Value};

fn record(object: &str, fields: &[(&str, Value)]) -> Record {
    let mut record = Record::new();
    record.insert("attributes".to_string(), json!({ "type": object }));
    for (name, value) in fields {
        record.insert(name.to_string(), value.clone());
    }
    record
}

fn batch(object: &str, records: Vec<Record>) -> RecordBatch {
    RecordBatch {
        object: object.to_string(),
        total_size: records.len() as u64,
        records,
    }
}

proptest! {
    #[test]
    fn longest_never_below_shortest(values in proptest::collection::vec(".{0,40}", 1..20)) {
        let records: Vec<Record> = values
            .iter()
            .map(|v| record("Case__mdt", &[("Payload__c", json!(v))]))
            .collect();

        let report = aggregate(&[batch("Case__mdt", records)], &ClassifiedSchema::new());

        let stat = &report["Case__mdt"]["Payload__c"];
        prop_assert!(stat.longest >= stat.shortest);
        prop_assert_eq!(stat.count, values.len() as u64);

        let lengths: Vec<u32> = values.iter().map(|v| v.chars().count() as u32).collect();
        prop_assert_eq!(stat.longest, *lengths.iter().max().unwrap());
        prop_assert_eq!(stat.shortest, *lengths.iter().min().unwrap());
    }

    #[test]
    fn count_tracks_field_presence(present in proptest::collection::vec(any::<bool>(), 1..30)) {
        let records: Vec<Record> = present
            .iter()
            .map(|&p| {
                if p {
                    record("Case__mdt", &[("Payload__c", json!("x"))])
                } else {
                    record("Case__mdt", &[])
                }
            })
            .collect();

        let report = aggregate(&[batch("Case__mdt", records)], &ClassifiedSchema::new());

        let expected = present.iter().filter(|&&p| p).count() as u64;
        match report.get("Case__mdt").and_then(|fields| fields.get("Payload__c")) {
            Some(stat) => prop_assert_eq!(stat.count, expected),
            None => prop_assert_eq!(expected, 0),
        }
    }

    #[test]
    fn null_values_always_observe_length_zero(nulls in 1usize..10) {
        let records: Vec<Record> = (0..nulls)
            .map(|_| record("Case__mdt", &[("Payload__c", Value::Null)]))
            .collect();

        let report = aggregate(&[batch("Case__mdt", records)], &ClassifiedSchema::new());

        let stat = &report["Case__mdt"]["Payload__c"];
        prop_assert_eq!(stat.longest, 0);
        prop_assert_eq!(stat.shortest, 0);
        prop_assert_eq!(stat.count, nulls as u64);
    }

    #[test]
    fn splitting_records_across_batches_does_not_change_stats(
        values in proptest::collection::vec(".{0,20}", 2..12),
        split in 1usize..11,
    ) {
        let split = split.min(values.len() - 1);
        let records: Vec<Record> = values
            .iter()
            .map(|v| record("Case__mdt", &[("Payload__c", json!(v))]))
            .collect();

        let one = aggregate(
            &[batch("Case__mdt", records.clone())],
            &ClassifiedSchema::new(),
        );
        let (head, tail) = records.split_at(split);
        let two = aggregate(
            &[batch("Case__mdt", head.to_vec()), batch("Case__mdt", tail.to_vec())],
            &ClassifiedSchema::new(),
        );

        prop_assert_eq!(&one, &two);
    }
}
