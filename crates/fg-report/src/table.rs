//! Fixed-width table emitter.
//!
//! Same data as the CSV emitter plus the declared limit, grouped visually by
//! object with a separator rule after each object's field rows.

use fg_common::UsageReport;

const OBJECT_WIDTH: usize = 40;
const FIELD_WIDTH: usize = 40;
const NUM_WIDTH: usize = 10;
const COUNT_WIDTH: usize = 7;

/// Render the report as a fixed-width table.
pub fn render_table(report: &UsageReport) -> String {
    let mut out = String::new();

    let header = format!(
        "| {:<OBJECT_WIDTH$} | {:<FIELD_WIDTH$} | {:<NUM_WIDTH$} | {:<NUM_WIDTH$} | {:<NUM_WIDTH$} | {:<COUNT_WIDTH$} | {:<10} |",
        "Object", "Field", "Longest", "Shortest", "Limit", "Count", "Type Info",
    );
    let rule = "-".repeat(header.len());
    out.push_str(&header);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (object, fields) in report {
        for (field, stat) in fields {
            out.push_str(&format!(
                "| {:<OBJECT_WIDTH$} | {:<FIELD_WIDTH$} | {:<NUM_WIDTH$} | {:<NUM_WIDTH$} | {:<NUM_WIDTH$} | {:<COUNT_WIDTH$} | {:<10} |\n",
                object, field, stat.longest, stat.shortest, stat.declared_limit, stat.count, stat.type_info,
            ));
        }
        if !fields.is_empty() {
            out.push_str(&rule);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_common::FieldUsageStat;
    use std::collections::BTreeMap;

    fn stat(longest: u32, shortest: u32, count: u64, limit: u32, info: &str) -> FieldUsageStat {
        FieldUsageStat {
            longest,
            shortest,
            count,
            declared_limit: limit,
            type_info: info.to_string(),
        }
    }

    #[test]
    fn empty_report_renders_header_only() {
        let table = render_table(&UsageReport::new());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Object"));
        assert!(lines[0].contains("Limit"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn separator_follows_each_object_group() {
        let mut report = UsageReport::new();
        let mut a = BTreeMap::new();
        a.insert("F1__c".to_string(), stat(6, 3, 2, 300, ""));
        a.insert("F2__c".to_string(), stat(1, 0, 4, 500, "Lookup"));
        report.insert("A__mdt".to_string(), a);
        let mut b = BTreeMap::new();
        b.insert("G1__c".to_string(), stat(9, 9, 1, 255, ""));
        report.insert("B__mdt".to_string(), b);

        let table = render_table(&report);
        let rules = table
            .lines()
            .filter(|l| l.chars().all(|c| c == '-') && !l.is_empty())
            .count();
        // One rule under the header, one after each object group.
        assert_eq!(rules, 3);
    }

    #[test]
    fn rows_are_fixed_width() {
        let mut report = UsageReport::new();
        let mut a = BTreeMap::new();
        a.insert("Name__c".to_string(), stat(6, 3, 2, 300, "TextArea"));
        report.insert("A__mdt".to_string(), a);

        let table = render_table(&report);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0].len(), lines[2].len());
        assert!(lines[2].contains("TextArea"));
    }
}
