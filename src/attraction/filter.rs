use crate::attraction::record::{compare, Attraction, Field};
use std::collections::BTreeSet;

pub fn sort_by_name(records: &[Attraction], descending: bool) -> Vec<Attraction> {
    let mut sorted = records.to_vec();
    // `sort_by` is stable, ties keep their input order in both directions.
    sorted.sort_by(|a, b| compare(a, b, descending));
    sorted
}

pub fn distinct_values(records: &[Attraction], field: Field) -> Vec<String> {
    records
        .iter()
        .map(|r| r.field(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn filter_by_field(records: &[Attraction], field: Field, value: &str) -> Vec<Attraction> {
    records
        .iter()
        .filter(|r| r.field(field) == value)
        .cloned()
        .collect()
}
