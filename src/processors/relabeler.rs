use std::collections::HashSet;

use crate::models::{CategoryField, CheckoutRecord};

/// Collapse a set of categorical values into one label.
///
/// For every record, if the value in `search` is a member of `values`, the
/// emitted value is `replacement`; otherwise it is the unchanged value of
/// `transform`. The input is not mutated; the result is a new column in the
/// same row order. `search` and `transform` may name the same field
/// (self-relabeling) or different fields (relabeling driven by another
/// column, e.g. lumping by title into a format group).
pub fn relabel(
    records: &[CheckoutRecord],
    search: CategoryField,
    transform: CategoryField,
    values: &[&str],
    replacement: &str,
) -> Vec<String> {
    let triggers: HashSet<&str> = values.iter().copied().collect();

    records
        .iter()
        .map(|record| {
            if triggers.contains(record.field(search)) {
                replacement.to_string()
            } else {
                record.field(transform).to_string()
            }
        })
        .collect()
}

/// Apply a relabeling pass in place: compute the new column and write it
/// back into `transform`. Passes that feed each other (e.g. a later pass
/// reading an earlier pass's output field) must be applied sequentially.
pub fn relabel_in_place(
    records: &mut [CheckoutRecord],
    search: CategoryField,
    transform: CategoryField,
    values: &[&str],
    replacement: &str,
) {
    let column = relabel(records, search, transform, values, replacement);
    for (record, value) in records.iter_mut().zip(column) {
        record.set_field(transform, value);
    }
}
