use super::enums::Filter;
use super::task::TaskRecord;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Parse a "YYYY-MM-DD" deadline. Malformed input is treated as no deadline.
pub fn parse_deadline(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Default presentation ordering: priority (high first), then deadline
/// ascending with absent deadlines last, then creation time descending.
/// Must match the ORDER BY used by the repository.
pub fn compare_records(a: &TaskRecord, b: &TaskRecord) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Derive the filtered, ordered view of the task collection
pub fn visible_records(tasks: &HashMap<i64, TaskRecord>, filter: Filter) -> Vec<TaskRecord> {
    let mut records: Vec<TaskRecord> = tasks
        .values()
        .filter(|task| match filter {
            Filter::All => true,
            Filter::Active => task.is_active(),
            Filter::Completed => task.completed,
        })
        .cloned()
        .collect();
    records.sort_by(compare_records);
    records
}

/// Count of active (not completed) tasks across the whole collection,
/// independent of the current filter
pub fn active_count(tasks: &HashMap<i64, TaskRecord>) -> usize {
    tasks.values().filter(|task| task.is_active()).count()
}
