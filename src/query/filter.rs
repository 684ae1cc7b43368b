//! Filter stage: predicate-based narrowing of the collection.
//!
//! Three AND-combined predicates: free-text search, field filters, and
//! the date range. Pure, order-preserving, and total: the result is always
//! a subset of the input in input order, so filtering is idempotent and
//! never grows the collection.

use crate::model::Submission;
use crate::query::{DomainFilter, PhoneFilter, QueryState};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Apply every active predicate, preserving input order.
pub fn filter(records: &[Submission], state: &QueryState) -> Vec<Submission> {
    records
        .iter()
        .filter(|s| matches(s, state))
        .cloned()
        .collect()
}

/// True when a single record passes every active predicate.
pub fn matches(record: &Submission, state: &QueryState) -> bool {
    matches_search(record, state.search())
        && matches_domain(record, state.domain())
        && matches_phone(record, state.phone())
        && matches_range(record, state.from(), state.until())
}

/// Case-insensitive substring search across every displayed field.
///
/// Empty search text always passes. The timestamp is matched against its
/// raw string form, exactly as rendered in the table.
fn matches_search(record: &Submission, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        record.name(),
        record.email(),
        record.phone(),
        record.message(),
        record.timestamp().as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_domain(record: &Submission, domain: &DomainFilter) -> bool {
    match domain {
        DomainFilter::All => true,
        DomainFilter::Domain(d) => record.email().contains(d.as_str()),
    }
}

fn matches_phone(record: &Submission, phone: PhoneFilter) -> bool {
    match phone {
        PhoneFilter::All => true,
        PhoneFilter::WithPhone => record.has_phone(),
        PhoneFilter::NoPhone => !record.has_phone(),
    }
}

/// Whole-day-inclusive range check on the parsed timestamp.
///
/// A record with an unparseable timestamp fails whenever either bound is
/// active: an undatable entry cannot be shown as falling inside a range.
fn matches_range(record: &Submission, from: Option<NaiveDate>, until: Option<NaiveDate>) -> bool {
    if from.is_none() && until.is_none() {
        return true;
    }
    let Some(instant) = record.timestamp().parsed() else {
        return false;
    };
    if let Some(from) = from {
        if instant < day_start(from) {
            return false;
        }
    }
    if let Some(until) = until {
        // Inclusive of the whole bound day: pass anything before the next
        // day's midnight. succ_opt is None only at NaiveDate::MAX, where
        // nothing can lie beyond the bound anyway.
        if let Some(next_day) = until.succ_opt() {
            if instant >= day_start(next_day) {
                return false;
            }
        }
    }
    true
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ===== Tests =====
