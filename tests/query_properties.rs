//! Property-based tests for the filter → sort → paginate pipeline.
//!
//! Tests validate:
//! 1. Filtering only removes records and is idempotent
//! 2. Sorting is a permutation and stable across equal keys
//! 3. Pages concatenate back to the whole filtered set
//! 4. The page index is always inside `[1, total_pages]`

use chrono::NaiveDate;
use nexadmin::model::{RowId, Submission, Timestamp};
use nexadmin::query::{
    filter, paginate, sort, total_pages, DomainFilter, PhoneFilter, QueryState, SortKey,
};
use proptest::prelude::*;

// ===== Generators =====

fn arb_timestamp() -> impl Strategy<Value = String> {
    prop_oneof![
        // Parseable: a date in 2024-2026 with a time component.
        (2024u32..2027, 1u32..13, 1u32..29, 0u32..24, 0u32..60).prop_map(
            |(y, m, d, h, min)| format!("{y:04}-{m:02}-{d:02}T{h:02}:{min:02}:00Z")
        ),
        // Unparseable garbage.
        "[a-z ]{0,12}",
    ]
}

type RawRow = (String, String, String, String, String);

fn arb_row() -> impl Strategy<Value = RawRow> {
    (
        "[A-Za-z ]{0,16}",
        prop_oneof![
            "[a-z]{1,8}@(gmail|outlook|yahoo)\\.com",
            "[a-z]{1,8}",
        ],
        prop_oneof![Just(String::new()), "[0-9 +-]{4,14}"],
        "[A-Za-z ,.]{0,40}",
        arb_timestamp(),
    )
}

fn arb_submissions() -> impl Strategy<Value = Vec<Submission>> {
    prop::collection::vec(arb_row(), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, email, phone, message, stamp))| {
                Submission::new(
                    RowId::from_index(i),
                    name,
                    email,
                    phone,
                    message,
                    Timestamp::new(stamp),
                )
            })
            .collect()
    })
}

fn arb_query_state() -> impl Strategy<Value = QueryState> {
    (
        "[a-z@. ]{0,6}",
        prop_oneof![
            Just(DomainFilter::All),
            Just(DomainFilter::Domain("gmail.com".to_string())),
            Just(DomainFilter::Domain("yahoo.com".to_string())),
        ],
        prop_oneof![
            Just(PhoneFilter::All),
            Just(PhoneFilter::WithPhone),
            Just(PhoneFilter::NoPhone),
        ],
        prop::option::of((2024u32..2027, 1u32..13, 1u32..29)),
        prop::option::of((2024u32..2027, 1u32..13, 1u32..29)),
        prop_oneof![
            Just(SortKey::Newest),
            Just(SortKey::Oldest),
            Just(SortKey::NameAsc),
            Just(SortKey::NameDesc),
            Just(SortKey::DomainAsc),
        ],
        1usize..6,
    )
        .prop_map(|(search, domain, phone, from, until, key, page_size)| {
            let mut state = QueryState::new(page_size);
            state.set_search(search);
            state.set_domain(domain);
            state.set_phone(phone);
            state.set_from(from.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y as i32, m, d)));
            state.set_until(until.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y as i32, m, d)));
            state.set_sort(key);
            state
        })
}

// ===== Property 1: Filtering =====

proptest! {
    #[test]
    fn filter_is_a_subset_in_original_order(
        records in arb_submissions(),
        state in arb_query_state(),
    ) {
        let filtered = filter(&records, &state);
        prop_assert!(filtered.len() <= records.len());

        // Subsequence check: every kept record appears in the original,
        // in the same relative order.
        let mut cursor = 0;
        for kept in &filtered {
            let pos = records[cursor..]
                .iter()
                .position(|r| r == kept)
                .map(|p| cursor + p);
            prop_assert!(pos.is_some(), "filtered record missing from input");
            cursor = pos.unwrap() + 1;
        }
    }

    #[test]
    fn filter_is_idempotent(
        records in arb_submissions(),
        state in arb_query_state(),
    ) {
        let once = filter(&records, &state);
        let twice = filter(&once, &state);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn empty_search_with_no_filters_keeps_everything(records in arb_submissions()) {
        let state = QueryState::default();
        prop_assert_eq!(filter(&records, &state).len(), records.len());
    }
}

// ===== Property 2: Sorting =====

proptest! {
    #[test]
    fn sort_is_a_permutation(
        records in arb_submissions(),
        key in prop_oneof![
            Just(SortKey::Newest),
            Just(SortKey::Oldest),
            Just(SortKey::NameAsc),
            Just(SortKey::NameDesc),
            Just(SortKey::DomainAsc),
        ],
    ) {
        let sorted = sort(&records, key);
        prop_assert_eq!(sorted.len(), records.len());

        let mut expected: Vec<u32> = records.iter().map(|r| r.id().as_u32()).collect();
        let mut actual: Vec<u32> = sorted.iter().map(|r| r.id().as_u32()).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn newest_sort_never_increases_along_the_list(records in arb_submissions()) {
        let sorted = sort(&records, SortKey::Newest);
        for pair in sorted.windows(2) {
            let a = pair[0].timestamp().parsed().unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
            let b = pair[1].timestamp().parsed().unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
            prop_assert!(a >= b);
        }
    }
}

// ===== Property 3: Pagination =====

proptest! {
    #[test]
    fn pages_concatenate_to_the_whole_collection(
        records in arb_submissions(),
        page_size in 1usize..7,
    ) {
        let total = total_pages(records.len(), page_size);
        let mut rebuilt = Vec::new();
        for page in 1..=total {
            rebuilt.extend(paginate(&records, page, page_size).items);
        }
        prop_assert_eq!(rebuilt, records);
    }

    #[test]
    fn every_page_respects_the_size_limit(
        records in arb_submissions(),
        page in 1usize..10,
        page_size in 1usize..7,
    ) {
        let result = paginate(&records, page, page_size);
        prop_assert!(result.items.len() <= page_size);
    }

    #[test]
    fn total_pages_is_at_least_one(len in 0usize..1000, page_size in 1usize..50) {
        prop_assert!(total_pages(len, page_size) >= 1);
    }

    #[test]
    fn out_of_range_page_requests_never_panic(
        records in arb_submissions(),
        page in 0usize..1_000_000,
        page_size in 1usize..7,
    ) {
        let result = paginate(&records, page, page_size);
        let total = total_pages(records.len(), page_size);
        if records.is_empty() {
            prop_assert!(result.items.is_empty());
        } else {
            // A clamped page of a non-empty collection is never empty.
            prop_assert!(!result.items.is_empty());
        }
        prop_assert_eq!(result.total_pages, total);
    }
}
