//! End-to-end query scenarios through the public engine API.

use chrono::NaiveDate;
use nexadmin::model::{RowId, Submission, SubmissionPatch, Timestamp};
use nexadmin::query::{DomainFilter, PhoneFilter, QueryEngine, QueryState, SortKey};

fn submission(id: u32, name: &str, email: &str, phone: &str, stamp: &str) -> Submission {
    Submission::new(
        RowId::new(id).expect("valid row id"),
        name,
        email,
        phone,
        format!("message from {name}"),
        Timestamp::new(stamp),
    )
}

/// 12 records spanning Jan 1 - Jan 12, oldest first in storage order.
fn january() -> Vec<Submission> {
    (1..=12)
        .map(|day| {
            submission(
                day + 1,
                &format!("user{day}"),
                &format!("user{day}@example.com"),
                "",
                &format!("2025-01-{day:02}T09:00:00Z"),
            )
        })
        .collect()
}

fn engine(records: Vec<Submission>, page_size: usize) -> QueryEngine {
    let mut engine = QueryEngine::new(QueryState::new(page_size));
    engine.set_records(records);
    engine
}

#[test]
fn newest_first_page_of_a_january_of_submissions() {
    let engine = engine(january(), 10);
    let view = engine.view();

    assert_eq!(view.items.len(), 10);
    assert_eq!(view.items[0].name(), "user12");
    assert_eq!(view.items[9].name(), "user3");
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.range_start, 1);
    assert_eq!(view.range_end, 10);
    assert_eq!(view.visible_count, 12);
}

#[test]
fn second_page_holds_the_two_oldest() {
    let mut engine = engine(january(), 10);
    engine.next_page();
    let view = engine.view();

    assert_eq!(view.page, 2);
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].name(), "user2");
    assert_eq!(view.items[1].name(), "user1");
    assert_eq!(view.range_start, 11);
    assert_eq!(view.range_end, 12);
}

#[test]
fn search_matches_email_case_insensitively() {
    let records = vec![
        submission(2, "Ada", "ada@GMAIL.com", "", "2025-01-01"),
        submission(3, "Bob", "bob@outlook.com", "", "2025-01-02"),
        submission(4, "Cleo", "cleo@gmail.com", "", "2025-01-03"),
        submission(5, "Dan", "dan@yahoo.com", "", "2025-01-04"),
        submission(6, "Eve", "eve@proton.me", "", "2025-01-05"),
    ];
    let mut engine = engine(records, 10);
    engine.state_mut().set_search("gmail");

    let view = engine.view();
    assert_eq!(view.visible_count, 2);
    let names: Vec<&str> = view.items.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Cleo", "Ada"], "newest first");
}

#[test]
fn no_phone_filter_keeps_only_the_blank_phone() {
    let records = vec![
        submission(2, "Ada", "ada@gmail.com", "123", "2025-01-01"),
        submission(3, "Bob", "bob@outlook.com", "", "2025-01-02"),
        submission(4, "Cleo", "cleo@yahoo.com", "  456", "2025-01-03"),
    ];
    let mut engine = engine(records, 10);
    engine.state_mut().set_phone(PhoneFilter::NoPhone);

    let view = engine.view();
    assert_eq!(view.visible_count, 1);
    assert_eq!(view.items[0].name(), "Bob");
}

#[test]
fn domain_sort_puts_the_empty_domain_first() {
    let records = vec![
        submission(2, "Zed", "z@b.com", "", "2025-01-01"),
        submission(3, "Ann", "a@a.com", "", "2025-01-02"),
        submission(4, "Xan", "x@", "", "2025-01-03"),
    ];
    let mut engine = engine(records, 10);
    engine.state_mut().set_sort(SortKey::DomainAsc);

    let view = engine.view();
    let emails: Vec<&str> = view.items.iter().map(|s| s.email()).collect();
    assert_eq!(emails, vec!["x@", "a@a.com", "z@b.com"]);
}

#[test]
fn empty_collection_never_errors() {
    let engine = engine(Vec::new(), 10);
    let view = engine.view();

    assert_eq!(view.visible_count, 0);
    assert_eq!(view.total_pages, 1);
    assert!(view.items.is_empty());
    assert_eq!(view.range_start, 0);
    assert_eq!(view.range_end, 0);
}

#[test]
fn narrowing_a_filter_resets_to_page_one() {
    let mut engine = engine(january(), 5);
    engine.next_page();
    assert_eq!(engine.view().page, 2);

    engine.state_mut().set_search("user1");
    let view = engine.view();
    assert_eq!(view.page, 1);
    // user1, user10, user11, user12
    assert_eq!(view.visible_count, 4);
}

#[test]
fn whole_day_inclusive_date_bounds() {
    let records = vec![
        submission(2, "Early", "early@example.com", "", "2025-01-01T00:00:00Z"),
        submission(3, "Mid", "mid@example.com", "", "2025-01-02T12:00:00Z"),
        submission(4, "LateInDay", "late@example.com", "", "2025-01-03T23:59:59Z"),
        submission(5, "NextDay", "next@example.com", "", "2025-01-04T00:00:00Z"),
    ];
    let mut engine = engine(records, 10);
    engine.state_mut().set_from(NaiveDate::from_ymd_opt(2025, 1, 2));
    engine.state_mut().set_until(NaiveDate::from_ymd_opt(2025, 1, 3));

    let names: Vec<String> = engine
        .view()
        .items
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["LateInDay", "Mid"]);
}

#[test]
fn unparseable_timestamps_sort_oldest_and_fail_date_bounds() {
    let records = vec![
        submission(2, "Dated", "dated@example.com", "", "2025-01-02T10:00:00Z"),
        submission(3, "Undated", "undated@example.com", "", "not-a-date"),
    ];
    let mut engine = engine(records, 10);

    let view = engine.view();
    let names: Vec<&str> = view.items.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Dated", "Undated"], "undated sorts oldest");

    engine.state_mut().set_sort(SortKey::Oldest);
    let view = engine.view();
    let names: Vec<&str> = view.items.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Undated", "Dated"]);

    engine.state_mut().set_from(NaiveDate::from_ymd_opt(2020, 1, 1));
    let view = engine.view();
    assert_eq!(view.visible_count, 1, "undated fails any active bound");
    assert_eq!(view.items[0].name(), "Dated");
}

#[test]
fn combined_filters_intersect() {
    let records = vec![
        submission(2, "Ada", "ada@gmail.com", "123", "2025-01-01"),
        submission(3, "Adam", "adam@gmail.com", "", "2025-01-02"),
        submission(4, "Adelle", "adelle@yahoo.com", "456", "2025-01-03"),
    ];
    let mut engine = engine(records, 10);
    engine.state_mut().set_search("ad");
    engine
        .state_mut()
        .set_domain(DomainFilter::Domain("gmail.com".to_string()));
    engine.state_mut().set_phone(PhoneFilter::WithPhone);

    let view = engine.view();
    assert_eq!(view.visible_count, 1);
    assert_eq!(view.items[0].name(), "Ada");
}

#[test]
fn confirmed_edit_is_visible_in_the_next_view() {
    let mut engine = engine(january(), 10);
    let id = RowId::new(13).expect("valid row id"); // user12, the newest
    let patch = SubmissionPatch {
        name: "renamed".to_string(),
        email: "renamed@example.com".to_string(),
        phone: "999".to_string(),
        message: "updated".to_string(),
    };

    assert!(engine.apply_update(id, &patch));
    let view = engine.view();
    assert_eq!(view.items[0].name(), "renamed");
    assert_eq!(
        view.items[0].timestamp().as_str(),
        "2025-01-12T09:00:00Z",
        "timestamp survives the edit"
    );
}

#[test]
fn confirmed_delete_shrinks_the_collection() {
    let mut engine = engine(january(), 10);
    let id = RowId::new(13).expect("valid row id");

    assert!(engine.apply_remove(id));
    assert!(!engine.apply_remove(id), "second remove finds nothing");

    let view = engine.view();
    assert_eq!(view.visible_count, 11);
    assert_eq!(view.items[0].name(), "user11");
}
