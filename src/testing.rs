//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical record builders to avoid duplication.

#![doc(hidden)]

use crate::engine::RecordSet;
use crate::types::{Record, RecordId};

/// A record with a title only.
pub fn make_record(id: u64, number: u64, title: &str) -> Record {
    Record {
        id: RecordId(id),
        number,
        title: title.to_string(),
        body: None,
        labels: vec![],
    }
}

/// A record with a title and body.
pub fn make_record_with_body(id: u64, number: u64, title: &str, body: &str) -> Record {
    Record {
        body: Some(body.to_string()),
        ..make_record(id, number, title)
    }
}

/// A record with a title and labels.
pub fn make_record_with_labels(id: u64, number: u64, title: &str, labels: &[&str]) -> Record {
    Record {
        labels: labels.iter().map(|l| l.to_string()).collect(),
        ..make_record(id, number, title)
    }
}

/// A small issue tracker: browser bugs, a docs request, a perf regression.
pub fn sample_records() -> RecordSet {
    RecordSet::new(vec![
        Record {
            id: RecordId(1),
            number: 101,
            title: "Login fails on Safari".to_string(),
            body: Some(
                "Clicking the login button does nothing on Safari 17.\n```\nTypeError: undefined is not a function\n```"
                    .to_string(),
            ),
            labels: vec!["bug".to_string(), "browser".to_string()],
        },
        Record {
            id: RecordId(2),
            number: 102,
            title: "Dark mode colors are wrong".to_string(),
            body: Some("The sidebar uses light colors in dark mode.".to_string()),
            labels: vec!["ui".to_string()],
        },
        Record {
            id: RecordId(3),
            number: 42,
            title: "Document the config file format".to_string(),
            body: None,
            labels: vec!["documentation".to_string()],
        },
        Record {
            id: RecordId(4),
            number: 104,
            title: "Search is slow with many issues".to_string(),
            body: Some(
                "Typing in the search box lags once there are thousands of issues. Safari is worst."
                    .to_string(),
            ),
            labels: vec!["performance".to_string(), "bug".to_string()],
        },
        Record {
            id: RecordId(5),
            number: 105,
            title: "Crash when session expires during login".to_string(),
            body: Some("```\npanic: session token missing\n```".to_string()),
            labels: vec!["bug".to_string(), "auth".to_string()],
        },
    ])
}
