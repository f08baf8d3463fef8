//! Shared fixtures for the flow integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::json;

use engine::{AccumulatedState, ExecutionRecord, FixedClock};
use flows::{EmptyResultPolicy, JiraConfig, SlackConfig, SyncConfig, TrelloConfig};

pub const ENDPOINT: &str = "https://acme.atlassian.net";

pub fn config(empty_results: EmptyResultPolicy) -> SyncConfig {
    SyncConfig {
        jira: JiraConfig {
            token: "jira-token".into(),
            endpoint: ENDPOINT.into(),
            user: "me@acme.io".into(),
            start_day: "-1d".into(),
        },
        slack: SlackConfig {
            webhook_url: "https://hooks.slack.com/services/T/B/X".into(),
        },
        trello: TrelloConfig {
            app_id: "trello-app".into(),
            api_token: "trello-token".into(),
            board_id: "board-1".into(),
            list_id: "list-1".into(),
            label_ids: vec!["label-a".into(), "label-b".into()],
        },
        empty_results,
    }
}

pub fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 4, 9).expect("valid date"))
}

/// Tracker output with two fully populated issues, AB-1 then AB-2.
pub fn two_issues() -> String {
    json!({
        "issues": [
            { "id": "10001", "key": "AB-1", "self": "https://acme.atlassian.net/rest/api/2/issue/10001",
              "fields": { "description": "Login page is broken" } },
            { "id": "10002", "key": "AB-2",
              "fields": { "summary": "No description here" } }
        ]
    })
    .to_string()
}

pub fn no_issues() -> String {
    json!({ "issues": [] }).to_string()
}

pub fn state_with(task: &str, record: ExecutionRecord) -> AccumulatedState {
    let mut state = AccumulatedState::new();
    state.append(ExecutionRecord::success("unrelated", "{}"));
    assert_eq!(record.task_name, task);
    state.append(record);
    state
}
