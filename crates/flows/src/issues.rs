//! Building blocks shared by the issue-driven pipelines: which fetch a batch
//! came from, decoding it out of the state, and turning issues into chat
//! messages and board cards.

use tracing::warn;

use catalog::jira::{self, Issue, ListReturns};
use engine::{AccumulatedState, OutputError};

use crate::config::EmptyResultPolicy;

/// Task fetching issues that mention the configured user.
pub const FETCH_MENTIONS: &str = "fetch-mentions";
/// Task fetching issues the configured user watches.
pub const FETCH_WATCHED: &str = "fetch-watched";

/// Why an issue was picked up. Drives task names, wording and queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSource {
    Mentioned,
    Watching,
}

impl IssueSource {
    /// Name of the fetch task producing this source's issues.
    pub fn fetch_task(self) -> &'static str {
        match self {
            Self::Mentioned => FETCH_MENTIONS,
            Self::Watching  => FETCH_WATCHED,
        }
    }

    /// Tracker query selecting this source's issues updated since
    /// `start_day`.
    pub fn jql(self, start_day: &str) -> String {
        match self {
            Self::Mentioned => format!(
                "status != Done AND (comment ~ currentUser() OR description ~ currentUser()) \
                 AND updatedDate > startOfDay({start_day})"
            ),
            Self::Watching => format!(
                "status != Done AND watcher = currentUser() AND updatedDate > startOfDay({start_day})"
            ),
        }
    }

    fn notice(self) -> &'static str {
        match self {
            Self::Mentioned => "An issue I was mentioned in was updated",
            Self::Watching  => "An issue I am watching was updated",
        }
    }

    fn empty_notice(self) -> &'static str {
        match self {
            Self::Mentioned => "No updates on issues I was mentioned in",
            Self::Watching  => "No updates on issues I am watching",
        }
    }

    fn reason(self) -> &'static str {
        match self {
            Self::Mentioned => "Reason: I was mentioned.",
            Self::Watching  => "Reason: I am watching this issue.",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Mentioned => "[Mentioned]",
            Self::Watching  => "[Watching]",
        }
    }

    /// Name of the chat task sent after this source's fetch.
    pub fn notify_task(self) -> String {
        format!("Send message as reaction to {} finished", self.fetch_task())
    }

    /// Name of the card task for one issue.
    pub fn card_task(self, issue_id: &str) -> String {
        format!("{} Create card for issue {issue_id}", self.tag())
    }
}

/// Decode the issues fetched by `task`.
///
/// Not-found and decode failures are logged and turned into `None`; callers
/// then emit nothing.
pub fn decode_issues(state: &AccumulatedState, task: &str) -> Option<Vec<Issue>> {
    match state.decode_output::<ListReturns>(task) {
        Ok(list) => Some(list.issues),
        Err(e @ OutputError::NotFound(_)) => {
            warn!("skipping reaction, nothing to decode: {e}");
            None
        }
        Err(e @ OutputError::Decode { .. }) => {
            warn!("skipping reaction, malformed output: {e}");
            None
        }
    }
}

/// Chat message listing one permalink per keyed issue, in input order.
///
/// Returns `None` when nothing should be posted: no keyed issues and the
/// policy is [`EmptyResultPolicy::Suppress`].
pub fn notification_message(
    source: IssueSource,
    issues: &[Issue],
    endpoint: &str,
    policy: EmptyResultPolicy,
) -> Option<String> {
    let lines: Vec<String> = issues
        .iter()
        .filter_map(Issue::key)
        .map(|key| format!("{} {}", source.notice(), jira::browse_url(endpoint, key)))
        .collect();

    if lines.is_empty() {
        return match policy {
            EmptyResultPolicy::Announce => Some(source.empty_notice().to_owned()),
            EmptyResultPolicy::Suppress => None,
        };
    }

    Some(lines.join("\n"))
}

/// Card body for one issue. The description line is only added when the
/// issue carries a string `description` field.
pub fn card_description(
    source: IssueSource,
    issue: &Issue,
    key: &str,
    endpoint: &str,
    date: &str,
) -> String {
    let mut body = format!(
        "Added by jira-sync pipeline at {date}\nLink: {}\n{}\n",
        jira::browse_url(endpoint, key),
        source.reason()
    );
    if let Some(description) = issue.description() {
        body.push_str("Description: ");
        body.push_str(description);
    }
    body
}

/// Title of the follow-up card for `key`.
pub fn card_title(key: &str) -> String {
    format!("Follow up with issue {key}")
}
