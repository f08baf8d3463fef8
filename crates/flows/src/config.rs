//! Wiring-time configuration handed to every reaction.
//!
//! Loading is the binary's job; this module only defines the shape.

use serde::{Deserialize, Serialize};

/// What a notification reaction does when there is nothing to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResultPolicy {
    /// Post an explicit "no updates" message.
    Announce,
    /// Emit no chat task at all.
    Suppress,
}

impl std::fmt::Display for EmptyResultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Announce => write!(f, "announce"),
            Self::Suppress => write!(f, "suppress"),
        }
    }
}

#[derive(Clone)]
pub struct JiraConfig {
    pub token: String,
    /// Base URL, e.g. `https://acme.atlassian.net`. Used verbatim in links.
    pub endpoint: String,
    pub user: String,
    /// Argument of `startOfDay(...)` in the queries, e.g. `-1d`.
    pub start_day: String,
}

#[derive(Clone)]
pub struct SlackConfig {
    pub webhook_url: String,
}

#[derive(Clone)]
pub struct TrelloConfig {
    pub app_id: String,
    pub api_token: String,
    pub board_id: String,
    pub list_id: String,
    pub label_ids: Vec<String>,
}

/// Everything the sync pipelines need besides state and time.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub jira: JiraConfig,
    pub slack: SlackConfig,
    pub trello: TrelloConfig,
    pub empty_results: EmptyResultPolicy,
}

const REDACTED: &str = "<redacted>";

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("token", &REDACTED)
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("start_day", &self.start_day)
            .finish()
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("webhook_url", &REDACTED)
            .finish()
    }
}

impl std::fmt::Debug for TrelloConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloConfig")
            .field("app_id", &self.app_id)
            .field("api_token", &REDACTED)
            .field("board_id", &self.board_id)
            .field("list_id", &self.list_id)
            .field("label_ids", &self.label_ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let config = SyncConfig {
            jira: JiraConfig {
                token: "jira-secret".into(),
                endpoint: "https://acme.atlassian.net".into(),
                user: "me@acme.io".into(),
                start_day: "-1d".into(),
            },
            slack: SlackConfig {
                webhook_url: "https://hooks.slack.com/services/SECRET".into(),
            },
            trello: TrelloConfig {
                app_id: "app".into(),
                api_token: "trello-secret".into(),
                board_id: "board".into(),
                list_id: "list".into(),
                label_ids: vec!["l1".into()],
            },
            empty_results: EmptyResultPolicy::Suppress,
        };

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("jira-secret"));
        assert!(!rendered.contains("trello-secret"));
        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("https://acme.atlassian.net"));
    }
}
