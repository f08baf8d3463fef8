//! Command-line and environment configuration.
//!
//! Every value can come from a flag or from the environment variable named
//! next to it. Missing or empty required values make clap exit non-zero
//! before any pipeline code runs.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, ValueEnum};

use flows::{EmptyResultPolicy, Flow, JiraConfig, SlackConfig, SyncConfig, TrelloConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowName {
    /// Notifications and board cards for mentioned and watched issues.
    JiraSync,
    /// One digest message for mentioned issues.
    Digest,
}

impl From<FlowName> for Flow {
    fn from(name: FlowName) -> Self {
        match name {
            FlowName::JiraSync => Flow::JiraSync,
            FlowName::Digest   => Flow::Digest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmptyResults {
    /// Post an explicit "no updates" message.
    Announce,
    /// Send nothing.
    Suppress,
}

impl From<EmptyResults> for EmptyResultPolicy {
    fn from(value: EmptyResults) -> Self {
        match value {
            EmptyResults::Announce => EmptyResultPolicy::Announce,
            EmptyResults::Suppress => EmptyResultPolicy::Suppress,
        }
    }
}

/// Required values must not be blank, whether they come from a flag or the
/// environment. Applied per element for delimited lists.
fn non_empty() -> NonEmptyStringValueParser {
    NonEmptyStringValueParser::new()
}

/// Pipeline selection.
#[derive(Debug, Clone, Args)]
pub struct FlowArgs {
    #[arg(long, env = "FLOW", value_enum, default_value_t = FlowName::JiraSync)]
    pub flow: FlowName,
}

/// Everything needed to run reactions.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    #[command(flatten)]
    pub flow: FlowArgs,

    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true, value_parser = non_empty())]
    pub jira_api_token: String,
    #[arg(long, env = "JIRA_ENDPOINT", value_parser = non_empty())]
    pub jira_endpoint: String,
    #[arg(long, env = "JIRA_USER", value_parser = non_empty())]
    pub jira_user: String,
    /// Offset passed to `startOfDay(...)`, e.g. `-1d`.
    #[arg(long, env = "JIRA_START_DAY", value_parser = non_empty())]
    pub jira_start_day: String,

    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true, value_parser = non_empty())]
    pub slack_webhook_url: String,

    #[arg(long, env = "TRELLO_APP_ID", value_parser = non_empty())]
    pub trello_app_id: String,
    #[arg(long, env = "TRELLO_BOARD_ID", value_parser = non_empty())]
    pub trello_board_id: String,
    #[arg(long, env = "TRELLO_API_TOKEN", hide_env_values = true, value_parser = non_empty())]
    pub trello_api_token: String,
    #[arg(long, env = "TRELLO_LIST_ID", value_parser = non_empty())]
    pub trello_list_id: String,
    /// Comma-separated label ids.
    #[arg(long, env = "TRELLO_LABEL_IDS", value_delimiter = ',', required = true, value_parser = non_empty())]
    pub trello_label_ids: Vec<String>,

    /// What to do when a fetch returns no issues. Defaults per flow.
    #[arg(long, env = "EMPTY_RESULTS", value_enum)]
    pub empty_results: Option<EmptyResults>,
}

impl Settings {
    pub fn flow(&self) -> Flow {
        self.flow.flow.into()
    }

    pub fn sync_config(&self) -> SyncConfig {
        let flow = self.flow();
        SyncConfig {
            jira: JiraConfig {
                token: self.jira_api_token.clone(),
                endpoint: self.jira_endpoint.clone(),
                user: self.jira_user.clone(),
                start_day: self.jira_start_day.clone(),
            },
            slack: SlackConfig {
                webhook_url: self.slack_webhook_url.clone(),
            },
            trello: TrelloConfig {
                app_id: self.trello_app_id.clone(),
                api_token: self.trello_api_token.clone(),
                board_id: self.trello_board_id.clone(),
                list_id: self.trello_list_id.clone(),
                label_ids: self.trello_label_ids.clone(),
            },
            empty_results: self
                .empty_results
                .map_or_else(|| flow.default_empty_results(), Into::into),
        }
    }
}
