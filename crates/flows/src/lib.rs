//! `flows` crate: the concrete pipelines and their configuration.
//!
//! - [`jira_sync`]: the reactive pipeline (notifications + board cards).
//! - [`digest`]: the older static-task pipeline (one digest message).

pub mod config;
pub mod issues;
pub mod jira_sync;
pub mod digest;

pub use config::{EmptyResultPolicy, JiraConfig, SlackConfig, SyncConfig, TrelloConfig};

use engine::PipelineDefinition;

/// Which pipeline to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    JiraSync,
    Digest,
}

impl Flow {
    pub fn pipeline(self) -> PipelineDefinition<SyncConfig> {
        match self {
            Self::JiraSync => jira_sync::pipeline(),
            Self::Digest   => digest::pipeline(),
        }
    }

    /// Empty-result behaviour used when none is configured.
    pub fn default_empty_results(self) -> EmptyResultPolicy {
        match self {
            Self::JiraSync => jira_sync::DEFAULT_EMPTY_RESULTS,
            Self::Digest   => digest::DEFAULT_EMPTY_RESULTS,
        }
    }
}
