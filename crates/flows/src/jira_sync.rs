//! The `jira-sync` pipeline.
//!
//! On start it fetches issues mentioning the user and issues the user
//! watches. Each successful fetch fans out to two independent reactions:
//! one chat notification listing the updated issues and one board card per
//! issue.

use std::collections::HashSet;

use tracing::{debug, warn};

use catalog::jira::{self, ListArgs};
use catalog::{slack, trello};
use engine::{
    format_date, AccumulatedState, Condition, Event, PipelineDefinition, Reaction,
    ReactionContext, TaskDescriptor,
};

use crate::config::{EmptyResultPolicy, SyncConfig};
use crate::issues::{self, IssueSource};

pub const PIPELINE_NAME: &str = "jira-sync";

/// Empty fetches stay quiet unless configured otherwise.
pub const DEFAULT_EMPTY_RESULTS: EmptyResultPolicy = EmptyResultPolicy::Suppress;

/// Build the pipeline definition.
pub fn pipeline() -> PipelineDefinition<SyncConfig> {
    let mut pipeline = PipelineDefinition::new(PIPELINE_NAME)
        .service(slack::binding())
        .service(jira::binding())
        .service(trello::binding())
        .on("fetch issues", Condition::EngineStarted, fetch_issues);

    for source in [IssueSource::Mentioned, IssueSource::Watching] {
        let label = match source {
            IssueSource::Mentioned => "mentioned",
            IssueSource::Watching => "watched",
        };
        pipeline = pipeline
            .on(
                format!("notify {label}"),
                Condition::task_succeeded(source.fetch_task()),
                Notify(source),
            )
            .on(
                format!("cards for {label}"),
                Condition::task_succeeded(source.fetch_task()),
                CreateCards(source),
            );
    }

    pipeline
}

/// Start reaction: one list task per issue source.
pub fn fetch_issues(
    _event: &Event,
    _state: &AccumulatedState,
    ctx: &ReactionContext<'_, SyncConfig>,
) -> Vec<TaskDescriptor> {
    let cfg = &ctx.config.jira;

    [IssueSource::Mentioned, IssueSource::Watching]
        .into_iter()
        .map(|source| {
            let jql = source.jql(&cfg.start_day);
            jira::list_task(
                source.fetch_task(),
                &ListArgs {
                    token: &cfg.token,
                    endpoint: &cfg.endpoint,
                    user: &cfg.user,
                    jql: &jql,
                    query_fields: jira::ALL_FIELDS,
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Posts one chat message summarising a fetch.
#[derive(Debug, Clone, Copy)]
pub struct Notify(pub IssueSource);

impl Reaction<SyncConfig> for Notify {
    fn react(
        &self,
        _event: &Event,
        state: &AccumulatedState,
        ctx: &ReactionContext<'_, SyncConfig>,
    ) -> Vec<TaskDescriptor> {
        let source = self.0;
        let Some(found) = issues::decode_issues(state, source.fetch_task()) else {
            return Vec::new();
        };

        let config = ctx.config;
        match issues::notification_message(source, &found, &config.jira.endpoint, config.empty_results) {
            Some(message) => vec![slack::message_task(
                source.notify_task(),
                &config.slack.webhook_url,
                &message,
            )],
            None => {
                debug!("nothing to report for {}", source.fetch_task());
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Board cards
// ---------------------------------------------------------------------------

/// Creates one follow-up card per fetched issue that has an id and a key.
#[derive(Debug, Clone, Copy)]
pub struct CreateCards(pub IssueSource);

impl Reaction<SyncConfig> for CreateCards {
    fn react(
        &self,
        _event: &Event,
        state: &AccumulatedState,
        ctx: &ReactionContext<'_, SyncConfig>,
    ) -> Vec<TaskDescriptor> {
        let source = self.0;
        let Some(found) = issues::decode_issues(state, source.fetch_task()) else {
            return Vec::new();
        };

        let config = ctx.config;
        let today = format_date(ctx.clock.today());

        // Card task names derive from the issue id, so a repeated id would
        // collide and void the whole batch. Keep the first occurrence.
        let mut seen = HashSet::new();

        found
            .iter()
            .filter_map(|issue| Some((issue, issue.id()?, issue.key()?)))
            .filter(|(_, id, key)| {
                let first = seen.insert(*id);
                if !first {
                    warn!("skipping card for {key}: issue id {id} already has a card in this batch");
                }
                first
            })
            .map(|(issue, id, key)| {
                let description =
                    issues::card_description(source, issue, key, &config.jira.endpoint, &today);
                let title = issues::card_title(key);
                trello::add_card_task(
                    source.card_task(id),
                    &trello::AddCard {
                        app_id: &config.trello.app_id,
                        token: &config.trello.api_token,
                        board_id: &config.trello.board_id,
                        list_id: &config.trello.list_id,
                        name: &title,
                        description: &description,
                        label_ids: &config.trello.label_ids,
                    },
                )
            })
            .collect()
    }
}
