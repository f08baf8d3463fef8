//! The `jira-digest` pipeline, declared as a static task list.
//!
//! Two tasks, each with its own inline condition: fetch the issues that
//! mention the user when the engine starts, then post a single digest
//! message once the fetch succeeds. Empty fetches are announced by default.

use catalog::jira::{self, ListArgs};
use catalog::slack;
use engine::{
    Argument, ArgumentSource, AccumulatedState, CapabilityRef, Condition, PipelineDefinition,
    ReactionContext, StaticTask,
};

use crate::config::{EmptyResultPolicy, SyncConfig};
use crate::issues::{self, IssueSource, FETCH_MENTIONS};

pub const PIPELINE_NAME: &str = "jira-digest";
pub const NOTIFY_MENTIONS: &str = "notify-mentions";

pub const DEFAULT_EMPTY_RESULTS: EmptyResultPolicy = EmptyResultPolicy::Announce;

pub fn pipeline() -> PipelineDefinition<SyncConfig> {
    PipelineDefinition::new(PIPELINE_NAME)
        .service(slack::binding())
        .service(jira::binding())
        .static_task(StaticTask::new(
            FETCH_MENTIONS,
            Condition::EngineStarted,
            CapabilityRef::new(jira::SERVICE, jira::ENDPOINT_LIST),
            ArgumentSource::computed(fetch_arguments),
        ))
        .static_task(StaticTask::new(
            NOTIFY_MENTIONS,
            Condition::task_succeeded(FETCH_MENTIONS),
            CapabilityRef::new(slack::SERVICE, slack::ENDPOINT_MESSAGE),
            ArgumentSource::computed(digest_arguments),
        ))
}

fn fetch_arguments(
    _state: &AccumulatedState,
    ctx: &ReactionContext<'_, SyncConfig>,
) -> Option<Vec<Argument>> {
    let cfg = &ctx.config.jira;
    let jql = IssueSource::Mentioned.jql(&cfg.start_day);
    Some(jira::list_arguments(&ListArgs {
        token: &cfg.token,
        endpoint: &cfg.endpoint,
        user: &cfg.user,
        jql: &jql,
        query_fields: jira::ALL_FIELDS,
    }))
}

fn digest_arguments(
    state: &AccumulatedState,
    ctx: &ReactionContext<'_, SyncConfig>,
) -> Option<Vec<Argument>> {
    let found = issues::decode_issues(state, FETCH_MENTIONS)?;
    let config = ctx.config;
    let message = issues::notification_message(
        IssueSource::Mentioned,
        &found,
        &config.jira.endpoint,
        config.empty_results,
    )?;
    Some(slack::message_arguments(&config.slack.webhook_url, &message))
}
