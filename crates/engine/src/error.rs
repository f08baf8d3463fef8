//! Engine-level error types.

use thiserror::Error;

/// Errors produced by pipeline validation and the local executor.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Pipeline validation errors ------

    /// The pipeline has no name.
    #[error("pipeline name must not be empty")]
    EmptyPipelineName,

    /// Two service bindings share the same alias.
    #[error("duplicate service alias: '{0}'")]
    DuplicateServiceAlias(String),

    /// Two registered reactions share the same name.
    #[error("duplicate reaction name: '{0}'")]
    DuplicateReactionName(String),

    // ------ Task batch errors ------

    /// A task descriptor was emitted without a name.
    #[error("task descriptor has an empty name")]
    EmptyTaskName,

    /// Two tasks in one batch share a name.
    #[error("duplicate task name in batch: '{0}'")]
    DuplicateTaskName(String),

    /// A task repeats an argument key.
    #[error("task '{task}' repeats argument key '{key}'")]
    DuplicateArgumentKey { task: String, key: String },

    /// A task targets a service that the pipeline does not bind.
    #[error("task '{task}' targets unbound service '{service}'")]
    UnboundService { task: String, service: String },

    // ------ Execution errors ------

    /// The local executor ran more tasks than its configured ceiling.
    #[error("run exceeded the limit of {limit} tasks")]
    TaskLimitExceeded { limit: usize },
}

/// Why a prior task's output could not be recovered from the state.
///
/// Reactions recover from both variants locally by emitting nothing; the
/// split exists so they can log which one happened.
#[derive(Debug, Error)]
pub enum OutputError {
    /// No execution record with this task name exists yet.
    #[error("no execution record for task '{0}'")]
    NotFound(String),

    /// The record exists but its output does not have the expected shape.
    #[error("output of task '{task}' could not be decoded: {source}")]
    Decode {
        task: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by a capability invocation.
///
/// The executor uses the variant to pick the terminal status:
/// - `Rejected`    is recorded as `TaskStatus::Failed`.
/// - `Unavailable` is recorded as `TaskStatus::Error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The capability ran but refused the request.
    #[error("capability rejected the task: {0}")]
    Rejected(String),

    /// The capability could not be reached.
    #[error("capability unavailable: {0}")]
    Unavailable(String),
}
