//! Sub-command implementations. Each returns what should be printed on
//! stdout so `main` stays a thin dispatcher.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::info;

use catalog::MockCapability;
use engine::{
    validate_pipeline, AccumulatedState, Capability, CapabilityRegistry, Clock, EngineError, Event,
    ExecutorConfig, FixedClock, LocalExecutor, ReactionContext, SystemClock,
};
use flows::{Flow, SyncConfig};

/// JSON summary of a pipeline's bindings and reactions.
pub fn describe(flow: Flow) -> Result<String> {
    let pipeline = flow.pipeline();
    let reactions: Vec<Value> = pipeline
        .reactions
        .iter()
        .map(|r| json!({ "name": r.name, "condition": r.condition }))
        .collect();

    let summary = json!({
        "name": pipeline.name,
        "services": pipeline.services,
        "reactions": reactions,
        "default_empty_results": flow.default_empty_results(),
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}

/// Validate a pipeline's wiring, returning the success line.
pub fn validate(flow: Flow) -> Result<String, EngineError> {
    let pipeline = flow.pipeline();
    validate_pipeline(&pipeline)?;
    Ok(format!(
        "✅ Pipeline '{}' is valid ({} services, {} reactions)",
        pipeline.name,
        pipeline.services.len(),
        pipeline.reactions.len()
    ))
}

/// Dispatch one event against a saved state and print the emitted tasks.
pub fn react(
    flow: Flow,
    config: &SyncConfig,
    state: Option<&Path>,
    event: Option<&str>,
    today: Option<NaiveDate>,
) -> Result<String> {
    let state = match state {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read state file {}", path.display()))?;
            serde_json::from_str::<AccumulatedState>(&content)
                .with_context(|| format!("invalid state in {}", path.display()))?
        }
        None => AccumulatedState::new(),
    };
    let event = match event {
        Some(raw) => serde_json::from_str::<Event>(raw).context("invalid event JSON")?,
        None => Event::EngineStarted,
    };

    let clock = clock_for(today);
    let tasks = flow
        .pipeline()
        .dispatch(&event, &state, &ReactionContext::new(config, clock.as_ref()));
    Ok(serde_json::to_string_pretty(&tasks)?)
}

/// Run a pipeline end to end against mock services answering from
/// `responses`, a JSON object keyed by task name.
pub async fn simulate(
    flow: Flow,
    config: &SyncConfig,
    responses: &Path,
    max_tasks: usize,
    today: Option<NaiveDate>,
) -> Result<String> {
    let outputs = load_responses(responses)?;
    let pipeline = flow.pipeline();

    let registry: CapabilityRegistry = pipeline
        .services
        .iter()
        .map(|binding| {
            let mock = MockCapability::responding_by_task(binding.alias.clone(), outputs.clone());
            (binding.alias.clone(), Arc::new(mock) as Arc<dyn Capability>)
        })
        .collect();

    let clock = clock_for(today);
    let executor = LocalExecutor::new(registry, ExecutorConfig { max_tasks });
    let report = executor
        .run(&pipeline, &ReactionContext::new(config, clock.as_ref()))
        .await
        .context("simulation aborted")?;

    info!("simulated run {} recorded {} task(s)", report.run_id, report.state.len());
    Ok(serde_json::to_string_pretty(&report.state)?)
}

fn clock_for(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

/// String values are used verbatim; anything else is serialized back to
/// JSON text, so fixtures can embed tracker responses as objects.
fn load_responses(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read responses file {}", path.display()))?;
    let raw: HashMap<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("responses in {} must be a JSON object", path.display()))?;

    Ok(raw
        .into_iter()
        .map(|(task, value)| {
            let output = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (task, output)
        })
        .collect())
}
