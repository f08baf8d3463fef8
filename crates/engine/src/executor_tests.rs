//! Tests for the local executor.
//!
//! Capabilities are stubbed in-process; nothing here talks to a real
//! service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::capability::{Capability, InvocationContext};
use crate::clock::FixedClock;
use crate::condition::Condition;
use crate::error::CapabilityError;
use crate::executor::{CapabilityRegistry, ExecutorConfig, LocalExecutor};
use crate::models::{Event, TaskDescriptor, TaskStatus};
use crate::pipeline::{PipelineDefinition, ServiceBinding};
use crate::reaction::ReactionContext;
use crate::state::AccumulatedState;
use crate::EngineError;

/// Answers every invocation with a fixed result and records task names.
struct Stub {
    result: Result<String, CapabilityError>,
    seen: Mutex<Vec<String>>,
}

impl Stub {
    fn new(result: Result<String, CapabilityError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Capability for Stub {
    async fn invoke(
        &self,
        task: &TaskDescriptor,
        _ctx: &InvocationContext,
    ) -> Result<String, CapabilityError> {
        self.seen.lock().unwrap().push(task.name.clone());
        self.result.clone()
    }
}

fn fetch(_: &Event, _: &AccumulatedState, _: &ReactionContext<'_, ()>) -> Vec<TaskDescriptor> {
    vec![TaskDescriptor::new("fetch", "src", "list")]
}

fn forward(_: &Event, state: &AccumulatedState, _: &ReactionContext<'_, ()>) -> Vec<TaskDescriptor> {
    match state.find_output("fetch") {
        Ok(out) => vec![TaskDescriptor::new("forward", "sink", "write").arg("body", out)],
        Err(_) => Vec::new(),
    }
}

fn again(_: &Event, _: &AccumulatedState, _: &ReactionContext<'_, ()>) -> Vec<TaskDescriptor> {
    vec![TaskDescriptor::new("loop", "sink", "write")]
}

fn pipeline() -> PipelineDefinition<()> {
    PipelineDefinition::new("exec-test")
        .service(ServiceBinding::new("source", "1.0.0", "src"))
        .service(ServiceBinding::new("sink", "1.0.0", "sink"))
        .on("fetch", Condition::EngineStarted, fetch)
        .on("forward", Condition::task_succeeded("fetch"), forward)
}

fn registry(src: Arc<Stub>, sink: Arc<Stub>) -> CapabilityRegistry {
    let mut registry: CapabilityRegistry = HashMap::new();
    registry.insert("src".into(), src);
    registry.insert("sink".into(), sink);
    registry
}

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

#[tokio::test]
async fn run_follows_reactions_until_quiescent() {
    let src = Stub::new(Ok("hello".into()));
    let sink = Stub::new(Ok(String::new()));
    let executor = LocalExecutor::new(registry(src.clone(), sink.clone()), ExecutorConfig::default());
    let clock = clock();

    let report = executor
        .run(&pipeline(), &ReactionContext::new(&(), &clock))
        .await
        .expect("run should finish");

    let names: Vec<&str> = report.state.records().iter().map(|r| r.task_name.as_str()).collect();
    assert_eq!(names, vec!["fetch", "forward"]);
    assert_eq!(src.seen(), vec!["fetch"]);
    assert_eq!(sink.seen(), vec!["forward"]);
    assert!(report.state.records().iter().all(|r| r.status == TaskStatus::Success));
}

#[tokio::test]
async fn rejected_task_is_recorded_as_failed_and_stops_dependents() {
    let src = Stub::new(Err(CapabilityError::Rejected("bad token".into())));
    let sink = Stub::new(Ok(String::new()));
    let executor = LocalExecutor::new(registry(src, sink.clone()), ExecutorConfig::default());
    let clock = clock();

    let report = executor
        .run(&pipeline(), &ReactionContext::new(&(), &clock))
        .await
        .expect("run should finish");

    assert_eq!(report.state.len(), 1);
    let record = report.state.find("fetch").expect("fetch recorded");
    assert_eq!(record.status, TaskStatus::Failed);
    assert_eq!(record.output, "bad token");
    assert!(sink.seen().is_empty());
}

#[tokio::test]
async fn unavailable_or_unregistered_capability_is_an_error_record() {
    let src = Stub::new(Err(CapabilityError::Unavailable("timeout".into())));
    let executor = LocalExecutor::new(
        HashMap::from([("src".to_string(), src as Arc<dyn Capability>)]),
        ExecutorConfig::default(),
    );
    let clock = clock();

    let report = executor
        .run(&pipeline(), &ReactionContext::new(&(), &clock))
        .await
        .expect("run should finish");
    assert_eq!(report.state.find("fetch").map(|r| r.status), Some(TaskStatus::Error));

    let unregistered = LocalExecutor::new(HashMap::new(), ExecutorConfig::default());
    let report = unregistered
        .run(&pipeline(), &ReactionContext::new(&(), &clock))
        .await
        .expect("run should finish");
    let record = report.state.find("fetch").expect("fetch recorded");
    assert_eq!(record.status, TaskStatus::Error);
    assert!(record.output.contains("src"));
}

#[tokio::test]
async fn runaway_pipeline_hits_task_limit() {
    let p = PipelineDefinition::new("runaway")
        .service(ServiceBinding::new("sink", "1.0.0", "sink"))
        .on("seed", Condition::EngineStarted, again)
        .on("again", Condition::task_succeeded("loop"), again);
    let sink = Stub::new(Ok(String::new()));
    let executor = LocalExecutor::new(
        HashMap::from([("sink".to_string(), sink as Arc<dyn Capability>)]),
        ExecutorConfig { max_tasks: 5 },
    );
    let clock = clock();

    let result = executor.run(&p, &ReactionContext::new(&(), &clock)).await;
    assert!(matches!(result, Err(EngineError::TaskLimitExceeded { limit: 5 })));
}
