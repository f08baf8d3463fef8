//! Local, sequential dry-run executor.
//!
//! `LocalExecutor` plays the engine's part for replays and tests:
//! 1. Seeds the event queue with `EngineStarted`.
//! 2. Dispatches each event through the pipeline.
//! 3. Invokes every emitted task against the capability registered for its
//!    service alias, in emission order.
//! 4. Appends the execution record and queues a `TaskFinished` event.
//! 5. Stops when the event queue drains.
//!
//! There is no retry, no concurrency and no persistence here.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::capability::{Capability, InvocationContext};
use crate::error::CapabilityError;
use crate::models::{Event, ExecutionRecord, TaskDescriptor, TaskStatus};
use crate::pipeline::PipelineDefinition;
use crate::reaction::ReactionContext;
use crate::state::AccumulatedState;
use crate::EngineError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on tasks executed in one run. Guards against pipelines
    /// whose reactions keep feeding each other.
    pub max_tasks: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { max_tasks: 1_000 }
    }
}

// ---------------------------------------------------------------------------
// Capability registry
// ---------------------------------------------------------------------------

/// Maps service aliases to `Capability` implementations.
pub type CapabilityRegistry = HashMap<String, Arc<dyn Capability>>;

// ---------------------------------------------------------------------------
// Output of a completed run
// ---------------------------------------------------------------------------

/// The result of running a pipeline to quiescence.
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Every execution record, in execution order.
    pub state: AccumulatedState,
}

// ---------------------------------------------------------------------------
// LocalExecutor
// ---------------------------------------------------------------------------

pub struct LocalExecutor {
    registry: CapabilityRegistry,
    config: ExecutorConfig,
}

impl LocalExecutor {
    pub fn new(registry: CapabilityRegistry, config: ExecutorConfig) -> Self {
        Self { registry, config }
    }

    /// Run `pipeline` from `EngineStarted` until no more tasks are emitted.
    ///
    /// # Errors
    /// [`EngineError::TaskLimitExceeded`] when the run would execute more
    /// than `max_tasks` tasks.
    #[instrument(skip_all, fields(pipeline = %pipeline.name))]
    pub async fn run<C>(
        &self,
        pipeline: &PipelineDefinition<C>,
        ctx: &ReactionContext<'_, C>,
    ) -> Result<RunReport, EngineError> {
        let invocation = InvocationContext {
            run_id: Uuid::new_v4(),
            pipeline: pipeline.name.clone(),
        };
        let mut state = AccumulatedState::new();
        let mut events = VecDeque::from([Event::EngineStarted]);
        let mut executed = 0usize;

        while let Some(event) = events.pop_front() {
            let tasks = pipeline.dispatch(&event, &state, ctx);

            for task in tasks {
                if executed == self.config.max_tasks {
                    return Err(EngineError::TaskLimitExceeded {
                        limit: self.config.max_tasks,
                    });
                }
                executed += 1;

                let record = self.execute(&task, &invocation).await;
                events.push_back(Event::task_finished(record.task_name.clone(), record.status));
                state.append(record);
            }
        }

        info!("run {} finished after {} task(s)", invocation.run_id, executed);

        Ok(RunReport {
            run_id: invocation.run_id,
            state,
        })
    }

    // -----------------------------------------------------------------------
    // Internal: execute a single task and turn the outcome into a record.
    // -----------------------------------------------------------------------

    async fn execute(&self, task: &TaskDescriptor, ctx: &InvocationContext) -> ExecutionRecord {
        let Some(capability) = self.registry.get(&task.capability.service) else {
            warn!(
                "no capability registered for service '{}', task '{}' errored",
                task.capability.service, task.name
            );
            return ExecutionRecord::new(
                task.name.clone(),
                TaskStatus::Error,
                format!("no capability registered for service '{}'", task.capability.service),
            );
        };

        match capability.invoke(task, ctx).await {
            Ok(output) => {
                info!("task '{}' ({}) succeeded", task.name, task.capability);
                ExecutionRecord::success(task.name.clone(), output)
            }
            Err(CapabilityError::Rejected(msg)) => {
                warn!("task '{}' ({}) failed: {}", task.name, task.capability, msg);
                ExecutionRecord::new(task.name.clone(), TaskStatus::Failed, msg)
            }
            Err(CapabilityError::Unavailable(msg)) => {
                warn!("task '{}' ({}) errored: {}", task.name, task.capability, msg);
                ExecutionRecord::new(task.name.clone(), TaskStatus::Error, msg)
            }
        }
    }
}
