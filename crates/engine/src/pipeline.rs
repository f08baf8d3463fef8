//! Pipeline definitions: service bindings plus `(condition, reaction)` pairs.
//!
//! The engine calls [`PipelineDefinition::dispatch`] once per event. Every
//! pair is evaluated independently against the same immutable snapshot,
//! and the batches of those whose condition holds are concatenated in
//! registration order.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::condition::Condition;
use crate::models::{Event, TaskDescriptor};
use crate::reaction::{EventReaction, Reaction, ReactionContext, StaticTask};
use crate::state::AccumulatedState;
use crate::validate::validate_batch;

// ---------------------------------------------------------------------------
// ServiceBinding
// ---------------------------------------------------------------------------

/// A named external service the engine should make available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Catalog name of the service.
    pub name: String,
    /// Catalog version to run.
    pub version: String,
    /// Alias tasks use in `CapabilityRef::service`.
    pub alias: String,
}

impl ServiceBinding {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            alias: alias.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineDefinition
// ---------------------------------------------------------------------------

/// The static wiring of one pipeline, generic over its configuration type.
#[derive(Debug)]
pub struct PipelineDefinition<C> {
    pub name: String,
    pub services: Vec<ServiceBinding>,
    pub reactions: Vec<EventReaction<C>>,
}

impl<C: 'static> PipelineDefinition<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Bind an external service.
    #[must_use]
    pub fn service(mut self, binding: ServiceBinding) -> Self {
        self.services.push(binding);
        self
    }

    /// Register a reaction gated by `condition`.
    #[must_use]
    pub fn on(
        mut self,
        name: impl Into<String>,
        condition: Condition,
        reaction: impl Reaction<C> + 'static,
    ) -> Self {
        self.reactions.push(EventReaction::new(name, condition, reaction));
        self
    }

    /// Register a single pre-declared task with its own inline condition.
    #[must_use]
    pub fn static_task(mut self, task: StaticTask<C>) -> Self {
        self.reactions.push(task.into_event_reaction());
        self
    }
}

impl<C> PipelineDefinition<C> {
    /// Evaluate every registered pair against `event` and collect the tasks
    /// of the reactions whose condition holds.
    ///
    /// A reaction whose batch breaks the batch invariants (see
    /// [`validate_batch`]) contributes nothing; the violation is logged.
    pub fn dispatch(
        &self,
        event: &Event,
        state: &AccumulatedState,
        ctx: &ReactionContext<'_, C>,
    ) -> Vec<TaskDescriptor> {
        let mut tasks = Vec::new();

        for registered in &self.reactions {
            if !registered.condition.evaluate(event, state) {
                debug!(reaction = %registered.name, "condition not met: {}", registered.condition);
                continue;
            }

            let batch = registered.reaction.react(event, state, ctx);

            if let Err(e) = validate_batch(&batch, &self.services) {
                error!(reaction = %registered.name, "dropping invalid task batch: {e}");
                continue;
            }

            info!(reaction = %registered.name, "reaction fired, {} task(s) emitted", batch.len());
            tasks.extend(batch);
        }

        tasks
    }

    /// Look up a binding by alias.
    pub fn binding(&self, alias: &str) -> Option<&ServiceBinding> {
        self.services.iter().find(|s| s.alias == alias)
    }
}
