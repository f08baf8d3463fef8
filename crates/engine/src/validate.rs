//! Structural validation for pipelines and the task batches they emit.
//!
//! Pipeline rules:
//! 1. The pipeline has a non-empty name.
//! 2. Service aliases are unique.
//! 3. Reaction names are unique.
//!
//! Batch rules (checked per reaction output):
//! 1. Task names are non-empty and unique within the batch.
//! 2. Argument keys are unique within a task.
//! 3. Every task targets a service alias the pipeline binds.

use std::collections::HashSet;

use crate::models::TaskDescriptor;
use crate::pipeline::{PipelineDefinition, ServiceBinding};
use crate::EngineError;

/// Validate the static wiring of a pipeline.
///
/// # Errors
/// - [`EngineError::EmptyPipelineName`] if the pipeline is unnamed.
/// - [`EngineError::DuplicateServiceAlias`] if two bindings share an alias.
/// - [`EngineError::DuplicateReactionName`] if two reactions share a name.
pub fn validate_pipeline<C>(pipeline: &PipelineDefinition<C>) -> Result<(), EngineError> {
    if pipeline.name.trim().is_empty() {
        return Err(EngineError::EmptyPipelineName);
    }

    let mut aliases: HashSet<&str> = HashSet::new();
    for binding in &pipeline.services {
        if !aliases.insert(binding.alias.as_str()) {
            return Err(EngineError::DuplicateServiceAlias(binding.alias.clone()));
        }
    }

    let mut reactions: HashSet<&str> = HashSet::new();
    for reaction in &pipeline.reactions {
        if !reactions.insert(reaction.name.as_str()) {
            return Err(EngineError::DuplicateReactionName(reaction.name.clone()));
        }
    }

    Ok(())
}

/// Validate one reaction's output against the pipeline's bindings.
///
/// # Errors
/// - [`EngineError::EmptyTaskName`] / [`EngineError::DuplicateTaskName`]
/// - [`EngineError::DuplicateArgumentKey`]
/// - [`EngineError::UnboundService`]
pub fn validate_batch(
    tasks: &[TaskDescriptor],
    services: &[ServiceBinding],
) -> Result<(), EngineError> {
    let bound: HashSet<&str> = services.iter().map(|s| s.alias.as_str()).collect();
    let mut names: HashSet<&str> = HashSet::new();

    for task in tasks {
        if task.name.is_empty() {
            return Err(EngineError::EmptyTaskName);
        }
        if !names.insert(task.name.as_str()) {
            return Err(EngineError::DuplicateTaskName(task.name.clone()));
        }

        let mut keys: HashSet<&str> = HashSet::new();
        for arg in &task.arguments {
            if !keys.insert(arg.key.as_str()) {
                return Err(EngineError::DuplicateArgumentKey {
                    task: task.name.clone(),
                    key: arg.key.clone(),
                });
            }
        }

        if !bound.contains(task.capability.service.as_str()) {
            return Err(EngineError::UnboundService {
                task: task.name.clone(),
                service: task.capability.service.clone(),
            });
        }
    }

    Ok(())
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::models::{Argument, Event};
    use crate::reaction::ReactionContext;
    use crate::state::AccumulatedState;

    fn nothing(_: &Event, _: &AccumulatedState, _: &ReactionContext<'_, ()>) -> Vec<TaskDescriptor> {
        Vec::new()
    }

    fn services() -> Vec<ServiceBinding> {
        vec![ServiceBinding::new("chat", "0.1.0", "chat")]
    }

    #[test]
    fn well_formed_pipeline_is_valid() {
        let pipeline = PipelineDefinition::<()>::new("p")
            .service(ServiceBinding::new("chat", "0.1.0", "chat"))
            .service(ServiceBinding::new("chat", "0.1.0", "chat-2"))
            .on("a", Condition::EngineStarted, nothing)
            .on("b", Condition::EngineStarted, nothing);
        assert!(validate_pipeline(&pipeline).is_ok());
    }

    #[test]
    fn empty_pipeline_name_is_rejected() {
        let pipeline = PipelineDefinition::<()>::new("  ");
        assert!(matches!(validate_pipeline(&pipeline), Err(EngineError::EmptyPipelineName)));
    }

    #[test]
    fn duplicate_alias_is_rejected() {
        let pipeline = PipelineDefinition::<()>::new("p")
            .service(ServiceBinding::new("chat", "0.1.0", "chat"))
            .service(ServiceBinding::new("chat", "0.2.0", "chat"));
        assert!(matches!(
            validate_pipeline(&pipeline),
            Err(EngineError::DuplicateServiceAlias(alias)) if alias == "chat"
        ));
    }

    #[test]
    fn duplicate_reaction_name_is_rejected() {
        let pipeline = PipelineDefinition::<()>::new("p")
            .on("same", Condition::EngineStarted, nothing)
            .on("same", Condition::task_succeeded("x"), nothing);
        assert!(matches!(
            validate_pipeline(&pipeline),
            Err(EngineError::DuplicateReactionName(name)) if name == "same"
        ));
    }

    #[test]
    fn empty_batch_is_valid() {
        assert!(validate_batch(&[], &services()).is_ok());
    }

    #[test]
    fn duplicate_task_names_in_batch_are_rejected() {
        let tasks = vec![
            TaskDescriptor::new("send", "chat", "message"),
            TaskDescriptor::new("send", "chat", "message"),
        ];
        assert!(matches!(
            validate_batch(&tasks, &services()),
            Err(EngineError::DuplicateTaskName(name)) if name == "send"
        ));
    }

    #[test]
    fn empty_task_name_is_rejected() {
        let tasks = vec![TaskDescriptor::new("", "chat", "message")];
        assert!(matches!(validate_batch(&tasks, &services()), Err(EngineError::EmptyTaskName)));
    }

    #[test]
    fn repeated_argument_key_is_rejected() {
        let task = TaskDescriptor::new("send", "chat", "message").with_arguments(vec![
            Argument::new("Message", "a"),
            Argument::new("Message", "b"),
        ]);
        assert!(matches!(
            validate_batch(&[task], &services()),
            Err(EngineError::DuplicateArgumentKey { key, .. }) if key == "Message"
        ));
    }

    #[test]
    fn unbound_service_is_rejected() {
        let tasks = vec![TaskDescriptor::new("card", "board", "addcard")];
        assert!(matches!(
            validate_batch(&tasks, &services()),
            Err(EngineError::UnboundService { service, .. }) if service == "board"
        ));
    }
}
