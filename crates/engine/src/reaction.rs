//! The reaction contract: `(event, state, context) -> tasks`.
//!
//! Reactions are pure. They read the state snapshot, the wiring-time
//! configuration and the clock from their arguments, and return the tasks
//! the engine should schedule next. They never fail: anything they cannot
//! derive is dropped and the returned batch is simply shorter.

use crate::clock::Clock;
use crate::condition::Condition;
use crate::models::{Argument, CapabilityRef, Event, TaskDescriptor};
use crate::state::AccumulatedState;

// ---------------------------------------------------------------------------
// ReactionContext
// ---------------------------------------------------------------------------

/// Explicit inputs a reaction may depend on besides the event and state.
pub struct ReactionContext<'a, C> {
    /// Wiring-time configuration (credentials, endpoints, policies).
    pub config: &'a C,
    /// Source of "today".
    pub clock: &'a dyn Clock,
}

impl<'a, C> ReactionContext<'a, C> {
    pub fn new(config: &'a C, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }
}

impl<C> Clone for ReactionContext<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ReactionContext<'_, C> {}

// ---------------------------------------------------------------------------
// Reaction
// ---------------------------------------------------------------------------

/// Derives new tasks from an event once the paired condition holds.
///
/// Implementations must be deterministic: the same `(event, state, ctx)`
/// always yields the same batch, so the engine can replay safely.
pub trait Reaction<C>: Send + Sync {
    fn react(
        &self,
        event: &Event,
        state: &AccumulatedState,
        ctx: &ReactionContext<'_, C>,
    ) -> Vec<TaskDescriptor>;
}

impl<C, F> Reaction<C> for F
where
    F: Fn(&Event, &AccumulatedState, &ReactionContext<'_, C>) -> Vec<TaskDescriptor> + Send + Sync,
{
    fn react(
        &self,
        event: &Event,
        state: &AccumulatedState,
        ctx: &ReactionContext<'_, C>,
    ) -> Vec<TaskDescriptor> {
        self(event, state, ctx)
    }
}

/// A registered `(condition, reaction)` pair.
pub struct EventReaction<C> {
    /// Label used in logs and `describe` output.
    pub name: String,
    pub condition: Condition,
    pub reaction: Box<dyn Reaction<C>>,
}

impl<C> EventReaction<C> {
    pub fn new(
        name: impl Into<String>,
        condition: Condition,
        reaction: impl Reaction<C> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            condition,
            reaction: Box::new(reaction),
        }
    }
}

impl<C> std::fmt::Debug for EventReaction<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventReaction")
            .field("name", &self.name)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Static tasks
// ---------------------------------------------------------------------------

/// Computes a static task's arguments once its condition fires.
/// `None` means the task is skipped for this event.
pub type ArgumentFn<C> =
    dyn Fn(&AccumulatedState, &ReactionContext<'_, C>) -> Option<Vec<Argument>> + Send + Sync;

/// Where a static task gets its arguments.
pub enum ArgumentSource<C> {
    Fixed(Vec<Argument>),
    Computed(Box<ArgumentFn<C>>),
}

impl<C> ArgumentSource<C> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&AccumulatedState, &ReactionContext<'_, C>) -> Option<Vec<Argument>>
            + Send
            + Sync
            + 'static,
    {
        Self::Computed(Box::new(f))
    }
}

/// A single task declared up front with its own inline condition.
///
/// This is the older pipeline layout; it is run as a reaction that emits at
/// most one task.
pub struct StaticTask<C> {
    pub name: String,
    pub condition: Condition,
    pub capability: CapabilityRef,
    pub arguments: ArgumentSource<C>,
}

impl<C: 'static> StaticTask<C> {
    pub fn new(
        name: impl Into<String>,
        condition: Condition,
        capability: CapabilityRef,
        arguments: ArgumentSource<C>,
    ) -> Self {
        Self {
            name: name.into(),
            condition,
            capability,
            arguments,
        }
    }

    /// Register this task as a reaction named after it.
    pub fn into_event_reaction(self) -> EventReaction<C> {
        EventReaction {
            name: self.name.clone(),
            condition: self.condition.clone(),
            reaction: Box::new(self),
        }
    }
}

impl<C> Reaction<C> for StaticTask<C> {
    fn react(
        &self,
        _event: &Event,
        state: &AccumulatedState,
        ctx: &ReactionContext<'_, C>,
    ) -> Vec<TaskDescriptor> {
        let arguments = match &self.arguments {
            ArgumentSource::Fixed(args) => args.clone(),
            ArgumentSource::Computed(f) => match f(state, ctx) {
                Some(args) => args,
                None => return Vec::new(),
            },
        };

        vec![TaskDescriptor {
            name: self.name.clone(),
            capability: self.capability.clone(),
            arguments,
        }]
    }
}
