//! `engine` crate: the reactive task-derivation core.
//!
//! Value objects, accumulated state and output decoding, condition
//! predicates, the reaction contract, pipeline definitions and dispatch,
//! validation, the clock capability, and a local dry-run executor.

pub mod models;
pub mod error;
pub mod state;
pub mod condition;
pub mod reaction;
pub mod pipeline;
pub mod validate;
pub mod clock;
pub mod capability;
pub mod executor;

pub use models::{Argument, ArgumentValue, CapabilityRef, Event, ExecutionRecord, TaskDescriptor, TaskStatus};
pub use error::{CapabilityError, EngineError, OutputError};
pub use state::AccumulatedState;
pub use condition::Condition;
pub use reaction::{ArgumentSource, EventReaction, Reaction, ReactionContext, StaticTask};
pub use pipeline::{PipelineDefinition, ServiceBinding};
pub use validate::{validate_batch, validate_pipeline};
pub use clock::{format_date, Clock, FixedClock, SystemClock};
pub use capability::{Capability, InvocationContext};
pub use executor::{CapabilityRegistry, ExecutorConfig, LocalExecutor, RunReport};

#[cfg(test)]
mod executor_tests;
