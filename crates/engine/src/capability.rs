//! The `Capability` trait: the contract a remote service adapter fulfils.
//!
//! Real adapters live outside this workspace; the local executor and tests
//! drive pipelines through implementations of this trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CapabilityError;
use crate::models::TaskDescriptor;

/// Shared context passed to every capability invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// ID of the current run.
    pub run_id: Uuid,
    /// Name of the pipeline being run.
    pub pipeline: String,
}

/// A remote operation reachable by service alias.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Execute `task` and return its raw textual output.
    async fn invoke(
        &self,
        task: &TaskDescriptor,
        ctx: &InvocationContext,
    ) -> Result<String, CapabilityError>;
}
