//! `MockCapability`: a test double for `Capability`.
//!
//! Useful for dry runs and tests where the real service adapters are
//! unavailable or irrelevant.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use engine::{Capability, CapabilityError, InvocationContext, TaskDescriptor};

/// Behaviour injected into `MockCapability` at construction time.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Return the same output for every task.
    Respond(String),
    /// Return the output keyed by task name; unknown tasks get an empty
    /// output.
    RespondByTask(HashMap<String, String>),
    /// Fail with `CapabilityError::Rejected`.
    Reject(String),
    /// Fail with `CapabilityError::Unavailable`.
    Unavailable(String),
}

/// A mock capability that records every task it receives and answers with
/// a programmer-specified result.
#[derive(Debug, Clone)]
pub struct MockCapability {
    /// Label used in logs and assertions.
    pub name: String,
    pub behaviour: MockBehaviour,
    /// All tasks seen by this capability, in call order.
    pub calls: Arc<Mutex<Vec<TaskDescriptor>>>,
}

impl MockCapability {
    fn with(name: impl Into<String>, behaviour: MockBehaviour) -> Self {
        Self {
            name: name.into(),
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeed with `output`.
    pub fn responding(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self::with(name, MockBehaviour::Respond(output.into()))
    }

    /// Succeed with a per-task-name output.
    pub fn responding_by_task(name: impl Into<String>, outputs: HashMap<String, String>) -> Self {
        Self::with(name, MockBehaviour::RespondByTask(outputs))
    }

    /// Always fail with `Rejected`.
    pub fn rejecting(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with(name, MockBehaviour::Reject(msg.into()))
    }

    /// Always fail with `Unavailable`.
    pub fn unavailable(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with(name, MockBehaviour::Unavailable(msg.into()))
    }

    /// Number of times this capability has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Snapshot of every task received so far.
    pub fn calls(&self) -> Vec<TaskDescriptor> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl Capability for MockCapability {
    async fn invoke(
        &self,
        task: &TaskDescriptor,
        _ctx: &InvocationContext,
    ) -> Result<String, CapabilityError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task.clone());
        debug!("mock '{}' invoked with task '{}'", self.name, task.name);

        match &self.behaviour {
            MockBehaviour::Respond(out) => Ok(out.clone()),
            MockBehaviour::RespondByTask(outputs) => {
                Ok(outputs.get(&task.name).cloned().unwrap_or_default())
            }
            MockBehaviour::Reject(msg)      => Err(CapabilityError::Rejected(msg.clone())),
            MockBehaviour::Unavailable(msg) => Err(CapabilityError::Unavailable(msg.clone())),
        }
    }
}
