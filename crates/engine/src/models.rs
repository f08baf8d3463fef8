//! Core value objects exchanged between the pipeline and the engine.
//!
//! Everything here is immutable once built and round-trips through JSON, so
//! task batches, states and events can cross the process boundary unchanged.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Capability reference
// ---------------------------------------------------------------------------

/// The remote operation a task targets: a bound service alias plus one of
/// its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityRef {
    pub service: String,
    pub endpoint: String,
}

impl CapabilityRef {
    pub fn new(service: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            endpoint: endpoint.into(),
        }
    }
}

impl std::fmt::Display for CapabilityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.service, self.endpoint)
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Value of a single task argument.
///
/// Most capabilities take plain strings; a few (board labels) take a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Text(String),
    List(Vec<String>),
}

impl ArgumentValue {
    /// The text payload, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The list payload, if this is a `List` value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<String>> for ArgumentValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// A named argument. Keys are a capability-specific contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub key: String,
    pub value: ArgumentValue,
}

impl Argument {
    pub fn new(key: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskDescriptor
// ---------------------------------------------------------------------------

/// One unit of remote work for the engine to schedule.
///
/// The `name` is how later conditions and decoders find this task's
/// execution record, so it has to be stable across the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub name: String,
    pub capability: CapabilityRef,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl TaskDescriptor {
    /// Start a descriptor with no arguments.
    pub fn new(
        name: impl Into<String>,
        service: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capability: CapabilityRef::new(service, endpoint),
            arguments: Vec::new(),
        }
    }

    /// Append an argument, keeping insertion order.
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        self.arguments.push(Argument::new(key, value));
        self
    }

    /// Replace the whole argument list.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Look up an argument by key.
    pub fn argument(&self, key: &str) -> Option<&ArgumentValue> {
        self.arguments
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }

    /// Shorthand for `argument(key)` narrowed to text.
    pub fn text_argument(&self, key: &str) -> Option<&str> {
        self.argument(key).and_then(ArgumentValue::as_text)
    }
}

// ---------------------------------------------------------------------------
// Execution records
// ---------------------------------------------------------------------------

/// Terminal status of an executed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The capability ran and returned a payload.
    Success,
    /// The capability ran and rejected the request.
    Failed,
    /// The capability could not be reached or the task was aborted.
    Error,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed  => write!(f, "failed"),
            Self::Error   => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed"  => Ok(Self::Failed),
            "error"   => Ok(Self::Error),
            other     => Err(format!("unknown task status: {other}")),
        }
    }
}

/// Outcome of one executed task. `output` is opaque text, usually JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub task_name: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub output: String,
}

impl ExecutionRecord {
    pub fn new(task_name: impl Into<String>, status: TaskStatus, output: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            status,
            output: output.into(),
        }
    }

    pub fn success(task_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self::new(task_name, TaskStatus::Success, output)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Signal from the engine that prompts a round of condition evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The engine has started the pipeline. Emitted once per run.
    EngineStarted,
    /// A task finished and its record was appended to the state.
    TaskFinished { task_name: String, status: TaskStatus },
}

impl Event {
    pub fn task_finished(task_name: impl Into<String>, status: TaskStatus) -> Self {
        Self::TaskFinished {
            task_name: task_name.into(),
            status,
        }
    }
}
