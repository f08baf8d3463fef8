//! Accumulated execution history and the output decoder.
//!
//! The engine owns the state and is the only writer; reactions see it
//! through `&AccumulatedState` and can only query it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::OutputError;
use crate::models::ExecutionRecord;

/// Append-only, ordered sequence of execution records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccumulatedState {
    records: Vec<ExecutionRecord>,
}

impl AccumulatedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed task's record. Existing records are never touched.
    pub fn append(&mut self, record: ExecutionRecord) {
        self.records.push(record);
    }

    /// All records in the order they were appended.
    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record for `task_name`, if the task has run.
    pub fn find(&self, task_name: &str) -> Option<&ExecutionRecord> {
        self.records.iter().rev().find(|r| r.task_name == task_name)
    }

    /// Raw output of the most recent record for `task_name`.
    ///
    /// # Errors
    /// [`OutputError::NotFound`] when the task has no record.
    pub fn find_output(&self, task_name: &str) -> Result<&str, OutputError> {
        self.find(task_name)
            .map(|r| r.output.as_str())
            .ok_or_else(|| OutputError::NotFound(task_name.to_owned()))
    }

    /// Decode the output of `task_name` as JSON into `T`.
    ///
    /// # Errors
    /// - [`OutputError::NotFound`] when the task has no record.
    /// - [`OutputError::Decode`] when the output is not a valid `T`.
    pub fn decode_output<T: DeserializeOwned>(&self, task_name: &str) -> Result<T, OutputError> {
        let raw = self.find_output(task_name)?;
        serde_json::from_str(raw).map_err(|source| OutputError::Decode {
            task: task_name.to_owned(),
            source,
        })
    }
}

impl FromIterator<ExecutionRecord> for AccumulatedState {
    fn from_iter<I: IntoIterator<Item = ExecutionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
