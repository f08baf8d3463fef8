//! Condition predicates that gate reactions.

use serde::{Deserialize, Serialize};

use crate::models::{Event, TaskStatus};
use crate::state::AccumulatedState;

/// When a reaction should fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Holds for the single `EngineStarted` event of a run.
    EngineStarted,
    /// Holds when `task` just finished and its most recent record carries
    /// `status`.
    TaskFinishedWithStatus { task: String, status: TaskStatus },
}

impl Condition {
    pub fn task_finished_with_status(task: impl Into<String>, status: TaskStatus) -> Self {
        Self::TaskFinishedWithStatus {
            task: task.into(),
            status,
        }
    }

    /// Shorthand for the only completion status pipelines react to today.
    pub fn task_succeeded(task: impl Into<String>) -> Self {
        Self::task_finished_with_status(task, TaskStatus::Success)
    }

    /// Evaluate against one event and a state snapshot. Pure.
    pub fn evaluate(&self, event: &Event, state: &AccumulatedState) -> bool {
        match self {
            Self::EngineStarted => matches!(event, Event::EngineStarted),
            Self::TaskFinishedWithStatus { task, status } => match event {
                Event::TaskFinished { task_name, .. } if task_name == task => state
                    .find(task)
                    .is_some_and(|record| record.status == *status),
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EngineStarted => write!(f, "engine started"),
            Self::TaskFinishedWithStatus { task, status } => {
                write!(f, "task '{task}' finished with status {status}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionRecord;

    fn finished(name: &str) -> Event {
        Event::task_finished(name, TaskStatus::Success)
    }

    #[test]
    fn engine_started_only_matches_start_event() {
        let state = AccumulatedState::new();
        assert!(Condition::EngineStarted.evaluate(&Event::EngineStarted, &state));
        assert!(!Condition::EngineStarted.evaluate(&finished("x"), &state));
    }

    #[test]
    fn completion_is_false_when_task_never_ran() {
        let cond = Condition::task_succeeded("fetch");
        let state = AccumulatedState::new();
        assert!(!cond.evaluate(&finished("fetch"), &state));
    }

    #[test]
    fn completion_requires_matching_status() {
        let cond = Condition::task_succeeded("fetch");
        let mut state = AccumulatedState::new();
        state.append(ExecutionRecord::new("fetch", TaskStatus::Failed, ""));
        assert!(!cond.evaluate(&Event::task_finished("fetch", TaskStatus::Failed), &state));

        state.append(ExecutionRecord::success("fetch", "[]"));
        assert!(cond.evaluate(&finished("fetch"), &state));
    }

    #[test]
    fn completion_ignores_events_for_other_tasks() {
        let cond = Condition::task_succeeded("fetch");
        let state: AccumulatedState = [
            ExecutionRecord::success("fetch", "[]"),
            ExecutionRecord::success("notify", ""),
        ]
        .into_iter()
        .collect();

        assert!(!cond.evaluate(&finished("notify"), &state));
        assert!(!cond.evaluate(&Event::EngineStarted, &state));
    }

    #[test]
    fn failure_condition_can_be_expressed() {
        let cond = Condition::task_finished_with_status("fetch", TaskStatus::Error);
        let state: AccumulatedState =
            [ExecutionRecord::new("fetch", TaskStatus::Error, "timeout")].into_iter().collect();
        assert!(cond.evaluate(&Event::task_finished("fetch", TaskStatus::Error), &state));
    }
}
