//! The in-memory collection of commitments and tasks, and its stored JSON form.
//!
//! `PlannerState` is owned by the application and handed to the planner by
//! reference. Swapping in a new state between queries is the owner's job.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Commitment, Task};
use crate::timestamp::RawTimestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    #[serde(default)]
    pub classes: Vec<Commitment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl PlannerState {
    pub fn new(classes: Vec<Commitment>, tasks: Vec<Task>) -> Self {
        Self { classes, tasks }
    }

    /// Parse the stored document, reading naive timestamps in `tz`.
    pub fn from_json(json: &str, tz: &Tz) -> Result<Self> {
        let stored: StoredState = serde_json::from_str(json)?;
        stored.into_state(tz)
    }

    pub fn add_commitment(&mut self, commitment: Commitment) {
        self.classes.push(commitment);
    }

    /// Remove a commitment by id, returning it if it existed.
    pub fn remove_commitment(&mut self, id: &str) -> Option<Commitment> {
        let index = self.classes.iter().position(|c| c.id == id)?;
        Some(self.classes.remove(index))
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove a task by id, returning it if it existed.
    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// A task as persisted by the front end, timestamps not yet interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "est", default)]
    pub estimated_hours: f64,
    pub deadline: RawTimestamp,
    #[serde(alias = "createdAt")]
    pub created_at: RawTimestamp,
}

impl StoredTask {
    pub fn into_task(self, tz: &Tz) -> Result<Task> {
        Ok(Task {
            deadline: self.deadline.resolve(tz)?,
            created_at: self.created_at.resolve(tz)?,
            id: self.id,
            title: self.title,
            estimated_hours: self.estimated_hours,
        })
    }
}

/// The persisted `{ "classes": [...], "tasks": [...] }` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub classes: Vec<Commitment>,
    #[serde(default)]
    pub tasks: Vec<StoredTask>,
}

impl StoredState {
    pub fn into_state(self, tz: &Tz) -> Result<PlannerState> {
        let tasks = self
            .tasks
            .into_iter()
            .map(|t| t.into_task(tz))
            .collect::<Result<Vec<_>>>()?;
        Ok(PlannerState {
            classes: self.classes,
            tasks,
        })
    }
}
