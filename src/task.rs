//! Task data structure and related functionality.
//!
//! This module defines the `Task` struct that represents one piece of content
//! moving through the board, plus the `NewTask` request used to create one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::*;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Opaque task identifier, allocated by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece of work on the board.
///
/// `hours_worked` only grows on forward moves and `revision_count` only on
/// backward moves; neither ever decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub team: Team,
    pub status: Status,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub hours_worked: u32,
    #[serde(default)]
    pub revision_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whole days between creation and the last update, rounded down.
    pub fn elapsed_days(&self) -> i64 {
        (self.updated_at - self.created_at)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY)
    }
}

/// Request to put a new task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub team: Team,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, team: Team) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            team,
            assignee: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}
