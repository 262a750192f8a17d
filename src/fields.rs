//! Enumerations and field types for the workflow board.
//!
//! This module defines the teams that own work, the fixed stage order every
//! task travels along, and the team selector used to narrow board views.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Team that owns a task. Fixed once the task is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Team {
    Medical,
    Visual,
    Qa,
}

impl Team {
    pub const ALL: [Team; 3] = [Team::Medical, Team::Visual, Team::Qa];

    /// Stage a new task enters the pipeline at.
    ///
    /// Only medical content starts from a draft; every other team picks work
    /// up downstream of drafting.
    pub fn entry_stage(self) -> Status {
        match self {
            Team::Medical => Status::Draft,
            Team::Visual | Team::Qa => Status::Visuals,
        }
    }

    /// Short name used on card badges and in tables.
    pub fn label(self) -> &'static str {
        match self {
            Team::Medical => "medical",
            Team::Visual => "visual",
            Team::Qa => "qa",
        }
    }

    /// Long name used in the create form.
    pub fn display_name(self) -> &'static str {
        match self {
            Team::Medical => "Medical Content",
            Team::Visual => "Visual Team",
            Team::Qa => "Workflow QA",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Workflow stage. Declaration order is the stage order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Draft,
    Visuals,
    Audit,
    Approved,
}

impl Status {
    pub const ORDER: [Status; 4] = [Status::Draft, Status::Visuals, Status::Audit, Status::Approved];

    /// Position of this stage in the stage order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Self::ORDER.get(index).copied()
    }

    /// The stage one step forward, if any.
    pub fn next(self) -> Option<Status> {
        Self::from_index(self.index() + 1)
    }

    /// The stage one step back, if any.
    pub fn prev(self) -> Option<Status> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Column title.
    pub fn label(self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Visuals => "Visuals",
            Status::Audit => "Audit",
            Status::Approved => "Approved",
        }
    }

    /// Caption for the action that moves a task out of this stage.
    pub fn forward_action(self) -> &'static str {
        match self {
            Status::Draft => "Send to Visuals",
            Status::Visuals => "Submit for Audit",
            Status::Audit => "Approve",
            Status::Approved => "Published",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Team selector for board views. `All` disables filtering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TeamFilter {
    #[default]
    All,
    Medical,
    Visual,
    Qa,
}

impl TeamFilter {
    pub fn matches(self, team: Team) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Medical => team == Team::Medical,
            TeamFilter::Visual => team == Team::Visual,
            TeamFilter::Qa => team == Team::Qa,
        }
    }

    /// Next selector in the cycle all -> medical -> visual -> qa -> all.
    pub fn cycle(self) -> TeamFilter {
        match self {
            TeamFilter::All => TeamFilter::Medical,
            TeamFilter::Medical => TeamFilter::Visual,
            TeamFilter::Visual => TeamFilter::Qa,
            TeamFilter::Qa => TeamFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamFilter::All => "All Teams",
            TeamFilter::Medical => "Medical",
            TeamFilter::Visual => "Visual",
            TeamFilter::Qa => "Qa",
        }
    }
}
