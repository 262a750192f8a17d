//! Enumerations for TUI state management.

use crate::fields::Status;
use crate::task::TaskId;

/// What the board screen is showing on top of the columns.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    Board,
    TaskDetail,
    AddTask,
    Help,
}

/// A card picked up for a direct move, and where it would land.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Carry {
    pub task_id: TaskId,
    pub origin: Status,
    /// Target column.
    pub column: usize,
    /// Slot among the other visible cards of the target column; `len` is after the last one.
    pub slot: usize,
}
