//! In-memory board holding the canonical task list.
//!
//! The `Board` is the only writer of task state. Every change arrives as one
//! of four intents (create, advance, revert, relocate) and either applies in
//! full or is declined with the board left exactly as it was.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fields::*;
use crate::metrics::Metrics;
use crate::task::{NewTask, Task, TaskId};

/// Reason the board refused an intent. The board is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Declined {
    #[error("title is required")]
    EmptyTitle,
    #[error("task {0} not found")]
    UnknownTask(TaskId),
    #[error("task {0} is already approved")]
    AlreadyApproved(TaskId),
    #[error("task {0} is already in draft")]
    AlreadyDraft(TaskId),
    #[error("position {index} is outside the {status} column (0..={len})")]
    IndexOutOfRange {
        status: Status,
        index: usize,
        len: usize,
    },
}

/// A request to change the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    Create(NewTask),
    Advance { id: TaskId },
    Revert { id: TaskId },
    Relocate { id: TaskId, status: Status, index: usize },
}

/// Owned copy of the board at one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub version: u64,
    pub tasks: Vec<Task>,
}

/// The ordered task collection plus the clock that stamps its mutations.
#[derive(Debug)]
pub struct Board<C: Clock = DefaultClock> {
    tasks: Vec<Task>,
    version: u64,
    clock: Arc<C>,
}

impl Board<DefaultClock> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for Board<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Board<C> {
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self::with_tasks(Vec::new(), clock)
    }

    /// Start from an existing task list, such as the sample board.
    pub fn with_tasks(tasks: Vec<Task>, clock: Arc<C>) -> Self {
        Board {
            tasks,
            version: 0,
            clock,
        }
    }

    /// All tasks in board order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of accepted mutations since the board was built.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            tasks: self.tasks.clone(),
        }
    }

    /// Get a task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Generate the next available task ID.
    fn next_id(&self) -> TaskId {
        TaskId(self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1)
    }

    /// Tasks matching the team filter, in board order.
    pub fn view(&self, filter: TeamFilter) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| filter.matches(t.team))
    }

    /// One stage column, in board order.
    pub fn column(&self, status: Status, filter: TeamFilter) -> Vec<&Task> {
        self.view(filter).filter(|t| t.status == status).collect()
    }

    /// Metrics over the whole board, regardless of any view filter.
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(&self.tasks)
    }

    /// Dispatch an intent to the matching operation.
    pub fn apply(&mut self, intent: Intent) -> Result<TaskId, Declined> {
        let result = match intent {
            Intent::Create(new_task) => self.create(new_task),
            Intent::Advance { id } => self.advance(id),
            Intent::Revert { id } => self.revert(id),
            Intent::Relocate { id, status, index } => self.relocate(id, status, index),
        };
        if let Err(reason) = &result {
            debug!(%reason, "intent declined");
        }
        result
    }

    /// Append a new task at its team's entry stage.
    pub fn create(&mut self, new_task: NewTask) -> Result<TaskId, Declined> {
        if new_task.title.trim().is_empty() {
            return Err(Declined::EmptyTitle);
        }

        let now = self.clock.utc();
        let id = self.next_id();
        let NewTask {
            title,
            description,
            team,
            assignee,
        } = new_task;
        let task = Task {
            id,
            title,
            description,
            team,
            status: team.entry_stage(),
            assignee: assignee.filter(|a| !a.trim().is_empty()),
            hours_worked: 0,
            revision_count: 0,
            created_at: now,
            updated_at: now,
        };
        debug!(task = %id, %team, status = %task.status, "created task");
        self.tasks.push(task);
        self.version += 1;
        Ok(id)
    }

    /// Move a task one stage forward.
    pub fn advance(&mut self, id: TaskId) -> Result<TaskId, Declined> {
        let idx = self.position(id).ok_or(Declined::UnknownTask(id))?;
        let now = self.clock.utc();
        let task = &mut self.tasks[idx];
        let next = task.status.next().ok_or(Declined::AlreadyApproved(id))?;

        debug!(task = %id, from = %task.status, to = %next, "advanced task");
        task.status = next;
        task.hours_worked += 1;
        task.updated_at = now;
        self.version += 1;
        Ok(id)
    }

    /// Move a task one stage back.
    pub fn revert(&mut self, id: TaskId) -> Result<TaskId, Declined> {
        let idx = self.position(id).ok_or(Declined::UnknownTask(id))?;
        let now = self.clock.utc();
        let task = &mut self.tasks[idx];
        let prev = task.status.prev().ok_or(Declined::AlreadyDraft(id))?;

        debug!(task = %id, from = %task.status, to = %prev, "reverted task");
        task.status = prev;
        task.revision_count += 1;
        task.updated_at = now;
        self.version += 1;
        Ok(id)
    }

    /// Place a task directly into a column at a position, skipping stages if
    /// needed.
    ///
    /// `index` counts the other cards already in the target column; `len`
    /// means after the last one. A move to a later stage counts one hour of
    /// work, a move to an earlier stage one revision, however far it jumps.
    pub fn relocate(&mut self, id: TaskId, target: Status, index: usize) -> Result<TaskId, Declined> {
        let from = self.position(id).ok_or(Declined::UnknownTask(id))?;

        let slots: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(i, t)| *i != from && t.status == target)
            .map(|(i, _)| i)
            .collect();
        if index > slots.len() {
            return Err(Declined::IndexOutOfRange {
                status: target,
                index,
                len: slots.len(),
            });
        }

        let now = self.clock.utc();
        let mut task = self.tasks.remove(from);
        // Positions were taken before the removal.
        let shifted = |pos: usize| if pos > from { pos - 1 } else { pos };
        let insert_at = match (slots.get(index), slots.last()) {
            (Some(&pos), _) => shifted(pos),
            (None, Some(&last)) => shifted(last) + 1,
            (None, None) if task.status == target => from,
            (None, None) => self.tasks.len(),
        };

        let current = task.status;
        if target > current {
            task.hours_worked += 1;
        } else if target < current {
            task.revision_count += 1;
        }
        if target != current {
            task.status = target;
            task.updated_at = now;
        }

        debug!(task = %id, from = %current, to = %target, index, "relocated task");
        self.tasks.insert(insert_at, task);
        self.version += 1;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_task, StepClock};
    use chrono::Duration;
    use rstest::rstest;

    fn board() -> (Board<StepClock>, Arc<StepClock>) {
        let clock = Arc::new(StepClock::default());
        (Board::with_clock(Arc::clone(&clock)), clock)
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id.0).collect()
    }

    /// Board with three draft cards (#1..#3) and two audit cards (#4, #5),
    /// interleaved in board order.
    fn columns_board() -> Board<StepClock> {
        let clock = Arc::new(StepClock::default());
        let tasks = vec![
            sample_task(1, Team::Medical, Status::Draft),
            sample_task(4, Team::Qa, Status::Audit),
            sample_task(2, Team::Medical, Status::Draft),
            sample_task(5, Team::Visual, Status::Audit),
            sample_task(3, Team::Medical, Status::Draft),
        ];
        Board::with_tasks(tasks, clock)
    }

    #[rstest]
    #[case(Team::Medical, Status::Draft)]
    #[case(Team::Visual, Status::Visuals)]
    #[case(Team::Qa, Status::Visuals)]
    fn test_create_sets_entry_stage(#[case] team: Team, #[case] expected: Status) {
        let (mut board, clock) = board();
        let id = board.create(NewTask::new("Brochure", team)).unwrap();
        let task = board.get(id).unwrap();
        assert_eq!(task.status, expected);
        assert_eq!(task.hours_worked, 0);
        assert_eq!(task.revision_count, 0);
        assert_eq!(task.created_at, clock.now());
        assert_eq!(task.updated_at, task.created_at);
    }

    #[test]
    fn test_create_appends_with_fresh_ids() {
        let (mut board, _) = board();
        let a = board.create(NewTask::new("One", Team::Medical)).unwrap();
        let b = board
            .create(
                NewTask::new("Two", Team::Qa)
                    .with_description("check claims")
                    .with_assignee("Ana"),
            )
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(board.tasks().last().map(|t| t.id), Some(b));
        let task = board.get(b).unwrap();
        assert_eq!(task.description, "check claims");
        assert_eq!(task.assignee.as_deref(), Some("Ana"));
        assert_eq!(board.version(), 2);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let (mut board, _) = board();
        assert_eq!(board.create(NewTask::new("", Team::Medical)), Err(Declined::EmptyTitle));
        assert_eq!(board.create(NewTask::new("   ", Team::Qa)), Err(Declined::EmptyTitle));
        assert!(board.tasks().is_empty());
        assert_eq!(board.version(), 0);
    }

    #[test]
    fn test_create_drops_blank_assignee() {
        let (mut board, _) = board();
        let id = board
            .create(NewTask::new("Banner", Team::Visual).with_assignee(""))
            .unwrap();
        assert_eq!(board.get(id).unwrap().assignee, None);
    }

    #[test]
    fn test_advance_steps_forward_and_counts_hours() {
        let (mut board, clock) = board();
        let id = board.create(NewTask::new("Leaflet", Team::Medical)).unwrap();
        clock.advance(Duration::days(2));

        board.advance(id).unwrap();
        let task = board.get(id).unwrap();
        assert_eq!(task.status, Status::Visuals);
        assert_eq!(task.hours_worked, 1);
        assert_eq!(task.revision_count, 0);
        assert_eq!(task.updated_at, clock.now());
        assert_ne!(task.updated_at, task.created_at);
    }

    #[test]
    fn test_advance_past_approved_is_declined() {
        let (mut board, _) = board();
        let id = board.create(NewTask::new("Leaflet", Team::Visual)).unwrap();
        board.advance(id).unwrap();
        board.advance(id).unwrap();
        let before = board.snapshot();

        assert_eq!(board.advance(id), Err(Declined::AlreadyApproved(id)));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_revert_before_draft_is_declined() {
        let (mut board, _) = board();
        let id = board.create(NewTask::new("Leaflet", Team::Medical)).unwrap();
        let before = board.snapshot();

        assert_eq!(board.revert(id), Err(Declined::AlreadyDraft(id)));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_unknown_ids_are_declined() {
        let (mut board, _) = board();
        let ghost = TaskId(99);
        assert_eq!(board.advance(ghost), Err(Declined::UnknownTask(ghost)));
        assert_eq!(board.revert(ghost), Err(Declined::UnknownTask(ghost)));
        assert_eq!(
            board.relocate(ghost, Status::Audit, 0),
            Err(Declined::UnknownTask(ghost))
        );
        assert_eq!(board.version(), 0);
    }

    #[rstest]
    #[case(Team::Medical)]
    #[case(Team::Visual)]
    #[case(Team::Qa)]
    fn test_advance_then_revert_restores_status(#[case] team: Team) {
        let (mut board, _) = board();
        let id = board.create(NewTask::new("Round trip", team)).unwrap();
        let start = board.get(id).unwrap().clone();

        board.advance(id).unwrap();
        board.revert(id).unwrap();

        let end = board.get(id).unwrap();
        assert_eq!(end.status, start.status);
        assert_eq!(end.hours_worked, start.hours_worked + 1);
        assert_eq!(end.revision_count, start.revision_count + 1);
    }

    #[test]
    fn test_relocate_within_column_only_reorders() {
        let mut board = columns_board();
        let before = board.get(TaskId(3)).unwrap().clone();

        board.relocate(TaskId(3), Status::Draft, 0).unwrap();

        assert_eq!(ids(&board.column(Status::Draft, TeamFilter::All)), vec![3, 1, 2]);
        let after = board.get(TaskId(3)).unwrap();
        assert_eq!(after, &before);
        assert_eq!(board.version(), 1);
    }

    #[test]
    fn test_relocate_within_column_to_end() {
        let mut board = columns_board();
        board.relocate(TaskId(1), Status::Draft, 2).unwrap();
        assert_eq!(ids(&board.column(Status::Draft, TeamFilter::All)), vec![2, 3, 1]);
        assert_eq!(ids(&board.column(Status::Audit, TeamFilter::All)), vec![4, 5]);
    }

    #[test]
    fn test_relocate_forward_skips_stages_and_counts_one_hour() {
        let mut board = columns_board();
        let before = board.get(TaskId(2)).unwrap().clone();

        board.relocate(TaskId(2), Status::Approved, 0).unwrap();

        let after = board.get(TaskId(2)).unwrap();
        assert_eq!(after.status, Status::Approved);
        assert_eq!(after.hours_worked, before.hours_worked + 1);
        assert_eq!(after.revision_count, before.revision_count);
        assert_eq!(ids(&board.column(Status::Draft, TeamFilter::All)), vec![1, 3]);
    }

    #[test]
    fn test_relocate_backward_counts_one_revision() {
        let mut board = columns_board();
        let before = board.get(TaskId(5)).unwrap().clone();

        board.relocate(TaskId(5), Status::Draft, 1).unwrap();

        let after = board.get(TaskId(5)).unwrap();
        assert_eq!(after.status, Status::Draft);
        assert_eq!(after.revision_count, before.revision_count + 1);
        assert_eq!(after.hours_worked, before.hours_worked);
        assert_eq!(ids(&board.column(Status::Draft, TeamFilter::All)), vec![1, 5, 2, 3]);
    }

    #[test]
    fn test_relocate_into_column_end() {
        let mut board = columns_board();
        board.relocate(TaskId(4), Status::Draft, 3).unwrap();
        assert_eq!(ids(&board.column(Status::Draft, TeamFilter::All)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_relocate_out_of_range_is_declined() {
        let mut board = columns_board();
        let before = board.snapshot();

        assert_eq!(
            board.relocate(TaskId(1), Status::Audit, 3),
            Err(Declined::IndexOutOfRange {
                status: Status::Audit,
                index: 3,
                len: 2
            })
        );
        // The moving card is not counted in its own column.
        assert!(board.relocate(TaskId(1), Status::Draft, 3).is_err());
        assert_eq!(board.snapshot(), before);
    }

    #[rstest]
    #[case(Status::Draft, Status::Visuals)]
    #[case(Status::Draft, Status::Approved)]
    #[case(Status::Visuals, Status::Approved)]
    #[case(Status::Approved, Status::Draft)]
    #[case(Status::Audit, Status::Visuals)]
    #[case(Status::Approved, Status::Audit)]
    fn test_relocate_across_columns_changes_exactly_one_counter(
        #[case] from: Status,
        #[case] to: Status,
    ) {
        let clock = Arc::new(StepClock::default());
        let mut board = Board::with_tasks(vec![sample_task(1, Team::Visual, from)], clock);
        let before = board.get(TaskId(1)).unwrap().clone();

        board.relocate(TaskId(1), to, 0).unwrap();

        let after = board.get(TaskId(1)).unwrap();
        let hours = after.hours_worked - before.hours_worked;
        let revisions = after.revision_count - before.revision_count;
        assert_eq!(hours + revisions, 1);
        assert_eq!(hours == 1, to > from);
        assert_eq!(after.status, to);
    }

    #[test]
    fn test_relocate_into_empty_column_appends() {
        let mut board = columns_board();
        board.relocate(TaskId(1), Status::Visuals, 0).unwrap();
        assert_eq!(board.tasks().last().map(|t| t.id), Some(TaskId(1)));
        assert_eq!(ids(&board.column(Status::Visuals, TeamFilter::All)), vec![1]);
    }

    #[test]
    fn test_views_filter_by_team_only() {
        let board = columns_board();
        let qa: Vec<&Task> = board.view(TeamFilter::Qa).collect();
        assert_eq!(ids(&qa), vec![4]);
        assert!(qa.iter().all(|t| t.team == Team::Qa));
        assert_eq!(board.view(TeamFilter::All).count(), 5);
        assert_eq!(ids(&board.column(Status::Audit, TeamFilter::Visual)), vec![5]);
        assert_eq!(board.metrics().audit_completion, 1);
        assert_eq!(board.metrics().content_stuck, 2);
    }

    #[test]
    fn test_apply_dispatches_and_snapshot_is_detached() {
        let (mut board, _) = board();
        let id = board
            .apply(Intent::Create(NewTask::new("Poster", Team::Medical)))
            .unwrap();
        let snapshot = board.snapshot();

        board.apply(Intent::Advance { id }).unwrap();
        board.apply(Intent::Revert { id }).unwrap();
        board
            .apply(Intent::Relocate {
                id,
                status: Status::Audit,
                index: 0,
            })
            .unwrap();

        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.tasks[0].status, Status::Draft);
        assert_eq!(board.version(), 4);
        assert_eq!(board.get(id).unwrap().status, Status::Audit);
        assert_eq!(board.apply(Intent::Revert { id: TaskId(9) }), Err(Declined::UnknownTask(TaskId(9))));
        assert_eq!(board.version(), 4);
    }

    #[test]
    fn test_intent_json_format() {
        let json = r#"[
            {"intent": "create", "title": "Poster", "team": "visual", "assignee": "Kim"},
            {"intent": "advance", "id": 4},
            {"intent": "revert", "id": 4},
            {"intent": "relocate", "id": 4, "status": "approved", "index": 0}
        ]"#;
        let intents: Vec<Intent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            intents[0],
            Intent::Create(NewTask::new("Poster", Team::Visual).with_assignee("Kim"))
        );
        assert_eq!(intents[1], Intent::Advance { id: TaskId(4) });
        assert_eq!(
            intents[3],
            Intent::Relocate {
                id: TaskId(4),
                status: Status::Approved,
                index: 0
            }
        );
    }
}
