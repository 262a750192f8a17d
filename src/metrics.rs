//! Workflow metrics derived from the task collection.
//!
//! Metrics are never stored. `Metrics::compute` is a pure function of the
//! task slice it is given and is re-run on every read.

use serde::{Deserialize, Serialize};

use crate::fields::{Status, Team};
use crate::task::Task;

/// Fixed-shape summary of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Medical team tasks.
    pub pieces_created: usize,
    pub hours_worked: u64,
    /// Visual team tasks.
    pub designs_completed: usize,
    /// QA team tasks. Counts team volume, not audit-stage completion.
    pub audit_completion: usize,
    /// Mean whole days from creation to last update over approved tasks.
    pub avg_time_to_approval: i64,
    /// Tasks sitting in audit.
    pub content_stuck: usize,
    pub revision_rounds: u64,
    /// Share of approved tasks, in percent.
    pub target_achievement: u32,
}

/// One labelled metric, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

impl Metrics {
    pub fn compute(tasks: &[Task]) -> Self {
        let count_team = |team: Team| tasks.iter().filter(|t| t.team == team).count();
        let approved: Vec<&Task> = tasks.iter().filter(|t| t.status == Status::Approved).collect();

        let avg_time_to_approval = if approved.is_empty() {
            0
        } else {
            let total_days: i64 = approved.iter().map(|t| t.elapsed_days()).sum();
            round_half_up(total_days as f64 / approved.len() as f64)
        };

        let target_achievement = if tasks.is_empty() {
            0
        } else {
            let percent = round_half_up(approved.len() as f64 * 100.0 / tasks.len() as f64);
            u32::try_from(percent).unwrap_or(0)
        };

        Metrics {
            pieces_created: count_team(Team::Medical),
            hours_worked: tasks.iter().map(|t| u64::from(t.hours_worked)).sum(),
            designs_completed: count_team(Team::Visual),
            audit_completion: count_team(Team::Qa),
            avg_time_to_approval,
            content_stuck: tasks.iter().filter(|t| t.status == Status::Audit).count(),
            revision_rounds: tasks.iter().map(|t| u64::from(t.revision_count)).sum(),
            target_achievement,
        }
    }

    /// The eight metrics in display order, with units applied.
    pub fn cards(&self) -> [MetricCard; 8] {
        let card = |label, value: String| MetricCard { label, value };
        [
            card("Pieces Created", self.pieces_created.to_string()),
            card("Hours Worked", self.hours_worked.to_string()),
            card("Designs Completed", self.designs_completed.to_string()),
            card("Audit Completion", self.audit_completion.to_string()),
            card("Avg Time to Approval", format!("{} days", self.avg_time_to_approval)),
            card("Content Stuck", self.content_stuck.to_string()),
            card("Revision Rounds", self.revision_rounds.to_string()),
            card("Target Achievement", format!("{}%", self.target_achievement)),
        ]
    }
}

/// Round to the nearest integer, halves towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn task(id: u64, team: Team, status: Status) -> Task {
        Task {
            id: TaskId(id),
            title: format!("task {id}"),
            description: String::new(),
            team,
            status,
            assignee: None,
            hours_worked: 0,
            revision_count: 0,
            created_at: day(1),
            updated_at: day(1),
        }
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        assert_eq!(Metrics::compute(&[]), Metrics::default());
    }

    #[test]
    fn test_mixed_board() {
        let mut visual = task(2, Team::Visual, Status::Visuals);
        visual.hours_worked = 6;
        let tasks = vec![
            task(1, Team::Medical, Status::Draft),
            visual,
            task(3, Team::Medical, Status::Audit),
        ];

        let m = Metrics::compute(&tasks);
        assert_eq!(m.pieces_created, 2);
        assert_eq!(m.designs_completed, 1);
        assert_eq!(m.audit_completion, 0);
        assert_eq!(m.content_stuck, 1);
        assert_eq!(m.hours_worked, 6);
        assert_eq!(m.target_achievement, 0);
        assert_eq!(m.avg_time_to_approval, 0);
    }

    #[test]
    fn test_avg_time_to_approval_in_days() {
        let mut approved = task(1, Team::Medical, Status::Approved);
        approved.updated_at = day(4);
        let m = Metrics::compute(&[approved]);
        assert_eq!(m.avg_time_to_approval, 3);
        assert_eq!(m.target_achievement, 100);
    }

    #[test]
    fn test_avg_time_only_counts_approved_and_rounds_half_up() {
        let mut a = task(1, Team::Medical, Status::Approved);
        a.updated_at = day(2);
        let mut b = task(2, Team::Visual, Status::Approved);
        b.updated_at = day(3);
        let mut stuck = task(3, Team::Qa, Status::Audit);
        stuck.updated_at = day(30);

        // (1 + 2) / 2 = 1.5 rounds to 2; the audit task is ignored.
        let m = Metrics::compute(&[a, b, stuck]);
        assert_eq!(m.avg_time_to_approval, 2);
        assert_eq!(m.audit_completion, 1);
    }

    #[rstest]
    #[case(1, 8, 13)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 2, 50)]
    #[case(3, 3, 100)]
    fn test_target_achievement_rounding(
        #[case] approved: u64,
        #[case] total: u64,
        #[case] expected: u32,
    ) {
        let tasks: Vec<Task> = (0..total)
            .map(|i| {
                let status = if i < approved { Status::Approved } else { Status::Draft };
                task(i + 1, Team::Medical, status)
            })
            .collect();
        assert_eq!(Metrics::compute(&tasks).target_achievement, expected);
    }

    #[test]
    fn test_counter_sums() {
        let mut a = task(1, Team::Medical, Status::Draft);
        a.hours_worked = 4;
        a.revision_count = 2;
        let mut b = task(2, Team::Qa, Status::Visuals);
        b.hours_worked = 3;
        b.revision_count = 1;
        let m = Metrics::compute(&[a, b]);
        assert_eq!(m.hours_worked, 7);
        assert_eq!(m.revision_rounds, 3);
    }

    #[test]
    fn test_cards_carry_units() {
        let m = Metrics {
            avg_time_to_approval: 3,
            target_achievement: 25,
            ..Metrics::default()
        };
        let cards = m.cards();
        assert_eq!(cards[0].label, "Pieces Created");
        assert_eq!(cards[4].value, "3 days");
        assert_eq!(cards[7].value, "25%");
    }

    #[test]
    fn test_metrics_json_names() {
        let json = serde_json::to_value(Metrics::default()).unwrap();
        for key in [
            "piecesCreated",
            "hoursWorked",
            "designsCompleted",
            "auditCompletion",
            "avgTimeToApproval",
            "contentStuck",
            "revisionRounds",
            "targetAchievement",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
