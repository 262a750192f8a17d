//! Sample tasks a fresh board starts with.

use chrono::{DateTime, TimeZone, Utc};

use crate::fields::{Status, Team};
use crate::task::{Task, TaskId};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Three tasks spread across the medical and visual teams.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId(1),
            title: "New Campaign Email Series".into(),
            description: "Create medical content for Q1 email campaign".into(),
            team: Team::Medical,
            status: Status::Draft,
            assignee: Some("Dr. Smith".into()),
            hours_worked: 4,
            revision_count: 0,
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 10),
        },
        Task {
            id: TaskId(2),
            title: "Product Infographic".into(),
            description: "Visual assets for new product launch".into(),
            team: Team::Visual,
            status: Status::Visuals,
            assignee: Some("Jane Doe".into()),
            hours_worked: 6,
            revision_count: 1,
            created_at: date(2024, 1, 9),
            updated_at: date(2024, 1, 11),
        },
        Task {
            id: TaskId(3),
            title: "Social Media Content Pack".into(),
            description: "Weekly social media posts".into(),
            team: Team::Medical,
            status: Status::Audit,
            assignee: Some("Dr. Johnson".into()),
            hours_worked: 3,
            revision_count: 0,
            created_at: date(2024, 1, 8),
            updated_at: date(2024, 1, 12),
        },
    ]
}
