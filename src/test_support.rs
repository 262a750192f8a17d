//! Shared fixtures for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::fields::{Status, Team};
use crate::task::{Task, TaskId};

/// Clock pinned to 2024-01-01T00:00:00Z that only moves when told to.
#[derive(Debug)]
pub struct StepClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for StepClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }
}

impl StepClock {
    pub fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now()
    }
}

/// Task with zeroed counters, created and updated at the clock epoch.
pub fn sample_task(id: u64, team: Team, status: Status) -> Task {
    let at = StepClock::default().now();
    Task {
        id: TaskId(id),
        title: format!("Task {id}"),
        description: String::new(),
        team,
        status,
        assignee: None,
        hours_worked: 0,
        revision_count: 0,
        created_at: at,
        updated_at: at,
    }
}
