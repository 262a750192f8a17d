//! Create-task form for the terminal user interface.
//!
//! This module provides the `TaskForm` structure: three text fields and a
//! team selector, in the order the form renders them.

use crate::{
    fields::{Team, TeamFilter},
    task::NewTask,
    tui::input::InputField,
};

/// Global order constants for form fields.
pub const TITLE_GLOBAL_ORDER: usize = 0;
pub const DESCRIPTION_GLOBAL_ORDER: usize = 1;
pub const TEAM_SELECTOR_GLOBAL_ORDER: usize = 2;
pub const ASSIGNEE_GLOBAL_ORDER: usize = 3;

const FIELD_COUNT: usize = 4;

/// Form for creating a task
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub assignee: InputField,
    pub team: usize,
    pub current_field: usize,
}

impl TaskForm {
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            assignee: InputField::new(),
            team: 0, // Medical
            current_field: TITLE_GLOBAL_ORDER,
        };
        form.update_active_field();
        form
    }

    /// New form whose team selector follows the board's team filter.
    pub fn new_with_filter(filter: TeamFilter) -> Self {
        let mut form = Self::new();
        let preselect = match filter {
            TeamFilter::All | TeamFilter::Medical => Team::Medical,
            TeamFilter::Visual => Team::Visual,
            TeamFilter::Qa => Team::Qa,
        };
        form.team = Team::ALL.iter().position(|&t| t == preselect).unwrap_or(0);
        form
    }

    pub fn selected_team(&self) -> Team {
        Team::ALL.get(self.team).copied().unwrap_or(Team::Medical)
    }

    fn focused_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_GLOBAL_ORDER => Some(&mut self.title),
            DESCRIPTION_GLOBAL_ORDER => Some(&mut self.description),
            ASSIGNEE_GLOBAL_ORDER => Some(&mut self.assignee),
            _ => None,
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_GLOBAL_ORDER;
        self.description.active = self.current_field == DESCRIPTION_GLOBAL_ORDER;
        self.assignee.active = self.current_field == ASSIGNEE_GLOBAL_ORDER;
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.focused_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.focused_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.focused_input() {
            field.handle_delete();
        }
    }

    /// Left/right move the cursor in text fields and cycle the team selector.
    pub fn handle_left_right(&mut self, right: bool) {
        if self.current_field == TEAM_SELECTOR_GLOBAL_ORDER {
            let len = Team::ALL.len();
            self.team = if right { (self.team + 1) % len } else { (self.team + len - 1) % len };
            return;
        }
        if let Some(field) = self.focused_input() {
            if right {
                field.move_cursor_right();
            } else {
                field.move_cursor_left();
            }
        }
    }

    /// Build the creation request. The board decides whether the title is acceptable.
    pub fn to_new_task(&self) -> NewTask {
        let mut new_task = NewTask::new(self.title.value.clone(), self.selected_team())
            .with_description(self.description.value.clone());
        if !self.assignee.value.trim().is_empty() {
            new_task = new_task.with_assignee(self.assignee.value.trim());
        }
        new_task
    }
}
