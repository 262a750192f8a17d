//! Workflow Kanban board interface.
//!
//! This module implements the board view: a metrics header above four stage
//! columns. Cards move one stage at a time with the advance/revert keys, or
//! are picked up and dropped anywhere (the keyboard stand-in for
//! drag-and-drop). Every change is sent to the `Board` as an intent; the app
//! never edits task fields itself.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mockable::{Clock, DefaultClock};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::{Board, Intent};
use crate::fields::*;
use crate::task::{Task, TaskId};
use crate::tui::{
    colors::{team_color, DROP_CYAN, GOLD},
    enums::{AppState, Carry},
    task_form::*,
};

const COLUMN_COUNT: usize = Status::ORDER.len();
const CARD_HEIGHT: usize = 5;

/// Main workflow application state
pub struct WorkflowApp<C: Clock = DefaultClock> {
    board: Board<C>,
    filter: TeamFilter,
    state: AppState,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; COLUMN_COUNT],
    status_message: String,
    carry: Option<Carry>,
    task_form: TaskForm,

    // Visible task ids per stage, in board order
    columns: [Vec<TaskId>; COLUMN_COUNT],
}

impl<C: Clock> WorkflowApp<C> {
    pub fn new(board: Board<C>, filter: TeamFilter) -> Self {
        let mut app = WorkflowApp {
            board,
            filter,
            state: AppState::Board,
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; COLUMN_COUNT],
            status_message: String::new(),
            carry: None,
            task_form: TaskForm::new_with_filter(filter),
            columns: Default::default(),
        };
        app.update_columns();
        app
    }

    pub fn board(&self) -> &Board<C> {
        &self.board
    }

    /// Hand the board back once the UI closes.
    pub fn into_board(self) -> Board<C> {
        self.board
    }

    /// Rebuild the visible columns from the board and the team filter.
    fn update_columns(&mut self) {
        for (status, column) in Status::ORDER.iter().zip(self.columns.iter_mut()) {
            *column = self
                .board
                .column(*status, self.filter)
                .iter()
                .map(|t| t.id)
                .collect();
        }
        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= COLUMN_COUNT {
            self.selected_column = 0;
        }

        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.columns[self.selected_column].get(self.selected_card).copied()
    }

    /// Move the selection onto a task, wherever it now sits.
    fn select_task(&mut self, id: TaskId) {
        for (column_index, column) in self.columns.iter().enumerate() {
            if let Some(card_index) = column.iter().position(|&t| t == id) {
                self.selected_column = column_index;
                self.selected_card = card_index;
                return;
            }
        }
        self.clamp_selection();
    }

    /// Send an intent to the board and report the outcome in the status bar.
    fn dispatch(&mut self, intent: Intent) -> bool {
        let verb = match &intent {
            Intent::Create(_) => "Created",
            Intent::Advance { .. } => "Moved",
            Intent::Revert { .. } => "Sent back",
            Intent::Relocate { .. } => "Placed",
        };
        match self.board.apply(intent) {
            Ok(id) => {
                self.update_columns();
                self.select_task(id);
                let stage = self.board.get(id).map_or("-", |t| t.status.label());
                self.set_status_message(format!("{verb} {id} in {stage}"));
                true
            }
            Err(reason) => {
                self.set_status_message(format!("No change: {reason}"));
                false
            }
        }
    }

    fn advance_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Intent::Advance { id });
        }
    }

    fn revert_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Intent::Revert { id });
        }
    }

    fn cycle_filter(&mut self) {
        let keep = self.selected_task_id();
        self.filter = self.filter.cycle();
        self.update_columns();
        if let Some(id) = keep {
            self.select_task(id);
        }
        self.set_status_message(format!("Showing {}", self.filter.label()));
    }

    /// Visible cards of a column other than the carried one.
    fn drop_slots(&self, column: usize, carried: TaskId) -> Vec<TaskId> {
        self.columns[column].iter().copied().filter(|&id| id != carried).collect()
    }

    fn pick_up(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let origin = Status::ORDER[self.selected_column];
        self.carry = Some(Carry {
            task_id,
            origin,
            column: self.selected_column,
            slot: self.selected_card,
        });
        self.set_status_message(format!(
            "Carrying {task_id}: arrows choose a spot, Space drops, Esc cancels"
        ));
    }

    fn move_carry(&mut self, column_step: isize, slot_step: isize) {
        let Some(mut carry) = self.carry else {
            return;
        };
        carry.column = carry
            .column
            .saturating_add_signed(column_step)
            .min(COLUMN_COUNT - 1);
        let len = self.drop_slots(carry.column, carry.task_id).len();
        carry.slot = carry.slot.saturating_add_signed(slot_step).min(len);
        self.carry = Some(carry);
    }

    /// Position in the full, unfiltered target column that matches the
    /// carry's visible slot.
    fn drop_index(&self, carry: &Carry) -> usize {
        let status = Status::ORDER[carry.column];
        let full: Vec<TaskId> = self
            .board
            .column(status, TeamFilter::All)
            .iter()
            .map(|t| t.id)
            .filter(|&id| id != carry.task_id)
            .collect();
        let visible = self.drop_slots(carry.column, carry.task_id);
        let position_of = |id: &TaskId| full.iter().position(|t| t == id);

        match visible.get(carry.slot) {
            Some(id) => position_of(id).unwrap_or(full.len()),
            None => visible
                .last()
                .and_then(position_of)
                .map_or(full.len(), |p| p + 1),
        }
    }

    fn drop_carry(&mut self) {
        if let Some(carry) = self.carry.take() {
            let index = self.drop_index(&carry);
            self.dispatch(Intent::Relocate {
                id: carry.task_id,
                status: Status::ORDER[carry.column],
                index,
            });
        }
    }

    fn cancel_carry(&mut self) {
        if let Some(carry) = self.carry.take() {
            self.select_task(carry.task_id);
            self.set_status_message(format!(
                "Move cancelled, {} stays in {}",
                carry.task_id,
                carry.origin.label()
            ));
        }
    }

    fn open_form(&mut self) {
        self.task_form = TaskForm::new_with_filter(self.filter);
        self.state = AppState::AddTask;
        self.clear_status_message();
    }

    fn submit_form(&mut self) {
        let request = self.task_form.to_new_task();
        if self.dispatch(Intent::Create(request)) {
            self.state = AppState::Board;
        }
    }

    /// Set a status message
    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Clear the status message
    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Handle one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.state {
            AppState::AddTask => self.handle_form_key(key),
            AppState::TaskDetail => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.state = AppState::Board;
                }
            }
            AppState::Help => self.state = AppState::Board,
            AppState::Board if self.carry.is_some() => self.handle_carry_key(key),
            AppState::Board => return self.handle_board_key(key),
        }
        false
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        self.clear_status_message();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,

            // Stage moves (check first, before regular navigation)
            KeyCode::Right if ctrl => self.advance_selected(),
            KeyCode::Left if ctrl => self.revert_selected(),
            KeyCode::Char(']') => self.advance_selected(),
            KeyCode::Char('[') => self.revert_selected(),

            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLUMN_COUNT - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let column_len = self.columns[self.selected_column].len();
                if self.selected_card + 1 < column_len {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char(' ') => self.pick_up(),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('n') => self.open_form(),
            KeyCode::Enter => {
                if self.selected_task_id().is_some() {
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_carry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.move_carry(-1, 0),
            KeyCode::Right => self.move_carry(1, 0),
            KeyCode::Up => self.move_carry(0, -1),
            KeyCode::Down => self.move_carry(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.drop_carry(),
            KeyCode::Esc => self.cancel_carry(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Board;
                self.set_status_message("Create cancelled".to_string());
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    /// Render the workflow kanban board
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Metrics
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_metrics(f, chunks[1]);
        self.render_board(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);

        match self.state {
            AppState::TaskDetail => self.render_task_detail_popup(f),
            AppState::AddTask => self.render_task_form(f),
            AppState::Help => self.render_help(f),
            AppState::Board => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header_text = vec![Line::from(vec![
            Span::styled("CONTENT WORKFLOW", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Team: {}  Tasks: {}", self.filter.label(), self.board.tasks().len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    /// Metric cards always describe the whole board, whatever the filter.
    fn render_metrics(&self, f: &mut Frame, area: Rect) {
        let cards = self.board.metrics().cards();
        let constraints: Vec<Constraint> = cards
            .iter()
            .map(|_| Constraint::Ratio(1, cards.len() as u32))
            .collect();
        let boxes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (card, &card_area) in cards.iter().zip(boxes.iter()) {
            let widget = Paragraph::new(Line::from(Span::styled(
                card.value.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .block(Block::default().borders(Borders::ALL).title(card.label))
            .alignment(Alignment::Center);
            f.render_widget(widget, card_area);
        }
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, COLUMN_COUNT as u32); COLUMN_COUNT])
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    /// Render a single column
    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize) {
        let status = Status::ORDER[column_index];
        let is_selected = column_index == self.selected_column;
        let carry = self.carry.filter(|c| c.column == column_index);

        let border_style = if carry.is_some() {
            Style::default().fg(DROP_CYAN).add_modifier(Modifier::BOLD)
        } else if is_selected && self.carry.is_none() {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", status.label(), self.columns[column_index].len()))
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        // While carrying, the carried card leaves its column and a drop marker
        // takes a slot in the target column.
        let cards: Vec<TaskId> = match self.carry {
            Some(c) => self.drop_slots(column_index, c.task_id),
            None => self.columns[column_index].clone(),
        };
        if cards.is_empty() && carry.is_none() {
            let empty = Paragraph::new("No tasks")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = (available_height / CARD_HEIGHT).max(1);
        let focus = match carry {
            Some(c) => Some(c.slot),
            None if is_selected => Some(self.selected_card),
            None => None,
        };

        // Keep the focused card (or drop slot) on screen
        let mut scroll_offset = self.column_scroll_offsets[column_index];
        if let Some(focus) = focus {
            if focus < scroll_offset {
                scroll_offset = focus;
            } else if focus >= scroll_offset + visible_cards {
                scroll_offset = focus + 1 - visible_cards;
            }
        }
        scroll_offset = scroll_offset.min(cards.len().saturating_sub(1));
        self.column_scroll_offsets[column_index] = scroll_offset;

        let mut current_y = 0;
        let mut rendered = 0;
        for (card_index, &task_id) in cards.iter().enumerate().skip(scroll_offset) {
            if let Some(c) = carry {
                if c.slot == card_index && current_y < available_height {
                    self.render_drop_marker(f, inner, current_y);
                    current_y += 1;
                }
            }
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            if let Some(task) = self.board.get(task_id) {
                let card_area = Rect {
                    x: inner.x,
                    y: inner.y + current_y as u16,
                    width: inner.width,
                    height: CARD_HEIGHT as u16,
                };
                let highlighted = carry.is_none() && is_selected && card_index == self.selected_card;
                render_card(f, card_area, task, highlighted);
                current_y += CARD_HEIGHT;
                rendered += 1;
            }
        }
        if let Some(c) = carry {
            if c.slot >= cards.len() && current_y < available_height {
                self.render_drop_marker(f, inner, current_y);
            }
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{scroll_offset} above"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = cards.len().saturating_sub(scroll_offset + rendered);
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{remaining} below"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn render_drop_marker(&self, f: &mut Frame, inner: Rect, y: usize) {
        let label = match self.carry {
            Some(c) => format!("▶ drop {} here", c.task_id),
            None => return,
        };
        let marker = Paragraph::new(label)
            .style(Style::default().fg(Color::Black).bg(DROP_CYAN).add_modifier(Modifier::BOLD));
        f.render_widget(
            marker,
            Rect {
                y: inner.y + y as u16,
                height: 1,
                ..inner
            },
        );
    }

    /// Render the status bar
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::AddTask => "Tab: Next field | ←/→: Team | Enter: Create | Esc: Cancel".to_string(),
                AppState::TaskDetail => "Task Details | Enter/Esc: Close".to_string(),
                AppState::Help => "Help | any key: Close".to_string(),
                AppState::Board => format!(
                    "Team: {} | ]: Advance | [: Back | Space: Pick up | n: New | f: Filter | h: Help | q: Quit",
                    self.filter.label()
                ),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(GOLD).fg(Color::Rgb(20, 20, 20)))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Render the task detail popup
    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task_id().and_then(|id| self.board.get(id)) else {
            return;
        };

        let popup_area = centered_rect(f.area(), 70, 70);
        f.render_widget(Clear, popup_area);

        let detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("Task {}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Team:        {}", task.team.display_name())),
            Line::from(format!("Stage:       {}", task.status.label())),
            Line::from(format!("Next:        {}", next_step_caption(task))),
            Line::from(format!("Assignee:    {}", task.assignee.as_deref().unwrap_or("-"))),
            Line::from(format!("Hours:       {}", task.hours_worked)),
            Line::from(format!("Revisions:   {}", task.revision_count)),
            Line::from(format!("Created:     {}", task.created_at.format("%Y-%m-%d %H:%M"))),
            Line::from(format!("Updated:     {}", task.updated_at.format("%Y-%m-%d %H:%M"))),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-".to_string() } else { task.description.clone() }),
        ];

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(team_color(task.team)).add_modifier(Modifier::BOLD));

        let popup_paragraph = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));

        f.render_widget(popup_paragraph, popup_area);
    }

    fn render_task_form(&self, f: &mut Frame) {
        let popup_area = centered_rect(f.area(), 60, 60);
        f.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title("Create New Task")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));
        let inner = outer.inner(popup_area);
        f.render_widget(outer, popup_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Description
                Constraint::Length(3), // Team
                Constraint::Length(3), // Assignee
                Constraint::Min(0),
            ])
            .split(inner);

        let form = &self.task_form;
        let focused = |order: usize| {
            if form.current_field == order {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };
        let text = |field: &crate::tui::input::InputField| {
            if field.active {
                field.display_with_cursor()
            } else {
                field.value.clone()
            }
        };

        let title = Paragraph::new(text(&form.title)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title *")
                .border_style(focused(TITLE_GLOBAL_ORDER)),
        );
        f.render_widget(title, rows[0]);

        let description = Paragraph::new(text(&form.description))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Description")
                    .border_style(focused(DESCRIPTION_GLOBAL_ORDER)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(description, rows[1]);

        let team = form.selected_team();
        let team_selector = Paragraph::new(Line::from(vec![
            Span::raw("< "),
            Span::styled(team.display_name(), Style::default().fg(team_color(team))),
            Span::raw(format!(" >  starts in {}", team.entry_stage().label())),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Team")
                .border_style(focused(TEAM_SELECTOR_GLOBAL_ORDER)),
        );
        f.render_widget(team_selector, rows[2]);

        let assignee = Paragraph::new(text(&form.assignee)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Assignee (optional)")
                .border_style(focused(ASSIGNEE_GLOBAL_ORDER)),
        );
        f.render_widget(assignee, rows[3]);
    }

    fn render_help(&self, f: &mut Frame) {
        let popup_area = centered_rect(f.area(), 60, 60);
        f.render_widget(Clear, popup_area);

        let help = vec![
            Line::from(Span::styled("Board", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("←/→ ↑/↓        Select column / card"),
            Line::from("] or Ctrl+→    Advance one stage (+1 hour)"),
            Line::from("[ or Ctrl+←    Send back one stage (+1 revision)"),
            Line::from("Space          Pick up card; arrows choose a spot; Space drops"),
            Line::from("Esc            Cancel a pick-up"),
            Line::from("f              Cycle team filter (metrics always cover every team)"),
            Line::from("n              New task"),
            Line::from("Enter          Task details"),
            Line::from("q / Esc        Quit"),
        ];
        let widget = Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().bg(Color::Black));
        f.render_widget(widget, popup_area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Caption for the card's next step, or "Published" once approved.
fn next_step_caption(task: &Task) -> String {
    match task.status {
        Status::Approved => "✔ Published".to_string(),
        status => format!("{} →", status.forward_action()),
    }
}

/// Render a single task card
fn render_card(f: &mut Frame, area: Rect, task: &Task, is_selected: bool) {
    let accent = team_color(task.team);
    let style = if is_selected {
        Style::default().bg(GOLD).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut meta = vec![Span::styled(
        task.team.label().to_uppercase(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(assignee) = &task.assignee {
        meta.push(Span::raw(format!(" · {assignee}")));
    }
    if task.hours_worked > 0 {
        meta.push(Span::raw(format!(" · {}h", task.hours_worked)));
    }
    if task.revision_count > 0 {
        meta.push(Span::raw(format!(" · {} rev", task.revision_count)));
    }

    let actions = match task.status.prev() {
        Some(_) => format!("← Back | {}", next_step_caption(task)),
        None => next_step_caption(task),
    };

    let card_text = vec![
        Line::from(format!("{} {}", task.id, task.title)),
        Line::from(meta),
        Line::from(actions),
    ];

    let card_block = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(accent)))
        .style(style);

    f.render_widget(card_block, area);
}

/// Rectangle of the given percentage size centred in `area`.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
