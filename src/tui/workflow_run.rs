//! Workflow TUI entry point and setup.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::board::Board;
use crate::error::AppError;
use crate::fields::TeamFilter;
use crate::tui::workflow::WorkflowApp;

/// Initialise and run the workflow terminal user interface.
/// Returns the board as the user left it.
pub fn run_workflow_tui(board: Board, team: TeamFilter) -> Result<Board, AppError> {
    enable_raw_mode().map_err(AppError::Terminal)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(AppError::Terminal(e));
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(AppError::Terminal(e));
        }
    };

    let mut app = WorkflowApp::new(board, team);
    let result = app.run(&mut terminal);

    // Restore the terminal even when the event loop failed
    let restored = restore_terminal(&mut terminal);

    result.map_err(AppError::Terminal)?;
    restored.map_err(AppError::Terminal)?;
    Ok(app.into_board())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
