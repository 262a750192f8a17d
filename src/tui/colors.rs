//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Team;

// Cards carry their team's colour on the left edge and badge

/// Used for the medical team
pub const MEDICAL_BLUE: Color = Color::Rgb(59, 130, 246);
/// Used for the visual team
pub const VISUAL_ORANGE: Color = Color::Rgb(249, 115, 22);
/// Used for the QA team
pub const QA_GREEN: Color = Color::Rgb(34, 160, 94);
/// Selection and focused form fields
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Drop target while carrying a card
pub const DROP_CYAN: Color = Color::Rgb(0, 170, 190);

pub fn team_color(team: Team) -> Color {
    match team {
        Team::Medical => MEDICAL_BLUE,
        Team::Visual => VISUAL_ORANGE,
        Team::Qa => QA_GREEN,
    }
}
