use crate::view::Highlight;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar: Color,      // Base bar / unvisited node
    pub visiting: Color, // Compared, swapped, or current
    pub visited: Color,  // Sorted or already visited
    pub path: Color,     // Shortest path / search hit
    pub selected: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),
    bar: Color::Rgb(2, 132, 199),
    visiting: Color::Rgb(249, 226, 175),
    visited: Color::Rgb(6, 182, 212),
    path: Color::Rgb(166, 227, 161),
    selected: Color::Rgb(245, 194, 231),
};

impl Theme {
    pub fn highlight(&self, highlight: Highlight) -> Color {
        match highlight {
            Highlight::Unvisited => self.bar,
            Highlight::Visiting => self.visiting,
            Highlight::Visited => self.visited,
            Highlight::OnPath => self.path,
            Highlight::Selected => self.selected,
        }
    }
}
