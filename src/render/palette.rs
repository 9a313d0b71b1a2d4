//! Heatmap colours for grid cells

use ratatui::style::Color;

/// Level 0: nothing left to eat
pub const EMPTY: Color = Color::Rgb(0xeb, 0xed, 0xf0);
/// Any cell under the snake
pub const SNAKE: Color = Color::Rgb(0xff, 0xff, 0xff);

/// Colour tier for a contribution level; anything outside 1..=4 is empty
pub fn contribution_color(level: u8) -> Color {
    match level {
        4 => Color::Rgb(0x21, 0x6e, 0x39),
        3 => Color::Rgb(0x30, 0xa1, 0x4e),
        2 => Color::Rgb(0x40, 0xc4, 0x63),
        1 => Color::Rgb(0x9b, 0xe9, 0xa8),
        _ => EMPTY,
    }
}

/// Colour of a cell, with the snake drawn over the heatmap
pub fn cell_color(level: u8, occupied_by_snake: bool) -> Color {
    if occupied_by_snake {
        SNAKE
    } else {
        contribution_color(level)
    }
}
