//! Keyboard panel: the terminal surface the virtual keyboard mounts onto

use crate::constants::KEY_HEIGHT;
use crate::keyboard::KeySurface;
use crate::types::{KeyAction, KeyElement, KeyGrid, KeyPos};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

#[derive(Debug, Default)]
pub struct KeyboardPanel {
    grid: KeyGrid,
    area: Rect,
}

impl KeySurface for KeyboardPanel {
    fn mount(&mut self, grid: KeyGrid) {
        self.grid = grid;
    }
}

impl KeyboardPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &KeyGrid {
        &self.grid
    }

    /// Area the keys are laid out in, set by the layout before each draw
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn key_rects(&self) -> Vec<Vec<Rect>> {
        key_rects(&self.grid, self.area)
    }

    /// Key under the terminal cell at `column`, `row`
    pub fn hit_test(&self, column: u16, row: u16) -> Option<KeyPos> {
        let position = Position::new(column, row);
        self.key_rects()
            .iter()
            .enumerate()
            .find_map(|(row_idx, rects)| {
                rects
                    .iter()
                    .position(|rect| rect.contains(position))
                    .map(|col| KeyPos::new(row_idx, col))
            })
    }

    pub fn render(&self, frame: &mut Frame, pressed: Option<KeyPos>) {
        for (row_idx, (row, rects)) in self.grid.iter().zip(self.key_rects()).enumerate() {
            for (col, (key, rect)) in row.iter().zip(rects).enumerate() {
                let is_pressed = pressed == Some(KeyPos::new(row_idx, col));
                frame.render_widget(key_widget(key, is_pressed), rect);
            }
        }
    }
}

fn key_widget(key: &KeyElement, pressed: bool) -> Paragraph<'_> {
    let (text_style, border_style) = if pressed {
        (
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Cyan),
        )
    } else if key.action == KeyAction::Inert {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (Style::default().fg(Color::White), Style::default().fg(Color::Gray))
    };

    Paragraph::new(key.label.as_str())
        .style(text_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
}

/// Relative width of a key: Space is extra wide, other control keys wide
fn key_weight(key: &KeyElement) -> u16 {
    match key.action {
        KeyAction::Space => 6,
        KeyAction::Insert(_) => 1,
        _ => 2,
    }
}

/// Lay out every key of `grid` inside `area`, one row of `KEY_HEIGHT` cells
/// per grid row. Rows that do not fit are left with no rects.
pub fn key_rects(grid: &KeyGrid, area: Rect) -> Vec<Vec<Rect>> {
    let row_areas = Layout::vertical(
        grid.iter()
            .map(|_| Constraint::Length(KEY_HEIGHT))
            .chain(std::iter::once(Constraint::Min(0))),
    )
    .split(area);

    grid.iter()
        .zip(row_areas.iter())
        .map(|(row, row_area)| {
            if row_area.height < KEY_HEIGHT {
                return Vec::new();
            }
            Layout::horizontal(row.iter().map(|key| Constraint::Fill(key_weight(key))))
                .split(*row_area)
                .to_vec()
        })
        .collect()
}
