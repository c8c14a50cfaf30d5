use crate::app::AppState;
use crate::constants::{INPUT_FIELD_HEIGHT, KEY_HEIGHT};
use crate::types::UiMode;
use crate::ui::widgets::popups::help::render_help_popup;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

const CURSOR_MARK: char = '▏';

pub fn render(f: &mut Frame, app: &mut AppState) {
    let panel_height = keyboard_height(app.keyboard.surface().grid().len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Titlebar
            Constraint::Min(INPUT_FIELD_HEIGHT),    // Input field
            Constraint::Length(panel_height),       // Keyboard
            Constraint::Length(1),                  // Statusbar
        ])
        .split(f.area());

    render_titlebar(f, app, chunks[0]);
    render_input_field(f, app, chunks[1]);
    render_keyboard(f, app, chunks[2]);
    render_statusbar(f, app, chunks[3]);

    if app.ui_mode == UiMode::Help {
        let languages: Vec<&str> = app.keyboard.table().languages().collect();
        render_help_popup(f, &languages);
    }
}

fn render_titlebar(f: &mut Frame, app: &AppState, area: Rect) {
    let title_text = format!(
        "Virtual Keyboard - {} {}",
        app.keyboard.language().to_uppercase(),
        if app.keyboard.caps_lock() { "[CAPS]" } else { "" }
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn render_input_field(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .title(" Input ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    let mut text = app.text().to_string();
    text.push(CURSOR_MARK);

    // Keep the last rows visible once the text outgrows the field
    let mut rows = wrap_rows(&text, inner.width as usize);
    let visible = inner.height as usize;
    if rows.len() > visible {
        rows.drain(..rows.len() - visible);
    }

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
    for mut row in rows {
        if row.ends_with(CURSOR_MARK) {
            row.pop();
            let mut line = Line::from(row);
            line.push_span(Span::styled(
                CURSOR_MARK.to_string(),
                Style::default().fg(Color::Yellow),
            ));
            lines.push(line);
        } else {
            lines.push(Line::from(row));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Height of the bordered keyboard panel for `rows` rows of keys
fn keyboard_height(rows: usize) -> u16 {
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_mul(KEY_HEIGHT)
        .saturating_add(2)
}

/// Split `text` into display rows no wider than `width` cells. Newlines
/// always start a new row; long lines break at the character that would
/// overflow.
fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(c);
            used += w;
        }
        rows.push(row);
    }

    rows
}

fn render_keyboard(f: &mut Frame, app: &mut AppState, area: Rect) {
    let block = Block::default()
        .title(format!(" Keyboard [{}] ", app.keyboard.language()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let pressed = app.keyboard.pressed();
    let panel = app.keyboard.surface_mut();
    panel.set_area(inner);
    panel.render(f, pressed);
}

fn render_statusbar(f: &mut Frame, app: &AppState, area: Rect) {
    let status_text = format!(
        "{} chars | Layout {} | Caps {} | F1 help | Esc quit",
        app.text().chars().count(),
        app.keyboard.language(),
        if app.keyboard.caps_lock() { "on" } else { "off" },
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    f.render_widget(status, area);
}
