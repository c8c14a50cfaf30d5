use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_help_popup(f: &mut Frame, languages: &[&str]) {
    // Calculate popup size (60% width, 70% height)
    let popup_width = (f.area().width as f32 * 0.6) as u16;
    let popup_height = (f.area().height as f32 * 0.7) as u16;

    let popup_x = (f.area().width.saturating_sub(popup_width)) / 2;
    let popup_y = (f.area().height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    let heading = Style::default()
        .add_modifier(Modifier::BOLD)
        .fg(Color::Yellow);

    let help_text = vec![
        Line::from(vec![Span::styled("MOUSE", heading)]),
        Line::from(""),
        Line::from("  Click a key          Type it"),
        Line::from("  Hold a key           Repeat it (characters and Backspace)"),
        Line::from("  Caps Lock            Toggle upper case"),
        Line::from(""),
        Line::from(vec![Span::styled("KEYBOARD", heading)]),
        Line::from(""),
        Line::from("  Any character        Type it, cased by Caps Lock"),
        Line::from("  Backspace            Delete last character"),
        Line::from("  Caps Lock            Toggle upper case"),
        Line::from("  Shift-Alt            Next layout"),
        Line::from(""),
        Line::from(vec![Span::styled("APPLICATION", heading)]),
        Line::from(""),
        Line::from("  F1                   Toggle this help"),
        Line::from("  Esc / Ctrl-c         Quit"),
        Line::from(""),
        Line::from(format!("  Layouts: {}", languages.join(" → "))),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or F1 to close",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}
