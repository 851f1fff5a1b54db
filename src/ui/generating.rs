use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::generator::MAX_QUESTIONS;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let document = app
        .session()
        .files()
        .first()
        .map(|file| file.name.as_str())
        .unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GENERATING",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from(format!("Writing {MAX_QUESTIONS} questions from {document}...").fg(Color::Yellow)),
        Line::from(""),
        Line::from(""),
        Line::from("esc cancel".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
