use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::OPTION_COUNT;

use super::OPTION_LABELS;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(nav) = app.session().navigator() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], nav.cursor(), nav.len(), nav.answers().len());
    render_question_text(frame, chunks[2], nav.current().question());
    render_options(
        frame,
        chunks[3],
        nav.current().options(),
        app.highlighted_option(),
        nav.current_answer(),
    );
    render_controls(frame, chunks[4], nav.cursor() == 0, nav.is_last());
}

fn render_progress(frame: &mut Frame, area: Rect, cursor: usize, total: usize, answered: usize) {
    let ratio = (cursor + 1) as f64 / total as f64;
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}/{}  ·  {} answered", cursor + 1, total, answered));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String; OPTION_COUNT],
    highlighted: usize,
    answered: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_highlighted = index == highlighted;
        let is_answer = answered == Some(index);
        let style = match (is_answer, is_highlighted) {
            (true, _) => Style::default().fg(Color::Magenta).bold(),
            (false, true) => Style::default().fg(Color::Cyan).bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_highlighted { ">" } else { " " };
        let chosen = if is_answer { "●" } else { "○" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} {chosen} "), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, is_first: bool, is_last: bool) {
    let mut parts = vec!["j/k move", "enter answer"];
    if !is_first {
        parts.push("h previous");
    }
    if !is_last {
        parts.push("l next");
    }
    parts.push("f finish");
    parts.push("q quit");

    let widget = Paragraph::new(parts.join("  ·  "))
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
