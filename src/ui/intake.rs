use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::generator::MAX_QUESTIONS;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_file_list(frame, chunks[1], app);
    render_path_input(frame, chunks[2], app.path_input());
    render_notice(frame, chunks[3], app);
    render_controls(frame, chunks[4], !app.session().files().is_empty());
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "DECK QUIZ",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from("Turn a presentation into a multiple-choice quiz".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_file_list(frame: &mut Frame, area: Rect, app: &App) {
    let files = app.session().files();
    let lines: Vec<Line> = if files.is_empty() {
        vec![Line::from("No presentations yet. Type a .pptx or .ppt path below.".fg(Color::DarkGray))]
    } else {
        files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let is_selected = index == app.selected_file();
                let style = if is_selected {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_selected { ">" } else { " " };

                Line::from(vec![
                    Span::styled(format!(" {marker} "), style),
                    Span::styled(file.name.as_str(), style),
                    Span::styled(format!("  {}", human_size(file.size())), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(format!(" Files ({}) ", files.len()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_path_input(frame: &mut Frame, area: Rect, input: &str) {
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(input, Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Add file ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    let line = match (app.session().notice(), app.status()) {
        (Some(notice), _) => Line::from(notice.fg(Color::Red).bold()),
        (None, Some(status)) => Line::from(status.fg(Color::Yellow)),
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_controls(frame: &mut Frame, area: Rect, has_files: bool) {
    let text = if has_files {
        format!("enter add / generate {MAX_QUESTIONS} questions  ·  ↑/↓ select  ·  del remove  ·  esc quit")
    } else {
        "enter add file  ·  esc quit".to_string()
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn human_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < KIB * KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{:.1} MiB", bytes / (KIB * KIB))
    }
}
