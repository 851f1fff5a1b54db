use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::scorer::{self, Score};

use super::OPTION_LABELS;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(score) = app.session().score() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], score);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: Score) {
    let percentage = score.percentage();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", score.correct, score.total, percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let questions = app.session().questions();
    let answers = app.session().answers();
    let muted = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = Vec::with_capacity(questions.len() * 2);
    for (index, question) in questions.iter().enumerate() {
        let correct = scorer::is_correct(questions, answers, index);
        let (symbol, color) = if correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {symbol} "), Style::default().fg(color)),
            Span::styled(format!("{:2}. ", index + 1), muted),
            Span::styled(truncate_question(question.question()), Style::default().fg(Color::Gray)),
        ]));

        let answer = format!(
            "answer {}. {}",
            OPTION_LABELS[question.correct()],
            question.correct_option()
        );
        let detail = match answers.get(index) {
            _ if correct => vec![Span::styled(answer, Style::default().fg(Color::Green))],
            Some(given) => vec![
                Span::styled(
                    format!("you {}. {}", OPTION_LABELS[given], question.options()[given]),
                    Style::default().fg(Color::Red),
                ),
                Span::styled("  ·  ", muted),
                Span::styled(answer, Style::default().fg(Color::Green)),
            ],
            None => vec![
                Span::styled("unanswered", muted),
                Span::styled("  ·  ", muted),
                Span::styled(answer, Style::default().fg(Color::Green)),
            ],
        };
        let mut detail_line = vec![Span::raw("       ")];
        detail_line.extend(detail);
        lines.push(Line::from(detail_line));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
