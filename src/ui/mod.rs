mod generating;
mod intake;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::SessionPhase;

/// Option labels shown in front of the five choices.
pub(crate) const OPTION_LABELS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        SessionPhase::Intake => intake::render(frame, area, app),
        SessionPhase::Generating => generating::render(frame, area, app),
        SessionPhase::QuizTaking => quiz::render(frame, area, app),
        SessionPhase::Results => result::render(frame, area, app),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::models::{QuestionRecord, UploadedFile};
    use crate::session::{Command, SessionEvent};

    fn finished_app(correct: usize, given: Option<usize>) -> App {
        let options = ["AlphaOpt", "BravoOpt", "CharlieOpt", "DeltaOpt", "EchoOpt"].map(String::from);
        let question = QuestionRecord::new("What is right?".into(), options, correct).unwrap();

        let mut app = App::new();
        app.apply(SessionEvent::AddFiles(vec![UploadedFile::new("deck.pptx", vec![1])]));
        let Some(Command::Generate(job)) = app.apply(SessionEvent::Generate) else {
            panic!("expected a generation job");
        };
        app.apply(SessionEvent::GenerationSettled {
            ticket: job.ticket,
            result: Ok(vec![question]),
        });
        if let Some(option) = given {
            app.apply(SessionEvent::SelectAnswer(option));
        }
        app.apply(SessionEvent::Finish);
        app
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn results_show_chosen_and_correct_option_text() {
        let text = screen_text(&finished_app(3, Some(1)));

        assert!(text.contains("0 / 1"));
        assert!(text.contains("you B. BravoOpt"));
        assert!(text.contains("answer D. DeltaOpt"));
    }

    #[test]
    fn results_show_correct_option_for_unanswered_question() {
        let text = screen_text(&finished_app(4, None));

        assert!(text.contains("unanswered"));
        assert!(text.contains("answer E. EchoOpt"));
    }

    #[test]
    fn results_show_answer_text_for_correct_question() {
        let text = screen_text(&finished_app(0, Some(0)));

        assert!(text.contains("1 / 1"));
        assert!(text.contains("answer A. AlphaOpt"));
        assert!(!text.contains("you A."));
    }
}
