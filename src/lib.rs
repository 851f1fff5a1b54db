//! # deck-quiz
//!
//! A terminal quiz generator: pick presentation files, have a generative
//! text service write multiple-choice questions about them, then take the
//! quiz and see your score.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use deck_quiz::{Quiz, QuizError, config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = config::load_settings(None)?;
//!     let mut quiz = Quiz::from_settings(&settings)?;
//!     quiz.add_path("lecture.pptx");
//!     quiz.run().await
//! }
//! ```

mod app;
pub mod config;
pub mod error;
pub mod generator;
pub mod intake;
mod jobs;
pub mod logging;
pub mod models;
pub mod navigator;
pub mod scorer;
pub mod session;
pub mod terminal;
mod ui;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub use app::App;
pub use config::Settings;
pub use error::{ConfigError, GenerateError, QuizError, ResponseError};
pub use generator::{ClientSettings, HttpQuestionService, QuestionService};
pub use models::{AnswerMap, QuestionRecord, SessionPhase, UploadedFile};
pub use session::{Command, SessionController, SessionEvent};

use jobs::JobRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A quiz session that can be run in the terminal.
pub struct Quiz {
    app: App,
    service: Arc<dyn QuestionService>,
}

impl Quiz {
    /// Create a quiz backed by any question service.
    pub fn new(service: Arc<dyn QuestionService>) -> Self {
        Self {
            app: App::new(),
            service,
        }
    }

    /// Create a quiz talking to the configured HTTP endpoint.
    pub fn from_settings(settings: &Settings) -> Result<Self, QuizError> {
        let service =
            HttpQuestionService::new(ClientSettings::from(settings)).map_err(QuizError::Client)?;
        Ok(Self::new(Arc::new(service)))
    }

    /// Queue a presentation from disk before the UI starts.
    pub fn add_path<P: AsRef<Path>>(&mut self, path: P) {
        self.app.add_path(path);
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    /// Must be called from within a Tokio runtime.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, self.service).await;
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    service: Arc<dyn QuestionService>,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SessionEvent>();
    let mut jobs = JobRunner::new(service, tx);

    loop {
        while let Ok(settled) = rx.try_recv() {
            jobs.run(app.apply(settled));
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(POLL_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, &mut jobs, key) {
                break;
            }
        }
    }

    if jobs.is_busy() {
        debug!("abandoning in-flight generation on exit");
    }
    jobs.abort();
    info!("quiz closed");
    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, jobs: &mut JobRunner, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.phase() {
        SessionPhase::Intake => handle_intake_input(app, jobs, key.code),
        SessionPhase::Generating => handle_generating_input(app, jobs, key.code),
        SessionPhase::QuizTaking => handle_quiz_input(app, key.code),
        SessionPhase::Results => handle_result_input(app, jobs, key.code),
    }
}

fn handle_intake_input(app: &mut App, jobs: &mut JobRunner, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => return true,
        KeyCode::Enter => {
            let path = app.take_input();
            if path.is_empty() {
                jobs.run(app.apply(SessionEvent::Generate));
            } else {
                app.add_path(path);
            }
        }
        KeyCode::Backspace => app.pop_input(),
        KeyCode::Char(c) => app.push_input(c),
        KeyCode::Up => app.select_previous_file(),
        KeyCode::Down => app.select_next_file(),
        KeyCode::Delete => {
            let index = app.selected_file();
            app.apply(SessionEvent::RemoveFile(index));
        }
        _ => {}
    }
    false
}

fn handle_generating_input(app: &mut App, jobs: &mut JobRunner, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => {
            app.apply(SessionEvent::CancelGeneration);
            jobs.abort();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.highlight_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.highlight_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let option = app.highlighted_option();
            app.select_answer(option);
        }
        KeyCode::Char(c @ ('a'..='e' | 'A'..='E')) => {
            let option = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            app.select_answer(option);
        }
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.apply(SessionEvent::Finish);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, jobs: &mut JobRunner, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            jobs.abort();
            app.apply(SessionEvent::Reset);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
