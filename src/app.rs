use std::path::Path;

use tracing::warn;

use crate::intake::is_presentation;
use crate::models::{OPTION_COUNT, SessionPhase, UploadedFile, display_name};
use crate::session::{Command, SessionController, SessionEvent};

/// UI-facing state: the session plus whatever the screens need to draw it.
pub struct App {
    session: SessionController,
    path_input: String,
    selected_file: usize,
    highlighted_option: usize,
    result_scroll: usize,
    status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: SessionController::new(),
            path_input: String::new(),
            selected_file: 0,
            highlighted_option: 0,
            result_scroll: 0,
            status: None,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Feed an event to the session and keep the screen cursors in range.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Command> {
        let before = self.session.phase();
        let command = self.session.apply(event);
        let after = self.session.phase();

        if before != after {
            self.status = None;
            self.result_scroll = 0;
            self.highlighted_option = 0;
        }
        self.selected_file = self
            .selected_file
            .min(self.session.files().len().saturating_sub(1));
        command
    }

    /// Read a presentation from disk and hand it to the intake.
    pub fn add_path<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        let name = display_name(path);
        if !is_presentation(&name) {
            self.status = Some(format!("Skipped {name}: only .pptx and .ppt files are accepted"));
            return;
        }

        match UploadedFile::read(path) {
            Ok(file) => {
                self.apply(SessionEvent::AddFiles(vec![file]));
                self.status = Some(format!("Added {name}"));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read file");
                self.status = Some(format!("Could not read {name}: {err}"));
            }
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn push_input(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.path_input.pop();
    }

    /// Take the typed path, leaving the input empty. Shell quoting added by
    /// terminals on drag-and-drop is removed.
    pub fn take_input(&mut self) -> String {
        unquote_path(&std::mem::take(&mut self.path_input))
    }

    pub fn selected_file(&self) -> usize {
        self.selected_file
    }

    pub fn select_next_file(&mut self) {
        let count = self.session.files().len();
        if self.selected_file + 1 < count {
            self.selected_file += 1;
        }
    }

    pub fn select_previous_file(&mut self) {
        self.selected_file = self.selected_file.saturating_sub(1);
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlighted_option
    }

    pub fn highlight_next_option(&mut self) {
        self.highlighted_option = (self.highlighted_option + 1) % OPTION_COUNT;
    }

    pub fn highlight_previous_option(&mut self) {
        self.highlighted_option = (self.highlighted_option + OPTION_COUNT - 1) % OPTION_COUNT;
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        // Two breakdown lines per question.
        let max_scroll = (self.session.questions().len() * 2).saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Record `option` for the current question and keep it highlighted.
    pub fn select_answer(&mut self, option: usize) {
        self.apply(SessionEvent::SelectAnswer(option));
        if let Some(answer) = self.session.answers().get(self.session.cursor()) {
            self.highlighted_option = answer;
        }
    }

    /// Move to the next question, highlighting its answer or the first option.
    pub fn next_question(&mut self) {
        self.move_cursor(SessionEvent::Next);
    }

    pub fn previous_question(&mut self) {
        self.move_cursor(SessionEvent::Previous);
    }

    // The highlight only follows when the clamped cursor actually moved.
    fn move_cursor(&mut self, event: SessionEvent) {
        let before = self.session.cursor();
        self.apply(event);
        let after = self.session.cursor();
        if after != before {
            self.highlighted_option = self.session.answers().get(after).unwrap_or(0);
        }
    }
}

/// Strip one pair of surrounding quotes, or undo backslash-escaped spaces.
fn unquote_path(raw: &str) -> String {
    let trimmed = raw.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    trimmed.replace("\\ ", " ")
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::models::QuestionRecord;

    #[test]
    fn skips_non_presentation_paths_without_reading_them() {
        let mut app = App::new();
        app.add_path("/definitely/missing/notes.docx");

        assert!(app.session().files().is_empty());
        assert!(app.status().unwrap().starts_with("Skipped notes.docx"));
    }

    #[test]
    fn reports_unreadable_presentations() {
        let mut app = App::new();
        app.add_path("/definitely/missing/deck.pptx");

        assert!(app.session().files().is_empty());
        assert!(app.status().unwrap().starts_with("Could not read deck.pptx"));
    }

    #[test]
    fn reads_presentation_bytes_from_disk() {
        let dir = std::env::temp_dir().join(format!("deck_quiz_app_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lecture.pptx");
        fs::write(&path, b"slides").unwrap();

        let mut app = App::new();
        app.add_path(&path);

        let files = app.session().files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "lecture.pptx");
        assert_eq!(files[0].bytes, b"slides");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn file_selection_follows_removals() {
        let mut app = App::new();
        app.apply(SessionEvent::AddFiles(vec![
            UploadedFile::new("a.pptx", Vec::new()),
            UploadedFile::new("b.pptx", Vec::new()),
        ]));
        app.select_next_file();
        assert_eq!(app.selected_file(), 1);

        app.apply(SessionEvent::RemoveFile(1));
        assert_eq!(app.selected_file(), 0);
    }

    fn quiz_app(count: usize) -> App {
        let mut app = App::new();
        app.apply(SessionEvent::AddFiles(vec![UploadedFile::new("deck.pptx", vec![1])]));
        let Some(Command::Generate(job)) = app.apply(SessionEvent::Generate) else {
            panic!("expected a generation job");
        };
        let options = ["a", "b", "c", "d", "e"].map(String::from);
        let questions = (0..count)
            .map(|i| QuestionRecord::new(format!("q{i}"), options.clone(), 0).unwrap())
            .collect();
        app.apply(SessionEvent::GenerationSettled {
            ticket: job.ticket,
            result: Ok(questions),
        });
        app
    }

    #[test]
    fn highlight_stays_when_cursor_is_clamped() {
        let mut app = quiz_app(2);
        app.highlight_next_option();
        app.highlight_next_option();

        app.previous_question();
        assert_eq!(app.session().cursor(), 0);
        assert_eq!(app.highlighted_option(), 2);

        app.next_question();
        assert_eq!(app.session().cursor(), 1);
        assert_eq!(app.highlighted_option(), 0);

        app.highlight_next_option();
        app.next_question();
        assert_eq!(app.session().cursor(), 1);
        assert_eq!(app.highlighted_option(), 1);
    }

    #[test]
    fn highlight_lands_on_recorded_answer_after_moving() {
        let mut app = quiz_app(2);
        app.select_answer(3);
        assert_eq!(app.highlighted_option(), 3);

        app.next_question();
        assert_eq!(app.highlighted_option(), 0);
        app.previous_question();
        assert_eq!(app.highlighted_option(), 3);
    }

    #[test]
    fn typed_paths_lose_shell_quoting() {
        assert_eq!(unquote_path("  '/x/My Deck.pptx' "), "/x/My Deck.pptx");
        assert_eq!(unquote_path("\"/x/My Deck.pptx\""), "/x/My Deck.pptx");
        assert_eq!(unquote_path("/x/My\\ Deck.pptx"), "/x/My Deck.pptx");
        assert_eq!(unquote_path("/x/deck.pptx"), "/x/deck.pptx");
        assert_eq!(unquote_path("'"), "'");
    }

    #[test]
    fn quoted_input_is_accepted_as_presentation() {
        let dir = std::env::temp_dir().join(format!("deck_quiz_quoted_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("My Deck.pptx");
        fs::write(&path, b"slides").unwrap();

        let mut app = App::new();
        for c in format!("'{}'", path.display()).chars() {
            app.push_input(c);
        }
        let typed = app.take_input();
        app.add_path(typed);

        assert_eq!(app.session().files().len(), 1);
        assert_eq!(app.session().files()[0].name, "My Deck.pptx");
        assert_eq!(app.path_input(), "");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn option_highlight_wraps() {
        let mut app = App::new();
        app.highlight_previous_option();
        assert_eq!(app.highlighted_option(), OPTION_COUNT - 1);
        app.highlight_next_option();
        assert_eq!(app.highlighted_option(), 0);
    }
}
