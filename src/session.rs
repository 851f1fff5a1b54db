//! Session controller: the four-phase state machine tying intake,
//! generation, navigation and scoring together.
//!
//! Every transition goes through [`SessionController::apply`]. Work that
//! has to happen outside the state machine, such as the network call, is
//! handed back to the caller as a [`Command`].

use std::mem;

use tracing::{debug, error, info, warn};

use crate::error::GenerateError;
use crate::intake::FileIntake;
use crate::models::{AnswerMap, QuestionRecord, SessionPhase, UploadedFile};
use crate::navigator::QuizNavigator;
use crate::scorer::Score;

/// Shown to the user whenever a generation attempt fails.
pub const GENERATION_FAILED_NOTICE: &str =
    "Something went wrong while generating questions. Please try again.";

const GENERATION_CANCELLED_NOTICE: &str = "Question generation cancelled.";

static NO_ANSWERS: AnswerMap = AnswerMap::new();

/// Inputs driving the session forward.
#[derive(Debug)]
pub enum SessionEvent {
    /// Files picked by the user, filtered at the intake boundary.
    AddFiles(Vec<UploadedFile>),
    /// Remove the file at the given list position.
    RemoveFile(usize),
    /// Ask for a question set built from the current files.
    Generate,
    /// The outcome of the generation job carrying `ticket`.
    GenerationSettled {
        ticket: u64,
        result: Result<Vec<QuestionRecord>, GenerateError>,
    },
    /// Abandon the in-flight generation job.
    CancelGeneration,
    /// Record an option for the question under the cursor.
    SelectAnswer(usize),
    Next,
    Previous,
    /// Stop answering and show the score.
    Finish,
    /// Wipe everything and start over.
    Reset,
}

/// A generation request the caller must run and settle.
#[derive(Debug)]
pub struct GenerationJob {
    pub ticket: u64,
    /// Only the first intake file is sent.
    pub document: UploadedFile,
}

/// Side effects requested by a transition.
#[derive(Debug)]
pub enum Command {
    Generate(GenerationJob),
}

#[derive(Debug, Default)]
enum Stage {
    #[default]
    Intake,
    Generating {
        ticket: u64,
    },
    QuizTaking(QuizNavigator),
    Results(QuizNavigator),
}

/// Owns all session state. Exactly one phase is active at a time.
#[derive(Debug, Default)]
pub struct SessionController {
    intake: FileIntake,
    stage: Stage,
    last_ticket: u64,
    notice: Option<String>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::Intake => SessionPhase::Intake,
            Stage::Generating { .. } => SessionPhase::Generating,
            Stage::QuizTaking(_) => SessionPhase::QuizTaking,
            Stage::Results(_) => SessionPhase::Results,
        }
    }

    pub fn files(&self) -> &[UploadedFile] {
        self.intake.files()
    }

    /// Question set of the current quiz, empty before generation succeeds.
    pub fn questions(&self) -> &[QuestionRecord] {
        self.navigator()
            .map(QuizNavigator::questions)
            .unwrap_or_default()
    }

    pub fn answers(&self) -> &AnswerMap {
        self.navigator().map_or(&NO_ANSWERS, QuizNavigator::answers)
    }

    pub fn cursor(&self) -> usize {
        self.navigator().map_or(0, QuizNavigator::cursor)
    }

    pub fn navigator(&self) -> Option<&QuizNavigator> {
        match &self.stage {
            Stage::QuizTaking(nav) | Stage::Results(nav) => Some(nav),
            _ => None,
        }
    }

    /// Final score, available once the quiz is finished.
    pub fn score(&self) -> Option<Score> {
        match &self.stage {
            Stage::Results(nav) => Some(nav.score()),
            _ => None,
        }
    }

    /// User-facing message left by the last failed or cancelled generation.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Ticket of the in-flight generation job, if any.
    pub fn pending_ticket(&self) -> Option<u64> {
        match self.stage {
            Stage::Generating { ticket } => Some(ticket),
            _ => None,
        }
    }

    /// Apply one event. Events that make no sense in the current phase are ignored.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Command> {
        let before = self.phase();
        let command = self.dispatch(event);
        let after = self.phase();
        if before != after {
            info!(from = before.label(), to = after.label(), "session phase changed");
        }
        command
    }

    fn dispatch(&mut self, event: SessionEvent) -> Option<Command> {
        match event {
            SessionEvent::AddFiles(files) => {
                if matches!(self.stage, Stage::Intake) {
                    self.notice = None;
                    let accepted = self.intake.add(files);
                    debug!(accepted, total = self.intake.len(), "files added");
                }
                None
            }
            SessionEvent::RemoveFile(index) => {
                if matches!(self.stage, Stage::Intake) {
                    self.notice = None;
                    if self.intake.remove(index).is_none() {
                        debug!(index, "ignoring removal of missing file");
                    }
                }
                None
            }
            SessionEvent::Generate => self.begin_generation(),
            SessionEvent::GenerationSettled { ticket, result } => {
                self.settle_generation(ticket, result);
                None
            }
            SessionEvent::CancelGeneration => {
                if let Stage::Generating { ticket } = self.stage {
                    info!(ticket, "generation cancelled");
                    self.stage = Stage::Intake;
                    self.notice = Some(GENERATION_CANCELLED_NOTICE.to_string());
                }
                None
            }
            SessionEvent::SelectAnswer(option) => {
                if let Stage::QuizTaking(nav) = &mut self.stage {
                    nav.select_answer(option);
                }
                None
            }
            SessionEvent::Next => {
                if let Stage::QuizTaking(nav) = &mut self.stage {
                    nav.next();
                }
                None
            }
            SessionEvent::Previous => {
                if let Stage::QuizTaking(nav) = &mut self.stage {
                    nav.previous();
                }
                None
            }
            SessionEvent::Finish => {
                self.stage = match mem::take(&mut self.stage) {
                    Stage::QuizTaking(nav) => {
                        let score = nav.score();
                        info!(
                            correct = score.correct,
                            total = score.total,
                            answered = nav.answers().len(),
                            "quiz finished"
                        );
                        Stage::Results(nav)
                    }
                    other => other,
                };
                None
            }
            SessionEvent::Reset => {
                self.intake.clear();
                self.stage = Stage::Intake;
                self.notice = None;
                None
            }
        }
    }

    fn begin_generation(&mut self) -> Option<Command> {
        match self.stage {
            Stage::Intake => {}
            Stage::Generating { ticket } => {
                debug!(ticket, "generation already in flight");
                return None;
            }
            _ => return None,
        }

        let Some(document) = self.intake.first().cloned() else {
            debug!("generation refused: no files selected");
            return None;
        };
        if self.intake.len() > 1 {
            warn!(
                files = self.intake.len(),
                sent = %document.name,
                "only the first file is sent for generation"
            );
        }

        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.stage = Stage::Generating { ticket };
        self.notice = None;
        Some(Command::Generate(GenerationJob { ticket, document }))
    }

    fn settle_generation(
        &mut self,
        ticket: u64,
        result: Result<Vec<QuestionRecord>, GenerateError>,
    ) {
        if self.pending_ticket() != Some(ticket) {
            debug!(ticket, "discarding result of abandoned generation");
            return;
        }

        match result.map(QuizNavigator::new) {
            Ok(Some(nav)) => {
                info!(ticket, questions = nav.len(), "generation succeeded");
                self.stage = Stage::QuizTaking(nav);
            }
            Ok(None) => {
                error!(ticket, "generation returned an empty question set");
                self.fail_generation();
            }
            Err(err) => {
                error!(ticket, error = %err, "generation failed");
                self.fail_generation();
            }
        }
    }

    fn fail_generation(&mut self) {
        self.stage = Stage::Intake;
        self.notice = Some(GENERATION_FAILED_NOTICE.to_string());
    }
}
