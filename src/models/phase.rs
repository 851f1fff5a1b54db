/// The four mutually exclusive phases of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Collecting presentation files.
    #[default]
    Intake,
    /// Waiting for the generative service to answer.
    Generating,
    /// Walking through the generated questions.
    QuizTaking,
    /// Showing the score for a finished quiz.
    Results,
}

impl SessionPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Generating => "generating",
            Self::QuizTaking => "quiz",
            Self::Results => "results",
        }
    }
}
