/// Number of options every generated question carries.
pub const OPTION_COUNT: usize = 5;

/// One generated multiple-choice question.
///
/// Fields are private so a record can only come out of the generator's
/// validation step; `correct` is always a valid index into `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    question: String,
    options: [String; OPTION_COUNT],
    correct: usize,
}

impl QuestionRecord {
    /// Build a record, returning `None` when `correct` is out of range.
    pub fn new(question: String, options: [String; OPTION_COUNT], correct: usize) -> Option<Self> {
        (correct < OPTION_COUNT).then_some(Self {
            question,
            options,
            correct,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }
}
