//! Cursor and answer bookkeeping for a generated question set.

use crate::models::{AnswerMap, OPTION_COUNT, QuestionRecord};
use crate::scorer::{self, Score};

/// Holds a non-empty question set, the current position and the answers so far.
#[derive(Debug, Clone)]
pub struct QuizNavigator {
    questions: Vec<QuestionRecord>,
    cursor: usize,
    answers: AnswerMap,
}

impl QuizNavigator {
    /// Start at the first question with no answers. Returns `None` for an
    /// empty set, which can never be navigated.
    pub fn new(questions: Vec<QuestionRecord>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            cursor: 0,
            answers: AnswerMap::new(),
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &QuestionRecord {
        &self.questions[self.cursor]
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    /// Answer recorded for the question under the cursor.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.cursor)
    }

    /// Record `option` for the current question. Out-of-range options are ignored.
    pub fn select_answer(&mut self, option: usize) {
        if option < OPTION_COUNT {
            self.answers.select(self.cursor, option);
        }
    }

    pub fn next(&mut self) {
        if !self.is_last() {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn score(&self) -> Score {
        scorer::score(&self.questions, &self.answers)
    }
}
