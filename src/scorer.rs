//! Scoring of a finished quiz.

use crate::models::{AnswerMap, QuestionRecord};

/// Correct answers out of the total question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Rounded percentage, halves rounding up. Zero for an empty set.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let scaled = (self.correct * 200 + self.total) / (self.total * 2);
        scaled as u32
    }
}

/// Count questions whose recorded answer matches the correct option.
/// Unanswered questions count as incorrect.
pub fn score(questions: &[QuestionRecord], answers: &AnswerMap) -> Score {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(index, question)| answers.get(*index) == Some(question.correct()))
        .count();

    Score {
        correct,
        total: questions.len(),
    }
}

/// Whether the answer recorded for `index` is correct.
pub fn is_correct(questions: &[QuestionRecord], answers: &AnswerMap, index: usize) -> bool {
    questions
        .get(index)
        .is_some_and(|question| answers.get(index) == Some(question.correct()))
}
