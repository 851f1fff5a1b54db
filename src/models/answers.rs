use std::collections::BTreeMap;

/// Sparse mapping from question index to the selected option index.
///
/// A missing key means the question was left unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    selections: BTreeMap<usize, usize>,
}

impl AnswerMap {
    pub const fn new() -> Self {
        Self {
            selections: BTreeMap::new(),
        }
    }

    /// Record a selection, replacing any earlier one for the same question.
    pub fn select(&mut self, question: usize, option: usize) {
        self.selections.insert(question, option);
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}
