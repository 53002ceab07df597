use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{FlashcardId, LessonId, QuestionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: FlashcardId,
    pub lesson_id: LessonId,
    pub front: String,
    pub back: String,
}

impl Flashcard {
    #[must_use]
    pub fn new(
        id: FlashcardId,
        lesson_id: LessonId,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            id,
            lesson_id,
            front: front.into(),
            back: back.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("quiz question has no answer options")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },

    #[error("correct answer index must not be negative (got {0})")]
    NegativeCorrectAnswer(i64),
}

/// A multiple-choice question with a validated correct-option index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    id: QuestionId,
    lesson_id: LessonId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `ContentError::NoOptions` for an empty option list and
    /// `ContentError::CorrectAnswerOutOfRange` if `correct_index` does not
    /// point at one of the options.
    pub fn new(
        id: QuestionId,
        lesson_id: LessonId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, ContentError> {
        if options.is_empty() {
            return Err(ContentError::NoOptions);
        }
        if correct_index >= options.len() {
            return Err(ContentError::CorrectAnswerOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            lesson_id,
            prompt: prompt.into(),
            options,
            correct_index,
        })
    }

    /// Same as [`QuizQuestion::new`] but accepts the signed integer column
    /// stored by the backend.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NegativeCorrectAnswer` for a negative index,
    /// otherwise the errors of [`QuizQuestion::new`].
    pub fn from_stored(
        id: QuestionId,
        lesson_id: LessonId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: i64,
    ) -> Result<Self, ContentError> {
        let index = usize::try_from(correct_answer)
            .map_err(|_| ContentError::NegativeCorrectAnswer(correct_answer))?;
        Self::new(id, lesson_id, prompt, options, index)
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Option {i}")).collect()
    }

    #[test]
    fn question_requires_options() {
        let err = QuizQuestion::new(
            QuestionId::from_u128(1),
            LessonId::from_u128(1),
            "Why?",
            Vec::new(),
            0,
        )
        .unwrap_err();
        assert_eq!(err, ContentError::NoOptions);
    }

    #[test]
    fn question_rejects_out_of_range_answer() {
        let err = QuizQuestion::new(
            QuestionId::from_u128(1),
            LessonId::from_u128(1),
            "Why?",
            options(3),
            3,
        )
        .unwrap_err();
        assert_eq!(err, ContentError::CorrectAnswerOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn stored_negative_answer_is_rejected() {
        let err = QuizQuestion::from_stored(
            QuestionId::from_u128(1),
            LessonId::from_u128(1),
            "Why?",
            options(2),
            -1,
        )
        .unwrap_err();
        assert_eq!(err, ContentError::NegativeCorrectAnswer(-1));
    }

    #[test]
    fn correctness_is_exact_index_equality() {
        let q = QuizQuestion::from_stored(
            QuestionId::from_u128(1),
            LessonId::from_u128(1),
            "Pick the second",
            options(4),
            1,
        )
        .unwrap();

        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert!(!q.is_correct(2));
        assert_eq!(q.options().len(), 4);
    }
}
