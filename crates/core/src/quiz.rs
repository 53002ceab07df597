use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::{QuestionId, QuizQuestion, QuizScore};
use crate::time::{Deadline, TicketCounter, TimerTicket};

/// How long the answer feedback stays on screen before the quiz moves on.
pub const REVEAL_DELAY_MS: i64 = 2_000;

#[must_use]
pub fn reveal_delay() -> Duration {
    Duration::milliseconds(REVEAL_DELAY_MS)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("quiz is not waiting for an answer")]
    NotAnswering,

    #[error("no answer option selected")]
    NoSelection,

    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub selected: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Empty,
    Answering { index: usize },
    Revealing { index: usize, was_correct: bool },
    Completed { score: QuizScore },
}

/// Final tally of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: QuizScore,
    pub correct: usize,
    pub total: usize,
}

impl QuizOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.score.is_passing()
    }
}

/// What happened when a reveal deadline fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    NextQuestion { index: usize },
    Completed(QuizOutcome),
}

/// Returned by [`QuizSession::submit`]; the caller schedules `deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizReveal {
    pub result: QuestionResult,
    pub deadline: Deadline,
}

/// Reducer for one pass through a lesson's quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    selected: Option<usize>,
    results: Vec<QuestionResult>,
    pending: Option<Deadline>,
    tickets: TicketCounter,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let phase = Self::initial_phase(&questions);
        Self {
            questions,
            phase,
            selected: None,
            results: Vec::new(),
            pending: None,
            tickets: TicketCounter::default(),
        }
    }

    fn initial_phase(questions: &[QuizQuestion]) -> QuizPhase {
        if questions.is_empty() {
            QuizPhase::Empty
        } else {
            QuizPhase::Answering { index: 0 }
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }

    #[must_use]
    pub fn pending_deadline(&self) -> Option<Deadline> {
        self.pending
    }

    /// Index of the question on screen, if any.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::Answering { index } | QuizPhase::Revealing { index, .. } => Some(index),
            QuizPhase::Empty | QuizPhase::Completed { .. } => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// Share of questions answered so far, in percent.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        QuizScore::from_counts(self.results.len(), self.total())
            .map_or(0, QuizScore::value)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        match self.phase {
            QuizPhase::Completed { score } => Some(QuizOutcome {
                score,
                correct: self.correct_count(),
                total: self.total(),
            }),
            _ => None,
        }
    }

    /// Records (or changes) the chosen option for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswering` outside the answering phase and
    /// `QuizError::OptionOutOfRange` for an index past the last option.
    pub fn select_option(&mut self, option: usize) -> Result<(), QuizError> {
        let QuizPhase::Answering { index } = self.phase else {
            return Err(self.not_answering());
        };
        let question = self.questions.get(index).ok_or(QuizError::NoQuestions)?;
        let len = question.options().len();
        if option >= len {
            return Err(QuizError::OptionOutOfRange { index: option, len });
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Scores the selection and schedules the auto-advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswering` outside the answering phase and
    /// `QuizError::NoSelection` when nothing has been selected.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<QuizReveal, QuizError> {
        let QuizPhase::Answering { index } = self.phase else {
            return Err(self.not_answering());
        };
        let selected = self.selected.ok_or(QuizError::NoSelection)?;
        let question = self.questions.get(index).ok_or(QuizError::NoQuestions)?;

        let result = QuestionResult {
            question_id: question.id(),
            selected,
            correct: question.is_correct(selected),
        };
        self.results.push(result);
        self.phase = QuizPhase::Revealing {
            index,
            was_correct: result.correct,
        };

        let deadline = self.tickets.schedule(now, reveal_delay());
        self.pending = Some(deadline);
        Ok(QuizReveal { result, deadline })
    }

    /// Fires the reveal deadline identified by `ticket`.
    ///
    /// Returns `None` for a stale ticket or when nothing is pending.
    pub fn fire(&mut self, ticket: TimerTicket) -> Option<QuizStep> {
        let pending = self.pending?;
        if pending.ticket != ticket {
            return None;
        }
        let QuizPhase::Revealing { index, .. } = self.phase else {
            self.pending = None;
            return None;
        };

        self.pending = None;
        self.selected = None;

        let next = index + 1;
        if next < self.total() {
            self.phase = QuizPhase::Answering { index: next };
            return Some(QuizStep::NextQuestion { index: next });
        }

        let score = QuizScore::from_counts(self.correct_count(), self.total())?;
        self.phase = QuizPhase::Completed { score };
        self.outcome().map(QuizStep::Completed)
    }

    /// Fires the pending deadline if it is due at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<QuizStep> {
        let pending = self.pending?;
        if !pending.is_due(now) {
            return None;
        }
        self.fire(pending.ticket)
    }

    /// Back to the first question. Cancels any pending deadline.
    pub fn restart(&mut self) {
        self.phase = Self::initial_phase(&self.questions);
        self.selected = None;
        self.results.clear();
        self.pending = None;
    }

    /// Replaces the question list and starts over.
    pub fn reload(&mut self, questions: Vec<QuizQuestion>) {
        self.questions = questions;
        self.restart();
    }

    fn not_answering(&self) -> QuizError {
        if self.is_empty() {
            QuizError::NoQuestions
        } else {
            QuizError::NotAnswering
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
