use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use portal_core::model::{LessonId, ProgressPatch, QuizQuestion, Viewer};
use portal_core::quiz::{QuizOutcome, QuizReveal, QuizSession, QuizStep};
use portal_core::time::TimerTicket;
use tracing::debug;

use crate::Clock;
use crate::error::WorkflowError;
use crate::progress_service::{PendingWrite, ProgressService};

/// Called once for every passing completion.
pub type PassListener = Arc<dyn Fn(&QuizOutcome) + Send + Sync>;

/// Result of a reveal deadline firing.
#[derive(Debug)]
pub enum QuizAdvance {
    NextQuestion { index: usize },
    Completed {
        outcome: QuizOutcome,
        write: PendingWrite,
    },
}

/// Ties a `QuizSession` to a lesson and the progress writer.
#[derive(Clone)]
pub struct QuizWorkflow {
    session: QuizSession,
    lesson_id: LessonId,
    viewer: Viewer,
    clock: Clock,
    progress: Arc<ProgressService>,
    on_pass: Option<PassListener>,
}

impl fmt::Debug for QuizWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizWorkflow")
            .field("session", &self.session)
            .field("lesson_id", &self.lesson_id)
            .field("viewer", &self.viewer)
            .finish_non_exhaustive()
    }
}

impl QuizWorkflow {
    #[must_use]
    pub fn new(
        progress: Arc<ProgressService>,
        lesson_id: LessonId,
        viewer: Viewer,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            session: QuizSession::new(questions),
            lesson_id,
            viewer,
            clock: progress.clock(),
            progress,
            on_pass: None,
        }
    }

    #[must_use]
    pub fn with_pass_listener(mut self, listener: PassListener) -> Self {
        self.on_pass = Some(listener);
        self
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    /// Advances the workflow's own clock. Only fixed clocks move.
    pub fn advance_clock(&mut self, delta: chrono::Duration) {
        self.clock.advance(delta);
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::Quiz` if the quiz is not accepting answers or
    /// the option does not exist.
    pub fn select(&mut self, option: usize) -> Result<(), WorkflowError> {
        self.session.select_option(option)?;
        Ok(())
    }

    /// Score the selection. The caller waits until `deadline.at` and then
    /// calls [`QuizWorkflow::fire`] with its ticket.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Quiz` when nothing is selected or the quiz is
    /// not accepting answers.
    pub fn submit(&mut self) -> Result<QuizReveal, WorkflowError> {
        let reveal = self.session.submit(self.clock.now())?;
        debug!(
            lesson_id = %self.lesson_id,
            correct = reveal.result.correct,
            "quiz answer submitted"
        );
        Ok(reveal)
    }

    /// Stale or unknown tickets return `None`.
    pub fn fire(&mut self, ticket: TimerTicket) -> Option<QuizAdvance> {
        let step = self.session.fire(ticket)?;
        Some(self.handle(step))
    }

    /// Fires the pending deadline if due on the workflow clock.
    pub fn tick(&mut self) -> Option<QuizAdvance> {
        let step = self.session.tick(self.clock.now())?;
        Some(self.handle(step))
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    fn handle(&self, step: QuizStep) -> QuizAdvance {
        match step {
            QuizStep::NextQuestion { index } => QuizAdvance::NextQuestion { index },
            QuizStep::Completed(outcome) => {
                debug!(
                    lesson_id = %self.lesson_id,
                    score = outcome.score.value(),
                    passed = outcome.passed(),
                    "quiz completed"
                );
                if outcome.passed() {
                    if let Some(listener) = &self.on_pass {
                        listener(&outcome);
                    }
                }
                let patch = ProgressPatch::quiz_completed(outcome.score, self.clock.now());
                QuizAdvance::Completed {
                    outcome,
                    write: self.progress.pending(self.viewer, self.lesson_id, patch),
                }
            }
        }
    }
}
