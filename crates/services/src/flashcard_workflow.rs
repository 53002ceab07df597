use std::sync::Arc;

use portal_core::flashcards::{FlashcardEffect, FlashcardSession};
use portal_core::model::{Flashcard, LessonId, ProgressPatch, Viewer};

use crate::progress_service::{PendingWrite, ProgressService};

/// Ties a `FlashcardSession` to a lesson and the progress writer.
#[derive(Clone)]
pub struct FlashcardWorkflow {
    session: FlashcardSession,
    lesson_id: LessonId,
    viewer: Viewer,
    progress: Arc<ProgressService>,
}

impl FlashcardWorkflow {
    #[must_use]
    pub fn new(
        progress: Arc<ProgressService>,
        lesson_id: LessonId,
        viewer: Viewer,
        cards: Vec<Flashcard>,
    ) -> Self {
        Self {
            session: FlashcardSession::new(cards),
            lesson_id,
            viewer,
            progress,
        }
    }

    #[must_use]
    pub fn session(&self) -> &FlashcardSession {
        &self.session
    }

    /// Flip the current card. Returns the write to run once the whole deck
    /// has been reviewed.
    pub fn flip(&mut self) -> Option<PendingWrite> {
        let FlashcardEffect::DeckReviewed { reviewed } = self.session.flip()?;
        let patch = ProgressPatch::flashcards_reviewed(reviewed, self.progress.clock().now());
        Some(self.progress.pending(self.viewer, self.lesson_id, patch))
    }

    pub fn next(&mut self) {
        self.session.next();
    }

    pub fn previous(&mut self) {
        self.session.previous();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
