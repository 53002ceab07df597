use std::sync::Arc;

use portal_core::model::{LessonId, ProgressPatch, Viewer};
use storage::ProgressRepository;
use tracing::{debug, info, warn};

use crate::Clock;

/// What became of a progress write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressWrite {
    Saved,
    SkippedAnonymous,
    /// The backend refused or could not be reached. Already logged.
    Failed,
}

/// Writes per-lesson progress. Failures are logged and swallowed.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Merge `patch` into the viewer's row for `lesson_id`.
    pub async fn record(
        &self,
        viewer: Viewer,
        lesson_id: LessonId,
        patch: &ProgressPatch,
    ) -> ProgressWrite {
        let Viewer::SignedIn(user_id) = viewer else {
            debug!(%lesson_id, "anonymous viewer; progress not saved");
            return ProgressWrite::SkippedAnonymous;
        };

        match self.progress.upsert_progress(user_id, lesson_id, patch).await {
            Ok(()) => {
                info!(%user_id, %lesson_id, ?patch, "progress saved");
                ProgressWrite::Saved
            }
            Err(err) => {
                warn!(%user_id, %lesson_id, error = %err, "failed to save progress");
                ProgressWrite::Failed
            }
        }
    }

    /// Captures a write for the caller to run later, usually on a spawned task.
    #[must_use]
    pub fn pending(&self, viewer: Viewer, lesson_id: LessonId, patch: ProgressPatch) -> PendingWrite {
        PendingWrite {
            service: self.clone(),
            viewer,
            lesson_id,
            patch,
        }
    }
}

/// A deferred progress write handed back by the workflows.
#[derive(Clone)]
pub struct PendingWrite {
    service: ProgressService,
    viewer: Viewer,
    lesson_id: LessonId,
    patch: ProgressPatch,
}

impl PendingWrite {
    #[must_use]
    pub fn patch(&self) -> &ProgressPatch {
        &self.patch
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    pub async fn commit(self) -> ProgressWrite {
        self.service
            .record(self.viewer, self.lesson_id, &self.patch)
            .await
    }
}

impl std::fmt::Debug for PendingWrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingWrite")
            .field("viewer", &self.viewer)
            .field("lesson_id", &self.lesson_id)
            .field("patch", &self.patch)
            .finish_non_exhaustive()
    }
}
