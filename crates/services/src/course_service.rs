use std::sync::Arc;

use portal_core::aggregate::{CourseProgress, aggregate_progress};
use portal_core::model::{Course, CourseId, Lesson, LessonId, LessonSequence, Viewer};
use std::collections::HashSet;
use storage::{CatalogRepository, ProfileRepository, ProgressRepository};
use tracing::error;

use crate::dashboard_service::load_snapshot;
use crate::error::LoadError;

/// One course with its lessons in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePage {
    pub progress: CourseProgress,
    pub lessons: LessonSequence,
    pub completed: HashSet<LessonId>,
}

impl CoursePage {
    #[must_use]
    pub fn course(&self) -> &Course {
        &self.progress.course
    }

    #[must_use]
    pub fn is_completed(&self, lesson: &Lesson) -> bool {
        self.completed.contains(&lesson.id)
    }
}

#[derive(Clone)]
pub struct CourseService {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        progress: Arc<dyn ProgressRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            catalog,
            progress,
            profiles,
        }
    }

    /// # Errors
    ///
    /// Returns `LoadError::CourseNotFound` for an unknown id, and
    /// `LoadError::Storage` or `LoadError::Catalog` if the rows cannot be
    /// fetched or are inconsistent.
    pub async fn load(&self, course_id: CourseId, viewer: Viewer) -> Result<CoursePage, LoadError> {
        let result = self.load_inner(course_id, viewer).await;
        if let Err(err) = &result {
            if err.is_not_found() {
                tracing::debug!(%course_id, "course not found");
            } else {
                error!(%course_id, error = %err, "failed to load course");
            }
        }
        result
    }

    async fn load_inner(&self, course_id: CourseId, viewer: Viewer) -> Result<CoursePage, LoadError> {
        let course = self
            .catalog
            .get_course(course_id)
            .await?
            .ok_or(LoadError::CourseNotFound(course_id))?;
        let lessons = self.catalog.list_lessons(course_id).await?;
        let snapshot =
            load_snapshot(self.progress.as_ref(), self.profiles.as_ref(), viewer).await?;

        let overview = aggregate_progress(std::slice::from_ref(&course), &lessons, viewer, &snapshot);
        let progress = overview
            .courses
            .into_iter()
            .next()
            .ok_or(LoadError::CourseNotFound(course_id))?;

        Ok(CoursePage {
            progress,
            lessons: LessonSequence::new(course_id, lessons)?,
            completed: overview.completed,
        })
    }
}
