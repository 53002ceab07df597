use std::sync::Arc;

use portal_core::model::{
    Course, Flashcard, Lesson, LessonId, LessonSequence, ProgressRecord, QuizQuestion, Viewer,
};
use portal_core::video::VideoSource;
use storage::{CatalogRepository, ProgressRepository};
use tracing::{debug, error};

use crate::error::LoadError;

/// A lesson with its content and neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPage {
    pub lesson: Lesson,
    pub course: Course,
    pub video: VideoSource,
    pub flashcards: Vec<Flashcard>,
    pub questions: Vec<QuizQuestion>,
    pub previous: Option<Lesson>,
    pub next: Option<Lesson>,
    /// The viewer's stored row, if signed in and one exists.
    pub progress: Option<ProgressRecord>,
}

impl LessonPage {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.progress.as_ref().is_some_and(|p| p.completed)
    }
}

#[derive(Clone)]
pub struct LessonService {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl LessonService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { catalog, progress }
    }

    /// # Errors
    ///
    /// Returns `LoadError::LessonNotFound` for an unknown lesson (or one whose
    /// course is gone), otherwise `LoadError::Storage`/`LoadError::Catalog`.
    pub async fn load(&self, lesson_id: LessonId, viewer: Viewer) -> Result<LessonPage, LoadError> {
        let result = self.load_inner(lesson_id, viewer).await;
        match &result {
            Err(err) if err.is_not_found() => debug!(%lesson_id, "lesson not found"),
            Err(err) => error!(%lesson_id, error = %err, "failed to load lesson"),
            Ok(_) => {}
        }
        result
    }

    async fn load_inner(&self, lesson_id: LessonId, viewer: Viewer) -> Result<LessonPage, LoadError> {
        let lesson = self
            .catalog
            .get_lesson(lesson_id)
            .await?
            .ok_or(LoadError::LessonNotFound(lesson_id))?;
        let course = self
            .catalog
            .get_course(lesson.course_id)
            .await?
            .ok_or(LoadError::LessonNotFound(lesson_id))?;

        let siblings = self.catalog.list_lessons(course.id).await?;
        let sequence = LessonSequence::new(course.id, siblings)?;
        let previous = sequence.previous(lesson_id).cloned();
        let next = sequence.next(lesson_id).cloned();

        let flashcards = self.catalog.list_flashcards(lesson_id).await?;
        let questions = self.catalog.list_quiz_questions(lesson_id).await?;

        let progress = match viewer {
            Viewer::Anonymous => None,
            Viewer::SignedIn(user_id) => self
                .progress
                .list_progress(user_id)
                .await?
                .into_iter()
                .find(|p| p.lesson_id == lesson_id),
        };

        Ok(LessonPage {
            video: VideoSource::parse(&lesson.video_url),
            lesson,
            course,
            flashcards,
            questions,
            previous,
            next,
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{CourseId, FlashcardId, ProgressPatch, QuestionId, UserId};
    use portal_core::time::fixed_now;
    use storage::InMemoryRepository;

    const COURSE: CourseId = CourseId::from_u128(1);

    fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.insert_course(Course::new(COURSE, "Course")).unwrap();
        for order in 1..=3 {
            repo.insert_lesson(Lesson::new(
                LessonId::from_u128(order as u128),
                COURSE,
                order,
                format!("L{order}"),
                "https://www.youtube.com/watch?v=abc",
            ))
            .unwrap();
        }
        let middle = LessonId::from_u128(2);
        repo.insert_flashcard(Flashcard::new(FlashcardId::from_u128(1), middle, "f", "b"))
            .unwrap();
        repo.insert_question(
            QuizQuestion::new(
                QuestionId::from_u128(1),
                middle,
                "q",
                vec!["a".into(), "b".into()],
                1,
            )
            .unwrap(),
        )
        .unwrap();
        repo
    }

    fn service(repo: &InMemoryRepository) -> LessonService {
        LessonService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn loads_content_neighbours_and_video() {
        let repo = seeded();
        let page = service(&repo)
            .load(LessonId::from_u128(2), Viewer::Anonymous)
            .await
            .unwrap();

        assert_eq!(page.course.id, COURSE);
        assert_eq!(page.flashcards.len(), 1);
        assert_eq!(page.questions.len(), 1);
        assert_eq!(page.previous.unwrap().order_number, 1);
        assert_eq!(page.next.unwrap().order_number, 3);
        assert!(page.video.is_embeddable());
        assert!(page.progress.is_none());
    }

    #[tokio::test]
    async fn lesson_without_content_is_not_an_error() {
        let repo = seeded();
        let page = service(&repo)
            .load(LessonId::from_u128(1), Viewer::Anonymous)
            .await
            .unwrap();
        assert!(page.flashcards.is_empty());
        assert!(page.questions.is_empty());
        assert!(page.previous.is_none());
    }

    #[tokio::test]
    async fn signed_in_viewer_gets_their_row() {
        let repo = seeded();
        let user = UserId::from_u128(9);
        let lesson = LessonId::from_u128(3);
        repo.upsert_progress(user, lesson, &ProgressPatch::flashcards_reviewed(4, fixed_now()))
            .await
            .unwrap();

        let page = service(&repo).load(lesson, Viewer::SignedIn(user)).await.unwrap();
        assert_eq!(page.progress.as_ref().unwrap().flashcards_reviewed, 4);
        assert!(!page.is_completed());
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let repo = seeded();
        let err = service(&repo)
            .load(LessonId::from_u128(77), Viewer::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::LessonNotFound(_)));
    }
}
