use async_trait::async_trait;
use portal_core::model::{Course, CourseId, Flashcard, Lesson, LessonId, QuizQuestion};

use super::rows::{CourseRow, FlashcardRow, LessonRow, QuizRow};
use super::{SupabaseClient, eq};
use crate::repository::{CatalogRepository, StorageError};

const COURSE_COLUMNS: &str = "id,title_sv,description_sv";
const LESSON_COLUMNS: &str = "id,course_id,order_number,title_sv,summary_sv,video_url";

#[async_trait]
impl CatalogRepository for SupabaseClient {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let rows: Vec<CourseRow> = self
            .select(
                "courses",
                &[
                    ("select", COURSE_COLUMNS.into()),
                    ("order", "created_at.asc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let row: Option<CourseRow> = self
            .select_one(
                "courses",
                &[("select", COURSE_COLUMNS.into()), ("id", eq(id))],
            )
            .await?;
        Ok(row.map(Course::from))
    }

    async fn list_lessons(&self, course_id: CourseId) -> Result<Vec<Lesson>, StorageError> {
        let rows: Vec<LessonRow> = self
            .select(
                "lessons",
                &[
                    ("select", LESSON_COLUMNS.into()),
                    ("course_id", eq(course_id)),
                    ("order", "order_number.asc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn list_all_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        let rows: Vec<LessonRow> = self
            .select(
                "lessons",
                &[
                    ("select", LESSON_COLUMNS.into()),
                    ("order", "course_id.asc,order_number.asc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        let row: Option<LessonRow> = self
            .select_one(
                "lessons",
                &[("select", LESSON_COLUMNS.into()), ("id", eq(id))],
            )
            .await?;
        Ok(row.map(Lesson::from))
    }

    async fn list_flashcards(&self, lesson_id: LessonId) -> Result<Vec<Flashcard>, StorageError> {
        let rows: Vec<FlashcardRow> = self
            .select(
                "flashcards",
                &[
                    ("select", "id,lesson_id,front_sv,back_sv".into()),
                    ("lesson_id", eq(lesson_id)),
                    ("order", "created_at.asc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Flashcard::from).collect())
    }

    async fn list_quiz_questions(
        &self,
        lesson_id: LessonId,
    ) -> Result<Vec<QuizQuestion>, StorageError> {
        let rows: Vec<QuizRow> = self
            .select(
                "quizzes",
                &[
                    (
                        "select",
                        "id,lesson_id,question_sv,answer_options,correct_answer".into(),
                    ),
                    ("lesson_id", eq(lesson_id)),
                    ("order", "created_at.asc".into()),
                ],
            )
            .await?;
        rows.into_iter().map(QuizQuestion::try_from).collect()
    }
}
