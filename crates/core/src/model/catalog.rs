use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};

//
// ─── CATALOG TYPES ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
}

impl Course {
    #[must_use]
    pub fn new(id: CourseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    /// Position within the course. Distinct per course.
    pub order_number: i32,
    pub title: String,
    pub summary: Option<String>,
    pub video_url: String,
}

impl Lesson {
    #[must_use]
    pub fn new(
        id: LessonId,
        course_id: CourseId,
        order_number: i32,
        title: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            course_id,
            order_number,
            title: title.into(),
            summary: None,
            video_url: video_url.into(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

//
// ─── LESSON SEQUENCE ───────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("lesson {lesson} belongs to course {actual}, expected {expected}")]
    ForeignLesson {
        lesson: LessonId,
        expected: CourseId,
        actual: CourseId,
    },

    #[error("order number {order_number} is used by more than one lesson")]
    DuplicateOrderNumber { order_number: i32 },
}

/// The lessons of one course in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSequence {
    course_id: CourseId,
    lessons: Vec<Lesson>,
}

impl LessonSequence {
    /// Sorts `lessons` by order number.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ForeignLesson` if a lesson belongs to another
    /// course, or `CatalogError::DuplicateOrderNumber` if two lessons share
    /// an order number.
    pub fn new(course_id: CourseId, mut lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        if let Some(foreign) = lessons.iter().find(|l| l.course_id != course_id) {
            return Err(CatalogError::ForeignLesson {
                lesson: foreign.id,
                expected: course_id,
                actual: foreign.course_id,
            });
        }

        lessons.sort_by_key(|l| l.order_number);
        if let Some(pair) = lessons
            .windows(2)
            .find(|w| w[0].order_number == w[1].order_number)
        {
            return Err(CatalogError::DuplicateOrderNumber {
                order_number: pair[0].order_number,
            });
        }

        Ok(Self { course_id, lessons })
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    #[must_use]
    pub fn position(&self, lesson_id: LessonId) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == lesson_id)
    }

    #[must_use]
    pub fn previous(&self, lesson_id: LessonId) -> Option<&Lesson> {
        let idx = self.position(lesson_id)?;
        idx.checked_sub(1).and_then(|prev| self.lessons.get(prev))
    }

    #[must_use]
    pub fn next(&self, lesson_id: LessonId) -> Option<&Lesson> {
        let idx = self.position(lesson_id)?;
        self.lessons.get(idx + 1)
    }

    #[must_use]
    pub fn into_lessons(self) -> Vec<Lesson> {
        self.lessons
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
