//! Row shapes of the hosted tables and their conversions into domain types.

use chrono::{DateTime, Utc};
use portal_core::model::{
    Badge, BadgeId, Course, CourseId, Flashcard, FlashcardId, Lesson, LessonId, ProgressPatch,
    ProgressRecord, QuestionId, QuizQuestion, QuizScore, UserId, UserProfile,
};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

#[derive(Debug, Deserialize)]
pub(crate) struct CourseRow {
    pub id: CourseId,
    pub title_sv: String,
    pub description_sv: Option<String>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            title: row.title_sv,
            description: row.description_sv,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LessonRow {
    pub id: LessonId,
    pub course_id: CourseId,
    pub order_number: i32,
    pub title_sv: String,
    pub summary_sv: Option<String>,
    pub video_url: String,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            order_number: row.order_number,
            title: row.title_sv,
            summary: row.summary_sv,
            video_url: row.video_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlashcardRow {
    pub id: FlashcardId,
    pub lesson_id: LessonId,
    pub front_sv: String,
    pub back_sv: String,
}

impl From<FlashcardRow> for Flashcard {
    fn from(row: FlashcardRow) -> Self {
        Self::new(row.id, row.lesson_id, row.front_sv, row.back_sv)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizRow {
    pub id: QuestionId,
    pub lesson_id: LessonId,
    pub question_sv: String,
    pub answer_options: serde_json::Value,
    pub correct_answer: i64,
}

impl TryFrom<QuizRow> for QuizQuestion {
    type Error = StorageError;

    fn try_from(row: QuizRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| StorageError::InvalidRow {
            table: "quizzes",
            reason,
        };
        let options: Vec<String> = serde_json::from_value(row.answer_options)
            .map_err(|e| invalid(format!("answer_options of {}: {e}", row.id)))?;
        QuizQuestion::from_stored(
            row.id,
            row.lesson_id,
            row.question_sv,
            options,
            row.correct_answer,
        )
        .map_err(|e| invalid(format!("question {}: {e}", row.id)))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressRow {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub completed: Option<bool>,
    pub flashcards_reviewed: Option<i64>,
    pub quiz_score: Option<i64>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        Self {
            user_id: row.user_id,
            lesson_id: row.lesson_id,
            completed: row.completed.unwrap_or(false),
            flashcards_reviewed: row
                .flashcards_reviewed
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            quiz_score: row.quiz_score.map(QuizScore::from_percent),
            last_reviewed_at: row.last_reviewed_at,
        }
    }
}

/// Upsert body. Only supplied fields are serialized so the merge keeps the rest.
#[derive(Debug, Serialize)]
pub(crate) struct ProgressUpsert {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flashcards_reviewed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ProgressUpsert {
    pub fn new(user_id: UserId, lesson_id: LessonId, patch: &ProgressPatch) -> Self {
        Self {
            user_id,
            lesson_id,
            completed: patch.completed,
            flashcards_reviewed: patch.flashcards_reviewed,
            quiz_score: patch.quiz_score.map(QuizScore::value),
            last_reviewed_at: patch.last_reviewed_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProfileRow {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub streak_days: Option<i64>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            streak_days: row
                .streak_days
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
        }
    }
}

impl From<&UserProfile> for ProfileRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            name: profile.name.clone(),
            streak_days: Some(i64::from(profile.streak_days)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct BadgeRow {
    pub id: BadgeId,
    pub user_id: UserId,
    pub badge_type: String,
    pub badge_name: String,
    pub earned_at: DateTime<Utc>,
}

impl From<BadgeRow> for Badge {
    fn from(row: BadgeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            badge_type: row.badge_type,
            badge_name: row.badge_name,
            earned_at: row.earned_at,
        }
    }
}

impl From<&Badge> for BadgeRow {
    fn from(badge: &Badge) -> Self {
        Self {
            id: badge.id,
            user_id: badge.user_id,
            badge_type: badge.badge_type.clone(),
            badge_name: badge.badge_name.clone(),
            earned_at: badge.earned_at,
        }
    }
}
