use async_trait::async_trait;
use portal_core::model::{
    Badge, Course, CourseId, Flashcard, Lesson, LessonId, ProgressPatch, ProgressRecord,
    QuizQuestion, UserId, UserProfile,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::auth::{AuthGateway, InMemoryAuth};
use crate::rest::{SupabaseClient, SupabaseConfig};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid row in {table}: {reason}")]
    InvalidRow { table: &'static str, reason: String },
}

/// Read access to courses, lessons and lesson content.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List every course in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the courses cannot be fetched.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails. A missing course is `Ok(None)`.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// Lessons of one course ordered by order number.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lessons cannot be fetched.
    async fn list_lessons(&self, course_id: CourseId) -> Result<Vec<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the lessons cannot be fetched.
    async fn list_all_lessons(&self) -> Result<Vec<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails. A missing lesson is `Ok(None)`.
    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the cards cannot be fetched.
    async fn list_flashcards(&self, lesson_id: LessonId) -> Result<Vec<Flashcard>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the questions cannot be fetched or a stored
    /// question is malformed.
    async fn list_quiz_questions(
        &self,
        lesson_id: LessonId,
    ) -> Result<Vec<QuizQuestion>, StorageError>;
}

/// Per-user lesson progress rows.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the rows cannot be fetched.
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError>;

    /// Merge `patch` into the (user, lesson) row, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn upsert_progress(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        patch: &ProgressPatch,
    ) -> Result<(), StorageError>;
}

/// User profiles and earned badges.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails. A missing profile is `Ok(None)`.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the badges cannot be fetched.
    async fn list_badges(&self, user_id: UserId) -> Result<Vec<Badge>, StorageError>;

    /// Badges are append-only.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the badge id already exists.
    async fn append_badge(&self, badge: &Badge) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and the demo catalog.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<Vec<Course>>>,
    lessons: Arc<Mutex<Vec<Lesson>>>,
    flashcards: Arc<Mutex<Vec<Flashcard>>>,
    questions: Arc<Mutex<Vec<QuizQuestion>>>,
    progress: Arc<Mutex<HashMap<(UserId, LessonId), ProgressRecord>>>,
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    badges: Arc<Mutex<Vec<Badge>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a course with this id exists.
    pub fn insert_course(&self, course: Course) -> Result<(), StorageError> {
        let mut guard = lock(&self.courses)?;
        if guard.iter().any(|c| c.id == course.id) {
            return Err(StorageError::Conflict);
        }
        guard.push(course);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id or the (course, order number)
    /// pair is already taken.
    pub fn insert_lesson(&self, lesson: Lesson) -> Result<(), StorageError> {
        let mut guard = lock(&self.lessons)?;
        let clash = guard.iter().any(|l| {
            l.id == lesson.id
                || (l.course_id == lesson.course_id && l.order_number == lesson.order_number)
        });
        if clash {
            return Err(StorageError::Conflict);
        }
        guard.push(lesson);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn insert_flashcard(&self, card: Flashcard) -> Result<(), StorageError> {
        lock(&self.flashcards)?.push(card);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn insert_question(&self, question: QuizQuestion) -> Result<(), StorageError> {
        lock(&self.questions)?.push(question);
        Ok(())
    }

    /// Row for one (user, lesson) pair, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is poisoned.
    pub fn progress_row(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        Ok(lock(&self.progress)?.get(&(user_id, lesson_id)).cloned())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Ok(lock(&self.courses)?.clone())
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        Ok(lock(&self.courses)?.iter().find(|c| c.id == id).cloned())
    }

    async fn list_lessons(&self, course_id: CourseId) -> Result<Vec<Lesson>, StorageError> {
        let mut lessons: Vec<Lesson> = lock(&self.lessons)?
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|l| l.order_number);
        Ok(lessons)
    }

    async fn list_all_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Ok(lock(&self.lessons)?.clone())
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        Ok(lock(&self.lessons)?.iter().find(|l| l.id == id).cloned())
    }

    async fn list_flashcards(&self, lesson_id: LessonId) -> Result<Vec<Flashcard>, StorageError> {
        Ok(lock(&self.flashcards)?
            .iter()
            .filter(|c| c.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    async fn list_quiz_questions(
        &self,
        lesson_id: LessonId,
    ) -> Result<Vec<QuizQuestion>, StorageError> {
        Ok(lock(&self.questions)?
            .iter()
            .filter(|q| q.lesson_id() == lesson_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = lock(&self.progress)?;
        let mut rows: Vec<ProgressRecord> = guard
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.lesson_id);
        Ok(rows)
    }

    async fn upsert_progress(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        patch: &ProgressPatch,
    ) -> Result<(), StorageError> {
        let mut guard = lock(&self.progress)?;
        let existing = guard.remove(&(user_id, lesson_id));
        let merged = patch.merge_into(existing, user_id, lesson_id);
        guard.insert((user_id, lesson_id), merged);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        Ok(lock(&self.profiles)?.get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        lock(&self.profiles)?.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn list_badges(&self, user_id: UserId) -> Result<Vec<Badge>, StorageError> {
        let mut badges: Vec<Badge> = lock(&self.badges)?
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        badges.sort_by_key(|b| b.earned_at);
        Ok(badges)
    }

    async fn append_badge(&self, badge: &Badge) -> Result<(), StorageError> {
        let mut guard = lock(&self.badges)?;
        if guard.iter().any(|b| b.id == badge.id) {
            return Err(StorageError::Conflict);
        }
        guard.push(badge.clone());
        Ok(())
    }
}

//
// ─── STORAGE ───────────────────────────────────────────────────────────────────
//

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub auth: Arc<dyn AuthGateway>,
}

impl Storage {
    /// Empty in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// In-memory backend pre-filled with the bundled demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the demo fixture fails to load.
    pub fn demo() -> Result<Self, StorageError> {
        let repo = InMemoryRepository::new();
        crate::demo::seed(&repo)?;
        Ok(Self::from_in_memory(repo))
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let auth = InMemoryAuth::new(repo.clone());
        Self {
            catalog: Arc::new(repo.clone()),
            progress: Arc::new(repo.clone()),
            profiles: Arc::new(repo),
            auth: Arc::new(auth),
        }
    }

    /// Hosted backend. Every repository shares one client and access token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn supabase(config: SupabaseConfig) -> Result<Self, StorageError> {
        let client = SupabaseClient::new(config)?;
        Ok(Self {
            catalog: Arc::new(client.clone()),
            progress: Arc::new(client.clone()),
            profiles: Arc::new(client.clone()),
            auth: Arc::new(client.auth()),
        })
    }
}
