mod catalog;
mod content;
mod ids;
mod progress;
mod user;

pub use ids::{BadgeId, CourseId, FlashcardId, LessonId, ParseIdError, QuestionId, UserId};

pub use catalog::{CatalogError, Course, Lesson, LessonSequence};
pub use content::{ContentError, Flashcard, QuizQuestion};
pub use progress::{PASSING_SCORE, ProgressPatch, ProgressRecord, QuizScore};
pub use user::{Badge, UserProfile, Viewer};
