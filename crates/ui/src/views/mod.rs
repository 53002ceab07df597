mod auth;
mod course;
mod dashboard;
mod flashcards;
mod lesson;
mod not_found;
mod quiz;
mod state;
mod video;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use course::CourseView;
pub use dashboard::DashboardView;
pub use flashcards::FlashcardsPanel;
pub use lesson::LessonView;
pub use not_found::{NotFoundPanel, NotFoundView};
pub use quiz::QuizPanel;
pub use state::{LoadErrorBanner, ViewError, ViewState, view_state_from_resource};
pub use video::VideoPanel;
