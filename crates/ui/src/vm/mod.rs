mod course_vm;
mod dashboard_vm;
mod flashcards_vm;
mod quiz_vm;
mod time_fmt;

pub use course_vm::{CourseVm, LessonCardVm, map_course, map_lesson_card};
pub use dashboard_vm::{
    CourseCardVm, DashboardVm, MINUTES_PER_LESSON, ProgressBarVm, StatsVm, map_course_card,
    map_dashboard,
};
pub use flashcards_vm::{DotState, FlashcardsVm};
pub use quiz_vm::{
    FeedbackVm, OptionState, OptionVm, QuestionVm, QuizScreen, QuizSummaryVm, ResultRowVm,
};
pub use time_fmt::format_date;
