use portal_core::model::{Lesson, LessonId, Viewer};
use services::CoursePage;

use crate::vm::dashboard_vm::{MINUTES_PER_LESSON, ProgressBarVm};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub id: LessonId,
    pub order_label: String,
    pub title: String,
    pub summary: Option<String>,
    pub duration_label: String,
    pub kind_label: &'static str,
    pub completed: bool,
    pub cta_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseVm {
    pub title: String,
    pub description: Option<String>,
    pub progress: Option<ProgressBarVm>,
    pub lessons: Vec<LessonCardVm>,
}

#[must_use]
pub fn map_lesson_card(lesson: &Lesson, completed: bool) -> LessonCardVm {
    LessonCardVm {
        id: lesson.id,
        order_label: lesson.order_number.to_string(),
        title: lesson.title.clone(),
        summary: lesson.summary.clone(),
        duration_label: format!("~{MINUTES_PER_LESSON} min"),
        kind_label: "Video + Quiz",
        completed,
        cta_label: if completed { "Review" } else { "Start" },
    }
}

#[must_use]
pub fn map_course(page: &CoursePage, viewer: Viewer) -> CourseVm {
    let course = page.course();
    let progress = viewer.is_signed_in().then(|| {
        ProgressBarVm::lessons(
            page.progress.completed_lessons,
            page.progress.lessons_count,
            page.progress.percent(),
        )
    });
    CourseVm {
        title: course.title.clone(),
        description: course.description.clone(),
        progress,
        lessons: page
            .lessons
            .lessons()
            .iter()
            .map(|lesson| map_lesson_card(lesson, page.is_completed(lesson)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::CourseId;

    #[test]
    fn completed_lesson_offers_review() {
        let lesson = Lesson::new(
            LessonId::from_u128(1),
            CourseId::from_u128(1),
            3,
            "Ownership",
            "https://youtu.be/abc",
        );
        let open = map_lesson_card(&lesson, false);
        assert_eq!(open.order_label, "3");
        assert_eq!(open.cta_label, "Start");
        assert_eq!(open.duration_label, "~15 min");

        let done = map_lesson_card(&lesson, true);
        assert!(done.completed);
        assert_eq!(done.cta_label, "Review");
    }
}
