use portal_core::aggregate::CourseProgress;
use portal_core::model::{CourseId, Viewer};
use services::DashboardPage;

/// Rough study time used for catalog estimates.
pub const MINUTES_PER_LESSON: u32 = 15;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressBarVm {
    pub percent: u8,
    pub label: String,
}

impl ProgressBarVm {
    #[must_use]
    pub fn lessons(completed: u32, total: u32, percent: u8) -> Self {
        Self {
            percent,
            label: format!("{completed} of {total} lessons"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub lessons_label: String,
    pub duration_label: String,
    /// Only present for signed-in viewers.
    pub progress: Option<ProgressBarVm>,
    pub cta_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub completed_label: String,
    pub percent: u8,
    pub streak_label: String,
    pub badges_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub stats: Option<StatsVm>,
    pub courses: Vec<CourseCardVm>,
}

fn plural(count: u32, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

#[must_use]
pub fn map_course_card(progress: &CourseProgress, viewer: Viewer) -> CourseCardVm {
    let lessons = progress.lessons_count;
    let cta_label = if viewer.is_signed_in() && progress.is_started() {
        "Continue"
    } else {
        "Start course"
    };
    CourseCardVm {
        id: progress.course.id,
        title: progress.course.title.clone(),
        description: progress.course.description.clone(),
        lessons_label: plural(lessons, "lesson", "lessons"),
        duration_label: format!("~{} min", lessons * MINUTES_PER_LESSON),
        progress: viewer.is_signed_in().then(|| {
            ProgressBarVm::lessons(progress.completed_lessons, lessons, progress.percent())
        }),
        cta_label,
    }
}

#[must_use]
pub fn map_dashboard(page: &DashboardPage, viewer: Viewer) -> DashboardVm {
    let greeting = match (&page.profile, viewer.is_signed_in()) {
        (Some(profile), true) => format!("Welcome back, {}", profile.display_name()),
        (None, true) => "Welcome back".to_string(),
        (_, false) => "Explore the courses".to_string(),
    };
    let stats = viewer.is_signed_in().then(|| {
        let stats = page.overview.stats;
        StatsVm {
            completed_label: format!("{} / {}", stats.completed_lessons, stats.total_lessons),
            percent: stats.percent(),
            streak_label: plural(stats.streak, "day", "days"),
            badges_label: stats.badge_count.to_string(),
        }
    });
    let courses = page
        .overview
        .courses
        .iter()
        .map(|course| map_course_card(course, viewer))
        .collect();

    DashboardVm {
        greeting,
        stats,
        courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{Course, UserId};

    fn progress(lessons: u32, completed: u32) -> CourseProgress {
        CourseProgress {
            course: Course::new(CourseId::from_u128(1), "Rust").with_description("Systems"),
            lessons_count: lessons,
            completed_lessons: completed,
        }
    }

    #[test]
    fn estimates_fifteen_minutes_per_lesson() {
        let card = map_course_card(&progress(4, 0), Viewer::Anonymous);
        assert_eq!(card.lessons_label, "4 lessons");
        assert_eq!(card.duration_label, "~60 min");
        assert_eq!(card.progress, None);
        assert_eq!(card.cta_label, "Start course");
    }

    #[test]
    fn signed_in_card_shows_progress_and_continue() {
        let viewer = Viewer::SignedIn(UserId::from_u128(2));
        let card = map_course_card(&progress(1, 1), viewer);
        assert_eq!(card.lessons_label, "1 lesson");
        assert_eq!(card.cta_label, "Continue");
        let bar = card.progress.unwrap();
        assert_eq!(bar.percent, 100);
        assert_eq!(bar.label, "1 of 1 lessons");
    }

    #[test]
    fn anonymous_dashboard_has_no_stats() {
        let page = DashboardPage {
            overview: Default::default(),
            profile: None,
        };
        let vm = map_dashboard(&page, Viewer::Anonymous);
        assert!(vm.stats.is_none());
        assert_eq!(vm.greeting, "Explore the courses");
    }
}
