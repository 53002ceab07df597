use std::collections::{HashMap, HashSet};

use crate::model::{Badge, Course, CourseId, Lesson, LessonId, ProgressRecord, UserProfile, Viewer};

/// Everything stored about one user that the dashboard needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSnapshot {
    pub progress: Vec<ProgressRecord>,
    pub profile: Option<UserProfile>,
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProgress {
    pub course: Course,
    pub lessons_count: u32,
    pub completed_lessons: u32,
}

impl CourseProgress {
    /// `round(100 * completed / total)`, zero for a course without lessons.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.completed_lessons, self.lessons_count)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.completed_lessons > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub streak: u32,
    pub badge_count: u32,
}

impl DashboardStats {
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.completed_lessons, self.total_lessons)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressOverview {
    pub courses: Vec<CourseProgress>,
    pub stats: DashboardStats,
    pub completed: HashSet<LessonId>,
}

impl ProgressOverview {
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&CourseProgress> {
        self.courses.iter().find(|c| c.course.id == id)
    }

    #[must_use]
    pub fn is_completed(&self, lesson: LessonId) -> bool {
        self.completed.contains(&lesson)
    }
}

fn percent(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part.min(whole));
    let whole = u64::from(whole);
    u8::try_from((200 * part + whole) / (2 * whole)).unwrap_or(100)
}

/// Folds catalog rows and one viewer's progress into per-course counters.
///
/// Courses keep catalog order. Lessons of unlisted courses are skipped, and
/// an anonymous viewer always sees zero completion, streak and badges.
#[must_use]
pub fn aggregate_progress(
    courses: &[Course],
    lessons: &[Lesson],
    viewer: Viewer,
    snapshot: &UserSnapshot,
) -> ProgressOverview {
    let completed: HashSet<LessonId> = match viewer {
        Viewer::Anonymous => HashSet::new(),
        Viewer::SignedIn(user) => snapshot
            .progress
            .iter()
            .filter(|p| p.user_id == user && p.completed)
            .map(|p| p.lesson_id)
            .collect(),
    };

    let mut counters: Vec<CourseProgress> = courses
        .iter()
        .map(|course| CourseProgress {
            course: course.clone(),
            lessons_count: 0,
            completed_lessons: 0,
        })
        .collect();
    let slots: HashMap<CourseId, usize> = counters
        .iter()
        .enumerate()
        .map(|(i, c)| (c.course.id, i))
        .collect();

    let mut completed_known = HashSet::new();
    for lesson in lessons {
        let Some(&slot) = slots.get(&lesson.course_id) else {
            continue;
        };
        let counter = &mut counters[slot];
        counter.lessons_count += 1;
        if completed.contains(&lesson.id) {
            counter.completed_lessons += 1;
            completed_known.insert(lesson.id);
        }
    }

    let mut stats = DashboardStats {
        total_lessons: counters.iter().map(|c| c.lessons_count).sum(),
        completed_lessons: counters.iter().map(|c| c.completed_lessons).sum(),
        ..DashboardStats::default()
    };

    if let Viewer::SignedIn(user) = viewer {
        stats.streak = snapshot
            .profile
            .as_ref()
            .filter(|p| p.id == user)
            .map_or(0, |p| p.streak_days);
        let badges = snapshot.badges.iter().filter(|b| b.user_id == user).count();
        stats.badge_count = u32::try_from(badges).unwrap_or(u32::MAX);
    }

    ProgressOverview {
        courses: counters,
        stats,
        completed: completed_known,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
