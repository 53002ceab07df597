use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{LessonId, UserId};

/// Minimum quiz score (inclusive) that counts as a pass.
pub const PASSING_SCORE: u8 = 70;

/// A quiz result as a whole percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizScore(u8);

impl QuizScore {
    /// Computes `round(100 * correct / total)`, rounding halves up.
    ///
    /// Returns `None` when `total` is zero.
    #[must_use]
    pub fn from_counts(correct: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let correct = correct.min(total) as u64;
        let total = total as u64;
        let pct = (200 * correct + total) / (2 * total);
        u8::try_from(pct).ok().map(Self)
    }

    /// Clamps a stored percentage into `0..=100`.
    #[must_use]
    pub fn from_percent(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_passing(self) -> bool {
        self.0 >= PASSING_SCORE
    }
}

/// Per-user, per-lesson progress row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub completed: bool,
    pub flashcards_reviewed: u32,
    pub quiz_score: Option<QuizScore>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// A row with nothing recorded yet.
    #[must_use]
    pub fn empty(user_id: UserId, lesson_id: LessonId) -> Self {
        Self {
            user_id,
            lesson_id,
            completed: false,
            flashcards_reviewed: 0,
            quiz_score: None,
            last_reviewed_at: None,
        }
    }
}

/// Partial progress write. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPatch {
    pub completed: Option<bool>,
    pub flashcards_reviewed: Option<u32>,
    pub quiz_score: Option<QuizScore>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ProgressPatch {
    #[must_use]
    pub fn flashcards_reviewed(count: u32, at: DateTime<Utc>) -> Self {
        Self {
            flashcards_reviewed: Some(count),
            last_reviewed_at: Some(at),
            ..Self::default()
        }
    }

    /// Records a quiz score; a passing score also marks the lesson completed.
    #[must_use]
    pub fn quiz_completed(score: QuizScore, at: DateTime<Utc>) -> Self {
        Self {
            completed: score.is_passing().then_some(true),
            quiz_score: Some(score),
            last_reviewed_at: Some(at),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrites the supplied fields of `record`.
    pub fn apply(&self, record: &mut ProgressRecord) {
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
        if let Some(count) = self.flashcards_reviewed {
            record.flashcards_reviewed = count;
        }
        if let Some(score) = self.quiz_score {
            record.quiz_score = Some(score);
        }
        if let Some(at) = self.last_reviewed_at {
            record.last_reviewed_at = Some(at);
        }
    }

    /// Merges into an existing row, or creates one with defaults.
    #[must_use]
    pub fn merge_into(
        &self,
        existing: Option<ProgressRecord>,
        user_id: UserId,
        lesson_id: LessonId,
    ) -> ProgressRecord {
        let mut record = existing.unwrap_or_else(|| ProgressRecord::empty(user_id, lesson_id));
        self.apply(&mut record);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn score_rounds_half_up() {
        assert_eq!(QuizScore::from_counts(7, 10).unwrap().value(), 70);
        assert_eq!(QuizScore::from_counts(1, 3).unwrap().value(), 33);
        assert_eq!(QuizScore::from_counts(2, 3).unwrap().value(), 67);
        assert_eq!(QuizScore::from_counts(1, 8).unwrap().value(), 13);
        assert_eq!(QuizScore::from_counts(1, 200).unwrap().value(), 1);
        assert_eq!(QuizScore::from_counts(3, 3).unwrap().value(), 100);
        assert_eq!(QuizScore::from_counts(0, 4).unwrap().value(), 0);
    }

    #[test]
    fn score_requires_questions() {
        assert!(QuizScore::from_counts(0, 0).is_none());
    }

    #[test]
    fn pass_threshold_is_inclusive() {
        assert!(QuizScore::from_percent(70).is_passing());
        assert!(!QuizScore::from_percent(69).is_passing());
        assert_eq!(QuizScore::from_percent(140).value(), 100);
        assert_eq!(QuizScore::from_percent(-5).value(), 0);
    }

    #[test]
    fn partial_patch_keeps_previous_fields() {
        let user = UserId::from_u128(1);
        let lesson = LessonId::from_u128(2);
        let first = ProgressPatch::quiz_completed(QuizScore::from_percent(80), fixed_now());
        let stored = first.merge_into(None, user, lesson);
        assert!(stored.completed);

        let later = fixed_now() + Duration::minutes(5);
        let second = ProgressPatch::flashcards_reviewed(4, later);
        let merged = second.merge_into(Some(stored), user, lesson);

        assert!(merged.completed);
        assert_eq!(merged.quiz_score, Some(QuizScore::from_percent(80)));
        assert_eq!(merged.flashcards_reviewed, 4);
        assert_eq!(merged.last_reviewed_at, Some(later));
    }

    #[test]
    fn failing_quiz_never_touches_completed() {
        let patch = ProgressPatch::quiz_completed(QuizScore::from_percent(50), fixed_now());
        assert_eq!(patch.completed, None);

        let mut record = ProgressRecord::empty(UserId::from_u128(1), LessonId::from_u128(1));
        record.completed = true;
        patch.apply(&mut record);
        assert!(record.completed);
        assert_eq!(record.quiz_score, Some(QuizScore::from_percent(50)));
    }

    #[test]
    fn fresh_row_defaults() {
        let patch = ProgressPatch::flashcards_reviewed(3, fixed_now());
        let row = patch.merge_into(None, UserId::from_u128(1), LessonId::from_u128(9));
        assert!(!row.completed);
        assert_eq!(row.quiz_score, None);
        assert_eq!(row.flashcards_reviewed, 3);
        assert!(ProgressPatch::default().is_empty());
    }
}
