use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// One UUID newtype per table.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[must_use]
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Builds an id from a plain integer. Handy for fixtures.
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Generates a fresh random (v4) id.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a Course
    CourseId
);
uuid_id!(
    /// Unique identifier for a Lesson
    LessonId
);
uuid_id!(
    /// Unique identifier for a Flashcard
    FlashcardId
);
uuid_id!(
    /// Unique identifier for a quiz question
    QuestionId
);
uuid_id!(
    /// Unique identifier for an authenticated user (auth user id = profile id)
    UserId
);
uuid_id!(
    /// Unique identifier for an earned badge
    BadgeId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_id_display_is_plain_uuid() {
        let id = LessonId::from_u128(1);
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn course_id_from_str() {
        let id: CourseId = "00000000-0000-0000-0000-00000000002a".parse().unwrap();
        assert_eq!(id, CourseId::from_u128(42));
    }

    #[test]
    fn from_str_trims_whitespace() {
        let id: UserId = " 00000000-0000-0000-0000-000000000007 ".parse().unwrap();
        assert_eq!(id, UserId::from_u128(7));
    }

    #[test]
    fn from_str_invalid() {
        let err = "not-a-uuid".parse::<FlashcardId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse FlashcardId from string");
    }

    #[test]
    fn debug_names_the_id_kind() {
        let id = QuestionId::from_u128(3);
        assert_eq!(
            format!("{id:?}"),
            "QuestionId(00000000-0000-0000-0000-000000000003)"
        );
    }

    #[test]
    fn serde_is_transparent() {
        let id = BadgeId::from_u128(9);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000009\"");
        let back: BadgeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
