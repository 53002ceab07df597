use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{BadgeId, UserId};

/// Who is looking at the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Viewer {
    #[default]
    Anonymous,
    SignedIn(UserId),
}

impl Viewer {
    #[must_use]
    pub fn user_id(self) -> Option<UserId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::SignedIn(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_signed_in(self) -> bool {
        matches!(self, Viewer::SignedIn(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub streak_days: u32,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: None,
            streak_days: 0,
        }
    }

    /// Display name, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub user_id: UserId,
    pub badge_type: String,
    pub badge_name: String,
    pub earned_at: DateTime<Utc>,
}
