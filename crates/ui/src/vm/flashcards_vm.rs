use portal_core::flashcards::FlashcardSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotState {
    Current,
    Reviewed,
    Pending,
}

impl DotState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Current => "dot current",
            Self::Reviewed => "dot reviewed",
            Self::Pending => "dot",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardsVm {
    pub position_label: String,
    pub face_label: &'static str,
    pub text: String,
    pub flipped: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub reviewed_label: String,
    pub percent: u8,
    pub dots: Vec<DotState>,
    pub complete: bool,
}

impl FlashcardsVm {
    /// `None` for an empty deck.
    #[must_use]
    pub fn from_session(session: &FlashcardSession) -> Option<Self> {
        let card = session.current()?;
        let flipped = session.is_flipped();
        let dots = session
            .cards()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == session.index() {
                    DotState::Current
                } else if session.is_reviewed(c.id) {
                    DotState::Reviewed
                } else {
                    DotState::Pending
                }
            })
            .collect();

        Some(Self {
            position_label: format!("Card {} of {}", session.index() + 1, session.len()),
            face_label: if flipped { "Answer" } else { "Question" },
            text: if flipped {
                card.back.clone()
            } else {
                card.front.clone()
            },
            flipped,
            has_previous: session.has_previous(),
            has_next: session.has_next(),
            reviewed_label: format!("{} of {} reviewed", session.reviewed_count(), session.len()),
            percent: session.progress_percent(),
            dots,
            complete: session.is_complete(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{Flashcard, FlashcardId, LessonId};

    fn deck() -> FlashcardSession {
        FlashcardSession::new(
            (1..=3)
                .map(|i| {
                    Flashcard::new(
                        FlashcardId::from_u128(i),
                        LessonId::from_u128(1),
                        format!("front {i}"),
                        format!("back {i}"),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn empty_deck_has_no_view() {
        assert!(FlashcardsVm::from_session(&FlashcardSession::new(Vec::new())).is_none());
    }

    #[test]
    fn flipping_shows_back_and_marks_dot() {
        let mut session = deck();
        let vm = FlashcardsVm::from_session(&session).unwrap();
        assert_eq!(vm.position_label, "Card 1 of 3");
        assert_eq!(vm.text, "front 1");
        assert!(!vm.has_previous);

        session.flip();
        session.next();
        let vm = FlashcardsVm::from_session(&session).unwrap();
        assert_eq!(vm.text, "front 2");
        assert_eq!(vm.reviewed_label, "1 of 3 reviewed");
        assert_eq!(
            vm.dots,
            vec![DotState::Reviewed, DotState::Current, DotState::Pending]
        );

        session.flip();
        let vm = FlashcardsVm::from_session(&session).unwrap();
        assert_eq!(vm.face_label, "Answer");
        assert_eq!(vm.text, "back 2");
        assert!(!vm.complete);
    }
}
