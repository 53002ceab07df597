use std::collections::HashSet;

use crate::model::{Flashcard, FlashcardId};

/// Side effect requested by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardEffect {
    /// Every card has been turned over at least once.
    DeckReviewed { reviewed: u32 },
}

/// Reducer for flipping through a lesson's flashcards.
#[derive(Debug, Clone)]
pub struct FlashcardSession {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
    reviewed: HashSet<FlashcardId>,
    completion_fired: bool,
}

impl FlashcardSession {
    #[must_use]
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            flipped: false,
            reviewed: HashSet::new(),
            completion_fired: false,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    #[must_use]
    pub fn reviewed_count(&self) -> usize {
        self.reviewed.len()
    }

    #[must_use]
    pub fn is_reviewed(&self, id: FlashcardId) -> bool {
        self.reviewed.contains(&id)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.reviewed.len() == self.cards.len()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.cards.len()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.cards.is_empty() {
            return 0;
        }
        let pct = self.reviewed.len() * 100 / self.cards.len();
        u8::try_from(pct).unwrap_or(100)
    }

    /// Turns the current card over. Showing the back marks it reviewed.
    pub fn flip(&mut self) -> Option<FlashcardEffect> {
        let id = self.current()?.id;
        self.flipped = !self.flipped;
        if self.flipped {
            self.reviewed.insert(id);
        }
        self.check_completion()
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.index += 1;
            self.flipped = false;
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.index -= 1;
            self.flipped = false;
        }
    }

    /// Starts the deck over and re-arms the completion effect.
    pub fn reset(&mut self) {
        self.index = 0;
        self.flipped = false;
        self.reviewed.clear();
        self.completion_fired = false;
    }

    pub fn reload(&mut self, cards: Vec<Flashcard>) {
        self.cards = cards;
        self.reset();
    }

    fn check_completion(&mut self) -> Option<FlashcardEffect> {
        if self.completion_fired || !self.is_complete() {
            return None;
        }
        self.completion_fired = true;
        let reviewed = u32::try_from(self.reviewed.len()).unwrap_or(u32::MAX);
        Some(FlashcardEffect::DeckReviewed { reviewed })
    }
}
