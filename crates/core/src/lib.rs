pub mod aggregate;
pub mod flashcards;
pub mod model;
pub mod quiz;
pub mod time;
pub mod video;

pub use time::Clock;
