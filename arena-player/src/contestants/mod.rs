//! Contestants are the players the tournament driver schedules.

mod contestant;
mod random;
mod search;

pub use contestant::Contestant;
pub use random::RandomContestant;
pub use search::SearchContestant;
