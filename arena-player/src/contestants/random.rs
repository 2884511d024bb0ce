use super::Contestant;
use crate::fallback;
use arena_othello::{Board, Color, Location};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Plays a uniformly random legal move. Useful as a sparring partner.
pub struct RandomContestant {
    name: String,
    rng: StdRng,
}

impl RandomContestant {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl Contestant for RandomContestant {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_move(&mut self, board: Board, color: Color) -> Option<Location> {
        fallback::random_move(board, color, &mut self.rng)
    }
}
