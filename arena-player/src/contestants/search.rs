use super::Contestant;
use arena_othello::{Board, Color, Location};
use async_std::task;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Plays the alpha-beta search from [`crate::choose_move`].
///
/// The search runs on a blocking thread so it never stalls the executor.
/// All randomness comes from the seed given at construction.
pub struct SearchContestant {
    name: String,
    rng: StdRng,
}

impl SearchContestant {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl Contestant for SearchContestant {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_move(&mut self, board: Board, color: Color) -> Option<Location> {
        let seed: u64 = self.rng.gen();
        task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            crate::choose_move(board, color, &mut rng)
        })
        .await
    }
}
