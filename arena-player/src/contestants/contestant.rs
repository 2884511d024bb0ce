use arena_othello::{Board, Color, Location};
use async_trait::async_trait;

/// An automated player that the tournament driver can seat in a match.
#[async_trait]
pub trait Contestant: Send {
    /// The name this contestant joins tournaments under.
    fn name(&self) -> &str;

    /// Pick a move for `color` on `board`, or None to pass.
    /// Passing is only legal when `color` has no legal move; a contestant that
    /// answers with an illegal move forfeits the match.
    async fn choose_move(&mut self, board: Board, color: Color) -> Option<Location>;
}
