use arena_othello::{Board, Color, Location};
use arena_player::contestants::{Contestant, RandomContestant, SearchContestant};
use arena_tournament::{
    play_round, Clock, DriverError, EndReason, ManualClock, Registry, Roster, TournamentError,
    Winner,
};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Always answers with a corner, which is never legal early on.
struct Cornered {
    name: String,
}

#[async_trait]
impl Contestant for Cornered {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_move(&mut self, _board: Board, _color: Color) -> Option<Location> {
        Location::from_coords(0, 0)
    }
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()))
}

#[async_std::test]
async fn bots_play_full_rounds() {
    let mut registry = Registry::new();
    let tournament = registry.create("bots", Duration::seconds(5)).unwrap();

    let mut roster = Roster::new();
    roster.add(Box::new(SearchContestant::new("deep", 1)));
    roster.add(Box::new(SearchContestant::new("deeper", 2)));
    roster.add(Box::new(RandomContestant::new("dice", 3)));
    for name in &["deep", "deeper", "dice"] {
        tournament.lock().await.join(name).unwrap();
    }

    let clock = clock();
    let mut rng = StdRng::seed_from_u64(8);
    for round in 1..=2 {
        let summary = play_round(&tournament, &mut roster, clock.clone(), &mut rng)
            .await
            .unwrap();
        assert_eq!(summary.round, round);
        assert_eq!(summary.results.len(), 1);
        assert!(summary.bench.is_some());
        assert_eq!(summary.results[0].reason, EndReason::Completed);
    }

    // Contestants come back after every round.
    assert_eq!(roster.len(), 3);

    let guard = tournament.lock().await;
    assert_eq!(guard.ongoing_matches().count(), 0);
    let games: u32 = guard.players().iter().map(|p| p.record.games()).sum();
    assert_eq!(games, 4);
}

#[async_std::test]
async fn rejected_move_forfeits() {
    let mut registry = Registry::new();
    let tournament = registry.create("strict", Duration::seconds(5)).unwrap();

    let mut roster = Roster::new();
    roster.add(Box::new(Cornered {
        name: "stubborn".to_string(),
    }));
    roster.add(Box::new(RandomContestant::new("dice", 0)));
    {
        let mut guard = tournament.lock().await;
        guard.join("stubborn").unwrap();
        guard.join("dice").unwrap();
    }

    let summary = play_round(&tournament, &mut roster, clock(), &mut StdRng::seed_from_u64(0))
        .await
        .unwrap();
    let result = &summary.results[0];
    assert_eq!(result.reason, EndReason::Forfeit);

    let dice = if result.black_player == "dice" {
        Color::Black
    } else {
        Color::White
    };
    assert_eq!(result.winner, Winner::from(dice));

    let guard = tournament.lock().await;
    assert_eq!(guard.player("stubborn").unwrap().record.losses, 1);
}

#[async_std::test]
async fn every_player_needs_a_contestant() {
    let mut registry = Registry::new();
    let tournament = registry.create("partial", Duration::seconds(5)).unwrap();
    {
        let mut guard = tournament.lock().await;
        guard.join("dice").unwrap();
        guard.join("human").unwrap();
    }
    let mut roster = Roster::new();
    roster.add(Box::new(RandomContestant::new("dice", 0)));

    let err = play_round(&tournament, &mut roster, clock(), &mut StdRng::seed_from_u64(0))
        .await
        .unwrap_err();
    assert!(matches!(err, DriverError::MissingContestant { ref player } if player == "human"));
    // Nothing was paired.
    assert_eq!(tournament.lock().await.round(), 0);
}

#[async_std::test]
async fn pairing_errors_surface() {
    let mut registry = Registry::new();
    let tournament = registry.create("empty", Duration::seconds(5)).unwrap();
    let mut roster = Roster::new();

    let err = play_round(&tournament, &mut roster, clock(), &mut StdRng::seed_from_u64(0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DriverError::Tournament {
            source: TournamentError::PairingBlocked { .. }
        }
    ));
}
