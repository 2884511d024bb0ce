//! Named tournaments, each behind its own lock.

use async_std::sync::{Arc, Mutex};
use chrono::Duration;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

use crate::error::TournamentError;
use crate::tournament::{Tournament, TournamentStatus};

/// A tournament shared between the registry, the driver and match tasks.
/// Hold the lock only for a single transition, never across a search.
pub type SharedTournament = Arc<Mutex<Tournament>>;

/// Listing entry for one tournament.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TournamentSummary {
    pub name: String,
    pub status: TournamentStatus,
    pub players: usize,
    pub ongoing_matches: usize,
}

#[derive(Debug, Default)]
pub struct Registry {
    tournaments: BTreeMap<String, SharedTournament>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, available tournament. Names are unique.
    #[instrument(skip(self))]
    pub fn create(
        &mut self,
        name: &str,
        move_deadline: Duration,
    ) -> Result<SharedTournament, TournamentError> {
        if self.tournaments.contains_key(name) {
            return Err(TournamentError::TournamentExists {
                name: name.to_string(),
            });
        }
        let tournament = Arc::new(Mutex::new(Tournament::new(name, move_deadline)));
        self.tournaments.insert(name.to_string(), tournament.clone());
        info!("tournament created");
        Ok(tournament)
    }

    pub fn get(&self, name: &str) -> Result<SharedTournament, TournamentError> {
        self.tournaments
            .get(name)
            .cloned()
            .ok_or_else(|| TournamentError::TournamentNotFound {
                name: name.to_string(),
            })
    }

    pub async fn close(&self, name: &str) -> Result<(), TournamentError> {
        self.get(name)?.lock().await.close()
    }

    /// Remove a tournament together with all of its matches.
    #[instrument(skip(self))]
    pub fn delete(&mut self, name: &str) -> Result<SharedTournament, TournamentError> {
        let removed = self
            .tournaments
            .remove(name)
            .ok_or_else(|| TournamentError::TournamentNotFound {
                name: name.to_string(),
            })?;
        info!("tournament deleted");
        Ok(removed)
    }

    /// Every tournament, by name.
    pub async fn list(&self) -> Vec<TournamentSummary> {
        let mut summaries = Vec::with_capacity(self.tournaments.len());
        for tournament in self.tournaments.values() {
            let tournament = tournament.lock().await;
            summaries.push(TournamentSummary {
                name: tournament.name().to_string(),
                status: tournament.status(),
                players: tournament.players().len(),
                ongoing_matches: tournament.ongoing_matches().count(),
            });
        }
        summaries
    }

    /// Names of the tournaments still accepting players.
    pub async fn available(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (name, tournament) in &self.tournaments {
            if tournament.lock().await.is_available() {
                names.push(name.clone());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn lifecycle() {
        let mut registry = Registry::new();
        registry.create("spring", Duration::seconds(5)).unwrap();
        registry.create("autumn", Duration::seconds(5)).unwrap();
        assert_eq!(
            registry.create("spring", Duration::seconds(5)).err(),
            Some(TournamentError::TournamentExists {
                name: "spring".to_string()
            })
        );

        registry.close("autumn").await.unwrap();
        assert_eq!(registry.available().await, vec!["spring".to_string()]);

        let listed = registry.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "autumn");
        assert_eq!(listed[0].status, TournamentStatus::Closed);

        registry.delete("autumn").unwrap();
        assert!(registry.get("autumn").is_err());
        assert!(registry.delete("autumn").is_err());
    }
}
