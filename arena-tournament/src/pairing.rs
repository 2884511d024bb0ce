//! Random round pairing.

use rand::Rng;
use serde::Serialize;

/// One round's pairings: (black, white) name pairs, plus the player left over
/// when the pool is odd.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub pairs: Vec<(String, String)>,
    pub bench: Option<String>,
}

/// Pair `players` by repeatedly drawing two uniformly at random.
/// The first drawn plays black. Every player ends up in exactly one pair or on the bench.
pub fn pair_players<R: Rng + ?Sized>(players: impl IntoIterator<Item = String>, rng: &mut R) -> Pairing {
    let mut pool: Vec<String> = players.into_iter().collect();
    let mut pairs = Vec::with_capacity(pool.len() / 2);

    while pool.len() > 1 {
        let black = pool.swap_remove(rng.gen_range(0..pool.len()));
        let white = pool.swap_remove(rng.gen_range(0..pool.len()));
        pairs.push((black, white));
    }

    Pairing {
        pairs,
        bench: pool.pop(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("player-{}", i)).collect()
    }

    #[test]
    fn everyone_is_placed_once() {
        let mut rng = StdRng::seed_from_u64(9);
        for count in 0..12 {
            let pairing = pair_players(names(count), &mut rng);
            assert_eq!(pairing.pairs.len(), count / 2);
            assert_eq!(pairing.bench.is_some(), count % 2 == 1);

            let placed: HashSet<&String> = pairing
                .pairs
                .iter()
                .flat_map(|(black, white)| vec![black, white])
                .chain(pairing.bench.iter())
                .collect();
            assert_eq!(placed.len(), count);
        }
    }

    #[test]
    fn draws_vary_with_the_rng() {
        let first = pair_players(names(8), &mut StdRng::seed_from_u64(1));
        let differs = (2..20).any(|seed| pair_players(names(8), &mut StdRng::seed_from_u64(seed)) != first);
        assert!(differs);
    }
}
