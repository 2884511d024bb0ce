use arena_othello::test_utils::random_playout;
use arena_othello::{Board, Color, Location};
use arena_player::contestants::{Contestant, RandomContestant, SearchContestant};
use arena_player::evaluator::evaluate;
use arena_player::search::{search_to_depth, SearchOutcome};
use arena_player::{choose_move, resolve};
use indicatif::ProgressIterator;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PLAYOUTS: u64 = 12;

/// Plain negamax without pruning: the exact value every pruned search must agree with.
fn negamax(board: Board, color: Color, depth: u8) -> f64 {
    let moves = board.legal_moves(color);
    if depth == 0 || moves.is_empty() {
        return evaluate(board, color);
    }
    moves
        .map(|mv| -negamax(board.apply_move(mv, color), !color, depth - 1))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// First move achieving the best negamax score, and that score.
fn brute_force_root(board: Board, color: Color, depth: u8) -> Option<(Location, f64)> {
    let mut best: Option<(Location, f64)> = None;
    for mv in board.legal_moves(color) {
        let score = -negamax(board.apply_move(mv, color), !color, depth - 1);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    best
}

#[test]
fn chosen_moves_are_always_legal() {
    for seed in (0..PLAYOUTS).progress_count(PLAYOUTS) {
        let mut rng = StdRng::seed_from_u64(seed);
        for position in random_playout(&mut rng) {
            let board = position.board;
            let color = position.to_move;
            let choice = choose_move(board, color, &mut rng);
            match choice {
                Some(loc) => assert!(board.is_legal(loc, color), "{}\n{} played {}", board, color, loc),
                None => assert!(!board.has_moves(color), "{}\n{} passed with moves", board, color),
            }
        }
    }
}

#[test]
fn pruning_matches_plain_negamax() {
    for seed in (100..100 + PLAYOUTS).progress_count(PLAYOUTS) {
        let mut rng = StdRng::seed_from_u64(seed);
        // Every fourth position keeps the unpruned search affordable.
        for position in random_playout(&mut rng).into_iter().step_by(4) {
            let board = position.board;
            let color = position.to_move;
            for depth in 1..=3 {
                let expected = match brute_force_root(board, color, depth) {
                    Some((location, score)) => SearchOutcome::Found { location, score },
                    None => SearchOutcome::NoLegalMoves,
                };
                assert_eq!(search_to_depth(board, color, depth), expected, "{}", board);
            }
        }
    }
}

#[test]
fn move_ordering_matches_plain_negamax() {
    // Depths 4 and 5 reach the fastest-first ordering used by every scheduled search.
    const SAMPLED: u64 = 6;
    for seed in (200..200 + SAMPLED).progress_count(SAMPLED) {
        let mut rng = StdRng::seed_from_u64(seed);
        for position in random_playout(&mut rng).into_iter().step_by(7) {
            let board = position.board;
            let color = position.to_move;
            for depth in 4..=5 {
                let expected = match brute_force_root(board, color, depth) {
                    Some((location, score)) => SearchOutcome::Found { location, score },
                    None => SearchOutcome::NoLegalMoves,
                };
                assert_eq!(
                    search_to_depth(board, color, depth),
                    expected,
                    "depth {}\n{}",
                    depth,
                    board
                );
            }
        }
    }
}

#[test]
fn choice_does_not_depend_on_rng() {
    let mut rng = StdRng::seed_from_u64(7);
    let positions = random_playout(&mut rng);
    for position in positions.iter().step_by(5) {
        let first = choose_move(position.board, position.to_move, &mut StdRng::seed_from_u64(1));
        let second = choose_move(position.board, position.to_move, &mut StdRng::seed_from_u64(2));
        assert_eq!(first, second);
    }
}

#[test]
fn opening_move_is_decided_by_order() {
    // All four openings are symmetric, so the strict comparison keeps the first.
    let outcome = search_to_depth(Board::new(), Color::Black, 1);
    assert_eq!(outcome.location(), Location::from_coords(2, 3));
}

#[test]
fn degenerate_search_takes_the_biggest_capture() {
    let board: Board = "
        XO......
        ........
        ........
        ........
        ........
        ........
        ........
        XOO....."
        .parse()
        .unwrap();
    let outcome = search_to_depth(board, Color::Black, 0);
    assert_eq!(outcome, SearchOutcome::Degenerate);

    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        resolve(board, Color::Black, outcome, &mut rng),
        Location::from_coords(7, 3)
    );
}

#[async_std::test]
async fn contestants_play_legal_moves() {
    let mut players: Vec<Box<dyn Contestant>> = vec![
        Box::new(SearchContestant::new("searcher", 5)),
        Box::new(RandomContestant::new("randy", 5)),
    ];
    assert_eq!(players[0].name(), "searcher");

    // Alternate the two contestants through one full game.
    let mut board = Board::new();
    let mut color = Color::Black;
    let mut turn = 0;
    while !board.is_terminal() {
        let player = &mut players[turn % 2];
        match player.choose_move(board, color).await {
            Some(loc) => {
                assert!(board.is_legal(loc, color));
                board = board.apply_move(loc, color);
            }
            None => assert!(!board.has_moves(color)),
        }
        color = !color;
        turn += 1;
    }
    let (black, white) = board.score();
    assert!(black + white <= 64);
}
