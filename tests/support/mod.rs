//! Shared helpers for integration suites: seeded games and a scripted
//! driver that checks the core invariants at every step.
#![allow(dead_code)]

use presidente_backend::domain::cards::Card;
use presidente_backend::domain::legal::valid_plays;
use presidente_backend::domain::play::Play;
use presidente_backend::domain::rules::{self, TradeRole};
use presidente_backend::domain::state::{Accolade, Game, GamePhase, Player};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn roster(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

pub fn seeded_game(n: usize, seed: u64) -> Game {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rules::start_new_game(&roster(n), None, None, None, &mut rng).unwrap()
}

/// Claim both sides of a pending trade so play can begin.
pub fn complete_trading(game: &mut Game) {
    if game.phase != GamePhase::Trading {
        return;
    }
    let ep = game
        .players
        .iter()
        .find(|p| p.past_accolade == Accolade::ElPresidente)
        .map(|p| p.id.clone())
        .expect("trading game has an El Presidente");
    let sh = game
        .players
        .iter()
        .find(|p| p.past_accolade == Accolade::Shithead)
        .map(|p| p.id.clone())
        .expect("trading game has a Shithead");
    rules::apply_claim_trade(game, &ep, TradeRole::Presidente).unwrap();
    rules::apply_claim_trade(game, &sh, TradeRole::Shithead).unwrap();
    assert_eq!(game.phase, GamePhase::Playing);
}

fn legal_options(game: &Game) -> Vec<Vec<Card>> {
    let idx = game.current_player_idx;
    let current = game.round.pile.current_play();
    let num_required = current.filter(|c| !c.is_empty()).map(Play::len);
    let must_3c = num_required.is_none()
        && game.round.starting_player_idx == idx
        && game.rounds_completed == 0;
    valid_plays(&game.players[idx].hand, current, num_required, must_3c)
}

fn check_invariants(game: &Game, expected_cards: usize) {
    // Card conservation (no ejections in the driver).
    assert_eq!(
        game.cards_in_play(),
        expected_cards,
        "card conservation violated"
    );
    // Turn well-formedness while the game is live.
    if game.phase == GamePhase::Playing && game.players_with_cards() > 1 {
        assert!(
            !game.players[game.current_player_idx].hand.is_empty(),
            "acting player has an empty hand"
        );
    }
    // Nobody passed with an empty hand.
    for &i in &game.passed_this_round {
        assert!(
            !game.players[i].hand.is_empty(),
            "empty-handed player marked as passed"
        );
    }
    // Results are unique and bounded.
    assert!(game.results.len() <= game.players.len());
    for (a, id) in game.results.iter().enumerate() {
        assert_eq!(
            game.results.iter().position(|other| other == id),
            Some(a),
            "duplicate id in results"
        );
    }
}

/// Play a seeded game to completion. `policy_rng` picks among legal plays
/// (or a pass, where passing is legal); invariants are asserted after every
/// action. Returns the finished game.
pub fn drive_to_completion(mut game: Game, policy_seed: u64) -> Game {
    let mut policy = ChaCha8Rng::seed_from_u64(policy_seed);
    complete_trading(&mut game);
    let expected_cards = game.cards_in_play();

    for _step in 0..10_000 {
        let idx = game.current_player_idx;
        let options = legal_options(&game);
        let leading = game
            .round
            .pile
            .current_play()
            .map(|c| c.is_empty())
            .unwrap_or(true);

        // Leaders always play; followers sometimes pass even when they
        // could beat the pile.
        let pass = options.is_empty() || (!leading && policy.random_bool(0.3));
        if pass {
            rules::apply_pass(&mut game, idx).unwrap();
        } else {
            let choice = policy.random_range(0..options.len());
            let play = Play::new(options[choice].clone());
            rules::apply_play(&mut game, idx, &play).unwrap();
            assert!(
                game.passed_this_round.is_empty(),
                "a landed play must reopen the trick"
            );
            if rules::finish_if_over(&mut game) {
                check_invariants(&game, expected_cards);
                assert_finished(&game);
                return game;
            }
        }
        check_invariants(&game, expected_cards);
    }
    panic!("game did not terminate within the step limit");
}

fn assert_finished(game: &Game) {
    let n = game.players.len();
    assert_eq!(game.results.len(), n, "every player finishes");

    let count = |a: Accolade| game.players.iter().filter(|p| p.accolade == a).count();
    assert_eq!(count(Accolade::ElPresidente), 1);
    assert_eq!(count(Accolade::Shithead), 1);
    if n >= 3 {
        assert_eq!(count(Accolade::VP), 1);
    }
    assert_eq!(
        count(Accolade::Pleb),
        n.saturating_sub(3),
        "remainder are plebs"
    );
}
