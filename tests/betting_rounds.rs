use poker_dojo::game::{Action, ActionError, ActionKind, Game, GameConfig, Phase, PlayerId};

fn seeded() -> Game {
    Game::seeded(GameConfig::default(), 0, 11)
}

fn check_or_call(game: &mut Game) {
    let cur = game.current();
    let action = if game.to_call(cur) == 0 { Action::Check } else { Action::Call };
    game.execute_action(cur, action).expect("legal action");
}

#[test]
fn blinds_posted_and_action_starts_after_big_blind() {
    let g = seeded();
    assert_eq!(g.players().len(), 3);
    assert_eq!(g.players()[1].bet(), 25);
    assert_eq!(g.players()[2].bet(), 50);
    assert_eq!(g.pot(), 75);
    assert_eq!(g.current_bet(), 50);
    assert_eq!(g.current(), PlayerId(0));
    assert_eq!(g.phase(), Phase::PreFlop);
    assert!(g.players().iter().all(|p| p.hole().is_some()));
}

#[test]
fn default_roster_is_one_human_and_two_ai() {
    let g = seeded();
    assert!(!g.players()[0].is_ai());
    assert!(g.players()[1].is_ai());
    assert!(g.players()[2].is_ai());
    assert_eq!(g.players()[0].name(), "あなた");
}

#[test]
fn calling_around_reaches_the_flop_through_the_bb_option() {
    let mut g = seeded();
    check_or_call(&mut g); // dealer calls
    check_or_call(&mut g); // small blind completes
    assert_eq!(g.phase(), Phase::PreFlop, "big blind still has the option");
    check_or_call(&mut g); // big blind checks
    assert_eq!(g.phase(), Phase::Flop);
    assert_eq!(g.board().len(), 3);
    assert_eq!(g.current_bet(), 0);
    assert!(g.players().iter().all(|p| p.bet() == 0));
}

#[test]
fn raise_below_double_is_rejected_and_state_unchanged() {
    let mut g = seeded();
    let pot = g.pot();
    let chips = g.players()[0].chips();
    let err = g.execute_action(PlayerId(0), Action::Raise { to: 99 }).unwrap_err();
    assert_eq!(err, ActionError::RaiseTooSmall { min: 100, got: 99 });
    assert_eq!(g.pot(), pot);
    assert_eq!(g.players()[0].chips(), chips);
    assert_eq!(g.current(), PlayerId(0), "turn does not advance on a rejected action");
}

#[test]
fn check_facing_a_bet_is_rejected() {
    let mut g = seeded();
    let err = g.execute_action(PlayerId(0), Action::Check).unwrap_err();
    assert_eq!(err, ActionError::CheckNotAllowed { to_call: 50 });
}

#[test]
fn out_of_turn_and_unknown_players_are_rejected() {
    let mut g = seeded();
    assert!(matches!(
        g.execute_action(PlayerId(2), Action::Fold).unwrap_err(),
        ActionError::OutOfTurn { .. }
    ));
    assert!(matches!(
        g.execute_action(PlayerId(9), Action::Fold).unwrap_err(),
        ActionError::UnknownPlayer(_)
    ));
}

#[test]
fn a_raise_reopens_action_for_everyone_else() {
    let mut g = seeded();
    check_or_call(&mut g);
    check_or_call(&mut g);
    g.execute_action(PlayerId(2), Action::Raise { to: 150 }).unwrap();
    assert_eq!(g.current_bet(), 150);
    assert_eq!(g.last_aggressor(), Some(PlayerId(2)));
    assert_eq!(g.phase(), Phase::PreFlop);
    check_or_call(&mut g);
    assert_eq!(g.phase(), Phase::PreFlop, "second caller still owes a response");
    check_or_call(&mut g);
    assert_eq!(g.phase(), Phase::Flop);
    assert_eq!(g.pot(), 450);
}

#[test]
fn streets_progress_three_one_one_and_never_backwards() {
    let mut g = seeded();
    let mut seen = vec![g.phase()];
    while !g.game_over() {
        check_or_call(&mut g);
        if g.phase() != *seen.last().unwrap() {
            seen.push(g.phase());
        }
    }
    assert_eq!(
        seen,
        vec![Phase::PreFlop, Phase::Flop, Phase::Turn, Phase::River, Phase::Showdown]
    );
    assert_eq!(g.board().len(), 5);
}

#[test]
fn folding_to_one_player_ends_the_hand_uncontested() {
    let mut g = seeded();
    let total = g.total_chips();
    g.execute_action(PlayerId(0), Action::Fold).unwrap();
    g.execute_action(PlayerId(1), Action::Fold).unwrap();
    assert!(g.game_over());
    assert_eq!(g.winners(), vec![PlayerId(2)]);
    assert_eq!(g.pot(), 0);
    assert_eq!(g.total_chips(), total);
    assert!(
        g.showdown_categories().iter().all(|c| c.is_none()),
        "uncontested wins never evaluate hands"
    );
}

#[test]
fn all_in_and_calls_run_the_board_out() {
    let mut g = seeded();
    let total = g.total_chips();
    g.execute_action(PlayerId(0), Action::AllIn).unwrap();
    assert_eq!(g.current_bet(), 1000);
    check_or_call(&mut g);
    check_or_call(&mut g);
    assert!(g.game_over());
    assert_eq!(g.board().len(), 5);
    assert_eq!(g.pot(), 0);
    assert_eq!(g.total_chips(), total);
}

#[test]
fn pot_is_conserved_at_every_step() {
    let mut g = seeded();
    let total = g.total_chips();
    let script: [(usize, Action); 3] = [
        (0, Action::Raise { to: 120 }),
        (1, Action::Call),
        (2, Action::Call),
    ];
    for (seat, action) in script {
        g.execute_action(PlayerId(seat), action).unwrap();
        assert_eq!(g.total_chips(), total);
    }
    while !g.game_over() {
        check_or_call(&mut g);
        assert_eq!(g.total_chips(), total);
    }
    assert_eq!(g.total_chips(), total);
}

#[test]
fn can_perform_tracks_turn_and_rules() {
    let g = seeded();
    assert!(g.can_perform(PlayerId(0), ActionKind::Fold));
    assert!(g.can_perform(PlayerId(0), ActionKind::Call));
    assert!(g.can_perform(PlayerId(0), ActionKind::Raise));
    assert!(g.can_perform(PlayerId(0), ActionKind::AllIn));
    assert!(!g.can_perform(PlayerId(0), ActionKind::Check));
    assert!(!g.can_perform(PlayerId(1), ActionKind::Call), "not seat 1's turn");
    assert!(!g.can_perform(PlayerId(9), ActionKind::Fold));
}

#[test]
fn short_blind_posts_what_it_can() {
    // With 30-chip stacks the big blind can only post 30 of the nominal 50.
    let config = GameConfig { starting_chips: 30, small_blind: 25, big_blind: 50 };
    let g = Game::seeded(config, 0, 11);
    assert_eq!(g.players()[1].bet(), 25);
    assert_eq!(g.players()[2].bet(), 30);
    assert_eq!(g.current_bet(), 30);
    assert_eq!(g.pot(), 55);
}
