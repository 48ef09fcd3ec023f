use crossterm::event::KeyCode;
use poker_dojo::effects::NullSink;
use poker_dojo::tui::app::{AppState, InputAction, HUMAN_SEAT, TUTORIAL_STEPS};
use poker_dojo::tui::controller::handle_key;
use poker_dojo::tui::storage::TutorialMarker;

fn marker(tag: &str) -> TutorialMarker {
    let path =
        std::env::temp_dir().join(format!("poker-dojo-smoke-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    TutorialMarker::at(path)
}

fn setup_app(tag: &str) -> AppState {
    let m = marker(tag);
    m.mark_seen();
    AppState::new(Box::new(NullSink), m)
}

#[test]
fn tutorial_swallows_keys_until_dismissed() {
    let m = marker("tutorial");
    let mut app = AppState::new(Box::new(NullSink), m.clone());
    assert_eq!(app.tutorial_step(), Some(0));

    // Game keys do nothing while the tutorial is up.
    handle_key(&mut app, KeyCode::Char('f'));
    assert!(!app.game.players()[HUMAN_SEAT.index()].folded());

    for _ in 0..TUTORIAL_STEPS.len() {
        handle_key(&mut app, KeyCode::Enter);
    }
    assert_eq!(app.tutorial_step(), None);
    assert!(m.seen());
    let _ = std::fs::remove_file(m.path());
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_app("overlays");
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn amount_entry_edit_and_cancel() {
    let mut app = setup_app("amount");
    assert_eq!(app.game.current(), HUMAN_SEAT, "human opens three-handed pre-flop");

    let expected = app.game.min_raise_to().to_string();
    let _ = app.handle_input(InputAction::RaiseOpen);
    assert!(app.amount_entry_active());
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountDigit(5));
    let appended = format!("{expected}5");
    assert_eq!(app.amount_entry_text(), Some(appended.as_str()));

    let _ = app.handle_input(InputAction::AmountBackspace);
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountCancel);
    assert!(!app.amount_entry_active());
}

#[test]
fn raise_submit_applies_through_the_agent_loop() {
    let mut app = setup_app("submit");
    assert_eq!(app.game.current(), HUMAN_SEAT);

    handle_key(&mut app, KeyCode::Char('r'));
    assert!(app.amount_entry_active());
    handle_key(&mut app, KeyCode::Enter);
    // The queued raise runs on the same tick.
    assert!(!app.amount_entry_active());
    assert_eq!(app.game.current_bet(), 100);
    assert_eq!(app.game.players()[HUMAN_SEAT.index()].bet(), 100);
}

#[test]
fn fold_key_acts_only_on_the_humans_turn() {
    let mut app = setup_app("fold");
    assert_eq!(app.game.current(), HUMAN_SEAT);
    handle_key(&mut app, KeyCode::Char('f'));
    assert!(app.game.players()[HUMAN_SEAT.index()].folded());

    // Hand continues between the two AI seats; further keys are ignored.
    handle_key(&mut app, KeyCode::Char('c'));
    assert!(app.game.players()[HUMAN_SEAT.index()].folded());
}

#[test]
fn strength_hint_available_for_the_human() {
    let app = setup_app("hint");
    let (strength, label) = app.human_strength().expect("human holds cards");
    assert!((0.0..=1.0).contains(&strength));
    assert!(label.is_none(), "no category label before the flop");
}

#[test]
fn quit_key_exits_the_loop() {
    let mut app = setup_app("quit");
    assert!(handle_key(&mut app, KeyCode::Char('q')));
    assert!(!handle_key(&mut app, KeyCode::Char('x')));
}
