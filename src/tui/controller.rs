use crate::tui::app::{AppState, InputAction};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.tutorial_step().is_some() {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
                let _ = app.handle_input(InputAction::TutorialNext);
            }
            KeyCode::Left => {
                let _ = app.handle_input(InputAction::TutorialPrev);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::TutorialClose);
            }
            _ => {}
        }
        return false;
    }
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if matches!(code, KeyCode::Char('h') | KeyCode::Char('H')) {
        let _ = app.handle_input(InputAction::ToggleHistory);
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }
    if app.amount_entry_active() {
        match code {
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::AmountCancel);
            }
            KeyCode::Enter => {
                if app.handle_input(InputAction::AmountSubmit) {
                    app.agents_on_turn();
                }
            }
            KeyCode::Backspace => {
                let _ = app.handle_input(InputAction::AmountBackspace);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::AmountIncBb);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::AmountDecBb);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let _ = app.handle_input(InputAction::AmountDigit(c as u8 - b'0'));
            }
            _ => {}
        }
        return false;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char(' ') => {
            let _ = app.handle_input(InputAction::NewGame);
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            if app.handle_input(InputAction::Fold) {
                app.agents_on_turn();
            }
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            if app.handle_input(InputAction::CheckCall) {
                app.agents_on_turn();
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            let _ = app.handle_input(InputAction::RaiseOpen);
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            if app.handle_input(InputAction::AllIn) {
                app.agents_on_turn();
            }
        }
        _ => {}
    }
    false
}
