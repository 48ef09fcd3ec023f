use crate::cards::Card;
use crate::engine::GameEngine;
use crate::evaluator::evaluate_best;
use crate::game::{Action, ActionError, PlayerId};
use crate::hand::{Board, HoleCards};

use super::{AgentKind, PlayerAgent};

/// Estimate hand strength in [0, 1].
///
/// Pre-flop this is a coarse hole-card heuristic; once community cards exist
/// it is the fixed per-category table of the best makeable hand. Purely a
/// function of its inputs.
pub fn hand_strength(hole: &HoleCards, board: &Board) -> f64 {
    if board.is_empty() {
        return preflop_strength(hole);
    }
    let mut cards: Vec<Card> = Vec::with_capacity(2 + board.len());
    cards.push(hole.first());
    cards.push(hole.second());
    cards.extend_from_slice(board.as_slice());
    match evaluate_best(&cards) {
        Ok(ev) => ev.category.strength(),
        Err(_) => preflop_strength(hole),
    }
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = hole.first().rank().value();
    let b = hole.second().rank().value();
    if a == b {
        0.8
    } else if a.abs_diff(b) <= 4 {
        0.6
    } else if a.max(b) >= 11 {
        0.4
    } else {
        0.2
    }
}

/// Pick an action for `seat`. Stateless and deterministic: the same game
/// state always produces the same move. Never bluffs, never adapts.
///
/// The ladder, top to bottom: check when nothing is owed or the stack is
/// empty; raise to double the table bet on a strong hand with a healthy
/// stack; call on anything middling; fold the rest.
pub fn decide(engine: &dyn GameEngine, seat: PlayerId) -> Option<Action> {
    let hole = engine.hole_cards(seat)?;
    let to_call = engine.to_call(seat);
    if to_call == 0 {
        return Some(Action::Check);
    }
    let chips = engine.chips(seat);
    if chips == 0 {
        return Some(Action::Check);
    }
    let strength = hand_strength(&hole, engine.board());
    if strength > 0.8 && chips >= to_call * 2 {
        let target = engine.min_raise_to();
        if chips + engine.bet(seat) >= target {
            return Some(Action::Raise { to: target });
        }
        return Some(Action::Call);
    }
    if strength > 0.6 {
        return Some(Action::Call);
    }
    if strength > 0.3 {
        return Some(Action::Call);
    }
    Some(Action::Fold)
}

/// The rule-based AI opponent: wraps [`decide`] in the agent seam.
#[derive(Debug, Default)]
pub struct HeuristicAgent;

impl HeuristicAgent {
    pub fn new() -> Self {
        Self
    }
}

impl PlayerAgent for HeuristicAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        seat: PlayerId,
    ) -> Result<bool, ActionError> {
        if engine.game_over() || engine.current() != seat {
            return Ok(false);
        }
        match decide(engine, seat) {
            Some(action) => engine.execute_action(seat, action).map(|_| true),
            None => Ok(false),
        }
    }
}
