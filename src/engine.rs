// Minimal game engine API boundary. This trait exposes the poker actions and
// queries front-ends and agents need (TUI, bots, test harnesses) without
// depending on the concrete `Game` internals. It is implemented for `Game`.

use crate::game::{Action, ActionError, ActionKind, GameConfig, Phase, PlayerId};

pub trait GameEngine {
    // Player actions
    fn execute_action(&mut self, id: PlayerId, action: Action) -> Result<(), ActionError>;
    fn can_perform(&self, id: PlayerId, kind: ActionKind) -> bool;

    // Queries
    fn to_call(&self, id: PlayerId) -> u64;
    fn current_bet(&self) -> u64;
    fn min_raise_to(&self) -> u64;
    fn pot(&self) -> u64;
    fn hole_cards(&self, id: PlayerId) -> Option<crate::hand::HoleCards>;
    fn board(&self) -> &crate::hand::Board;
    fn chips(&self, id: PlayerId) -> u64;
    fn bet(&self, id: PlayerId) -> u64;
    fn is_ai(&self, id: PlayerId) -> bool;
    fn current(&self) -> PlayerId;
    fn dealer(&self) -> PlayerId;
    fn phase(&self) -> Phase;
    fn game_over(&self) -> bool;
    fn num_players(&self) -> usize;
    fn config(&self) -> GameConfig;
}

impl GameEngine for crate::game::Game {
    fn execute_action(&mut self, id: PlayerId, action: Action) -> Result<(), ActionError> {
        self.execute_action(id, action)
    }
    fn can_perform(&self, id: PlayerId, kind: ActionKind) -> bool {
        self.can_perform(id, kind)
    }

    fn to_call(&self, id: PlayerId) -> u64 {
        self.to_call(id)
    }
    fn current_bet(&self) -> u64 {
        self.current_bet()
    }
    fn min_raise_to(&self) -> u64 {
        self.min_raise_to()
    }
    fn pot(&self) -> u64 {
        self.pot()
    }
    fn hole_cards(&self, id: PlayerId) -> Option<crate::hand::HoleCards> {
        self.player(id).and_then(|p| p.hole())
    }
    fn board(&self) -> &crate::hand::Board {
        self.board()
    }
    fn chips(&self, id: PlayerId) -> u64 {
        self.player(id).map_or(0, |p| p.chips())
    }
    fn bet(&self, id: PlayerId) -> u64 {
        self.player(id).map_or(0, |p| p.bet())
    }
    fn is_ai(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.is_ai())
    }
    fn current(&self) -> PlayerId {
        self.current()
    }
    fn dealer(&self) -> PlayerId {
        self.dealer()
    }
    fn phase(&self) -> Phase {
        self.phase()
    }
    fn game_over(&self) -> bool {
        self.game_over()
    }
    fn num_players(&self) -> usize {
        self.players().len()
    }
    fn config(&self) -> GameConfig {
        self.config()
    }
}
