//! Agents: pluggable seat controllers (the heuristic AI, humans via a UI).
//!
//! This module introduces a small trait `PlayerAgent` and a minimal manager
//! `AgentTable` that coordinates which agent controls which seat. It lives in
//! the library so the turn-taking stays explicit: the caller (TUI or test
//! harness) decides when agents get driven, never a timer inside the engine.

use crate::engine::GameEngine;
use crate::game::{Action, ActionError, PlayerId};
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` is the current actor. Returns whether an action was
    /// taken. Implementations may decline and be called again next tick.
    fn on_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        seat: PlayerId,
    ) -> Result<bool, ActionError>;

    /// The kind of this agent (human, bot).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    /// Optionally receive a seat-intent action; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
}

mod heuristic;

pub use heuristic::{hand_strength, HeuristicAgent};

/// A simple agent that executes user-intended actions when it's their turn.
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }

    fn on_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        seat: PlayerId,
    ) -> Result<bool, ActionError> {
        if engine.game_over() {
            self.pending = None;
            return Ok(false);
        }
        if engine.current() != seat {
            return Ok(false);
        }
        if let Some(action) = self.pending.take() {
            return engine.execute_action(seat, action).map(|_| true);
        }
        Ok(false)
    }
}

/// Manages a set of optional agents, one per seat, and drives the agent at the
/// current seat when appropriate.
///
/// Two pacing mechanisms guard the loop: a minimum delay between bot actions
/// (the "thinking" pause) and a failsafe deadline after which a stalled bot is
/// forced into a guaranteed-legal default action, so the state machine can
/// never hang on a misbehaving agent.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    think_delay: Duration,
    next_action_at: Option<Instant>,
    failsafe_after: Duration,
    waiting: Option<(usize, Instant)>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<char> =
            self.seats.iter().map(|a| if a.is_some() { 'A' } else { '-' }).collect();
        write!(f, "AgentTable({})", flags.into_iter().collect::<String>())
    }
}

impl AgentTable {
    /// Failsafe default: force an action if a bot has stalled this long.
    pub const DEFAULT_FAILSAFE: Duration = Duration::from_secs(10);

    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        for _ in 0..n {
            seats.push(None);
        }
        Self {
            seats,
            think_delay: Duration::ZERO,
            next_action_at: None,
            failsafe_after: Self::DEFAULT_FAILSAFE,
            waiting: None,
        }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: PlayerId, agent: Option<Box<dyn PlayerAgent>>) {
        if seat.index() >= self.seats.len() {
            self.seats.resize_with(seat.index() + 1, || None);
        }
        self.seats[seat.index()] = agent;
    }

    /// Get immutable access to an agent for inspection.
    pub fn agent(&self, seat: PlayerId) -> Option<&dyn PlayerAgent> {
        self.seats.get(seat.index()).and_then(|a| a.as_deref())
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: PlayerId) -> Option<AgentKind> {
        self.seats.get(seat.index()).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an action intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: PlayerId, action: Action) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat.index()) {
            return agent.receive(action);
        }
        false
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: PlayerId) -> bool {
        self.seats.get(seat.index()).map(|a| a.is_some()).unwrap_or(false)
    }

    /// Set a minimum delay between bot actions, for UX pacing.
    pub fn set_think_delay_ms(&mut self, delay_ms: u64) {
        self.think_delay = Duration::from_millis(delay_ms);
    }

    /// Bound how long a bot may stall before the failsafe acts for it.
    pub fn set_failsafe_ms(&mut self, deadline_ms: u64) {
        self.failsafe_after = Duration::from_millis(deadline_ms);
    }

    /// Drive the agent assigned to the current seat, if any. Returns whether
    /// an action was applied this tick.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        if engine.game_over() {
            self.waiting = None;
            return Ok(false);
        }
        let seat = engine.current();
        let now = Instant::now();
        match self.waiting {
            Some((s, _)) if s == seat.index() => {}
            _ => self.waiting = Some((seat.index(), now)),
        }
        let Some(Some(agent)) = self.seats.get_mut(seat.index()) else {
            return Ok(false);
        };
        let is_bot = matches!(agent.kind(), AgentKind::Bot);
        if is_bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = match agent.on_turn(engine, seat) {
            Ok(acted) => acted,
            // A bot returning an invalid action must not stall the table.
            Err(_) if is_bot => {
                force_default(engine, seat)?;
                true
            }
            Err(e) => return Err(e),
        };
        if acted {
            self.note_acted(now);
            return Ok(true);
        }
        if is_bot {
            if let Some((_, since)) = self.waiting {
                if now.duration_since(since) >= self.failsafe_after {
                    force_default(engine, seat)?;
                    self.note_acted(now);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn note_acted(&mut self, now: Instant) {
        self.waiting = None;
        if self.think_delay > Duration::ZERO {
            self.next_action_at = Some(now + self.think_delay);
        }
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
        self.next_action_at = None;
        self.waiting = None;
    }
}

/// The guaranteed-legal fallback: fold when the seat cannot cover the table
/// bet, check when nothing is owed, call otherwise.
fn force_default(engine: &mut dyn GameEngine, seat: PlayerId) -> Result<(), ActionError> {
    let action = if engine.current_bet() > engine.bet(seat) + engine.chips(seat) {
        Action::Fold
    } else if engine.to_call(seat) == 0 {
        Action::Check
    } else {
        Action::Call
    };
    engine.execute_action(seat, action)
}
