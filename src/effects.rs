//! Game effect events and their dispatch seam.
//!
//! The engine and UI announce noteworthy moments as [`GameEffect`] values and
//! hand them to an injected [`EffectSink`]. The sink owning an actual audio
//! backend is an external collaborator; the library ships only [`NullSink`].

/// Moments a front-end may want to accompany with a sound or animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GameEffect {
    CardShuffle,
    CardDeal,
    ChipsBet,
    ButtonClick,
    Fold,
    Check,
    Call,
    Raise,
    GameWin,
    GameLose,
}

/// Receives effect events. Implementations must be cheap and must not block;
/// the table loop calls this synchronously.
pub trait EffectSink {
    fn play(&mut self, effect: GameEffect);
}

/// Discards every event. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn play(&mut self, _effect: GameEffect) {}
}

/// Records events in order; handy for asserting on effect emission.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<GameEffect>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEffect] {
        &self.events
    }
}

impl EffectSink for RecordingSink {
    fn play(&mut self, effect: GameEffect) {
        self.events.push(effect);
    }
}
