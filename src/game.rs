use crate::deck::Deck;
use crate::evaluator::{evaluate_holdem, Category};
use crate::hand::{Board, HoleCards};
use rand::Rng;
use std::fmt;

/// Stable seat identifier. Seat 0 is the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Betting streets, strictly forward: no phase ever moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    pub const fn label(self) -> &'static str {
        match self {
            Phase::PreFlop => "プリフロップ",
            Phase::Flop => "フロップ",
            Phase::Turn => "ターン",
            Phase::River => "リバー",
            Phase::Showdown => "ショーダウン",
        }
    }
}

/// A player's move. `Raise` carries the target total for the round,
/// not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise { to: u64 },
    AllIn,
}

impl Action {
    pub const fn kind(self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Raise { .. } => ActionKind::Raise,
            Action::AllIn => ActionKind::AllIn,
        }
    }
}

/// Amount-free action discriminant, used by the UI to probe legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("{0} has already folded")]
    PlayerFolded(PlayerId),
    #[error("not {got}'s turn (waiting on {expected})")]
    OutOfTurn { expected: PlayerId, got: PlayerId },
    #[error("the hand is over")]
    HandOver,
    #[error("cannot check: {to_call} to call")]
    CheckNotAllowed { to_call: u64 },
    #[error("raise too small: min {min}, got {got}")]
    RaiseTooSmall { min: u64, got: u64 },
    #[error("raise too large: max {max}, got {got}")]
    RaiseTooLarge { max: u64, got: u64 },
    #[error("{0} has no chips left")]
    OutOfChips(PlayerId),
}

/// Verbs recorded in the hand log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    RaiseTo,
    AllIn,
    Win,
    Split,
}

impl LogVerb {
    pub fn label(self) -> &'static str {
        match self {
            LogVerb::SmallBlind => "SB",
            LogVerb::BigBlind => "BB",
            LogVerb::Fold => "Fold",
            LogVerb::Check => "Check",
            LogVerb::Call => "Call",
            LogVerb::RaiseTo => "Raise to",
            LogVerb::AllIn => "All-in",
            LogVerb::Win => "Win",
            LogVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct LogEntry {
    pub seat: PlayerId,
    pub verb: LogVerb,
    pub amount: Option<u64>,
    pub phase: Phase,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) chips: u64,
    pub(crate) bet: u64,
    pub(crate) folded: bool,
    pub(crate) is_ai: bool,
    pub(crate) acted: bool,
    pub(crate) last_action: Option<String>,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The player's private hole cards, dealt at hand start.
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Remaining stack.
    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips committed in the current betting round.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// All chips in, still holding cards.
    pub fn all_in(&self) -> bool {
        !self.folded && self.chips == 0
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }
}

/// Table parameters. Defaults mirror the classic lobby: 1000 chips, 25/50 blinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub starting_chips: u64,
    pub small_blind: u64,
    pub big_blind: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { starting_chips: 1000, small_blind: 25, big_blind: 50 }
    }
}

/// Default seat roster: the human first, then the two AI opponents.
const SEAT_NAMES: [(&str, bool); 3] =
    [("あなた", false), ("アグレッシブ・アキラ", true), ("コンサバ・ユミ", true)];

/// One hand of three-handed Hold'em: the aggregate root owning players, board,
/// pot and turn order. Created per hand, mutated by each action, replaced when
/// a new hand starts.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) deck: Deck,
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    pub(crate) pot: u64,
    pub(crate) dealer: usize,
    pub(crate) current: usize,
    pub(crate) phase: Phase,
    pub(crate) current_bet: u64,
    /// Seat of the most recent raiser this round; `None` until someone raises.
    pub(crate) last_aggressor: Option<usize>,
    pub(crate) game_over: bool,
    pub(crate) winners: Vec<usize>,
    pub(crate) showdown_categories: Vec<Option<Category>>,
    log: Vec<LogEntry>,
}

impl Game {
    /// Start a hand with the default roster and a freshly shuffled deck.
    pub fn new(config: GameConfig) -> Self {
        Self::with_dealer(config, 0)
    }

    /// Start a hand with the dealer button at `dealer` (front-ends rotate it
    /// between games).
    pub fn with_dealer(config: GameConfig, dealer: usize) -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(config, dealer, seed)
    }

    /// Start a hand with a deterministic deck order. Used by tests.
    pub fn seeded(config: GameConfig, dealer: usize, seed: u64) -> Self {
        let players: Vec<Player> = SEAT_NAMES
            .iter()
            .enumerate()
            .map(|(i, &(name, is_ai))| Player {
                id: PlayerId(i),
                name: name.to_string(),
                hole: None,
                chips: config.starting_chips,
                bet: 0,
                folded: false,
                is_ai,
                acted: false,
                last_action: None,
            })
            .collect();
        let n = players.len();
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);
        let mut game = Self {
            config,
            deck,
            board: Board::empty(),
            players,
            pot: 0,
            dealer: dealer % n,
            current: 0,
            phase: Phase::PreFlop,
            current_bet: 0,
            last_aggressor: None,
            game_over: false,
            winners: Vec::new(),
            showdown_categories: vec![None; n],
            log: Vec::new(),
        };
        game.deal_hole_cards();
        game.post_blinds();
        game
    }

    fn deal_hole_cards(&mut self) {
        for p in &mut self.players {
            if let (Some(a), Some(b)) = (self.deck.draw(), self.deck.draw()) {
                if let Ok(hole) = HoleCards::try_new(a, b) {
                    p.hole = Some(hole);
                }
            }
        }
    }

    fn post_blinds(&mut self) {
        let n = self.players.len();
        let sb_pos = (self.dealer + 1) % n;
        let bb_pos = (self.dealer + 2) % n;
        for (pos, blind, verb) in [
            (sb_pos, self.config.small_blind, LogVerb::SmallBlind),
            (bb_pos, self.config.big_blind, LogVerb::BigBlind),
        ] {
            let p = &mut self.players[pos];
            let paid = p.chips.min(blind);
            p.chips -= paid;
            p.bet += paid;
            p.last_action = Some(format!("{} {}", verb.label(), paid));
            self.pot += paid;
            self.record(PlayerId(pos), verb, Some(paid));
        }
        self.current_bet = self.players[bb_pos].bet;
        // Blinds are forced bets: both blind seats still owe a decision, so the
        // big blind keeps its option when everyone just calls.
        self.last_aggressor = Some(bb_pos);
        self.current = (bb_pos + 1) % n;
    }

    // --- queries -----------------------------------------------------------

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dealer(&self) -> PlayerId {
        PlayerId(self.dealer)
    }

    /// Whose turn it is right now.
    pub fn current(&self) -> PlayerId {
        PlayerId(self.current)
    }

    /// The table's highest committed bet this round.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Seat of the most recent raiser this round (the big blind counts as the
    /// opening aggressor pre-flop). `None` once a round opens unraised.
    pub fn last_aggressor(&self) -> Option<PlayerId> {
        self.last_aggressor.map(PlayerId)
    }

    pub fn small_blind(&self) -> u64 {
        self.config.small_blind
    }

    pub fn big_blind(&self) -> u64 {
        self.config.big_blind
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Winners of the hand once it is over, in payout order.
    pub fn winners(&self) -> Vec<PlayerId> {
        self.winners.iter().map(|&i| PlayerId(i)).collect()
    }

    /// First winner, if the hand is decided.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winners.first().map(|&i| PlayerId(i))
    }

    /// Showdown category per seat (None for folded seats or uncontested wins).
    pub fn showdown_categories(&self) -> &[Option<Category>] {
        &self.showdown_categories
    }

    /// Chips the seat must add to stay in the hand.
    pub fn to_call(&self, id: PlayerId) -> u64 {
        self.players.get(id.0).map_or(0, |p| self.current_bet.saturating_sub(p.bet))
    }

    /// Minimum legal raise target: double the table bet, floored at the big
    /// blind so an unopened pot cannot be "raised" to zero.
    pub fn min_raise_to(&self) -> u64 {
        (self.current_bet * 2).max(self.config.big_blind)
    }

    /// Every chip on the table: the pot plus all stacks. Constant across a
    /// hand (bets move chips into the pot the moment they are committed).
    pub fn total_chips(&self) -> u64 {
        self.pot + self.players.iter().map(|p| p.chips).sum::<u64>()
    }

    pub fn history_len(&self) -> usize {
        self.log.len()
    }

    pub fn history_recent(&self, n: usize) -> &[LogEntry] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> &[LogEntry] {
        if n == 0 || self.log.is_empty() {
            return &[];
        }
        let len = self.log.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        &self.log[start..end]
    }

    /// Whether `id` could legally take an action of the given kind right now.
    /// Pure predicate; the UI uses it to enable and disable buttons.
    pub fn can_perform(&self, id: PlayerId, kind: ActionKind) -> bool {
        if self.game_over || self.phase == Phase::Showdown {
            return false;
        }
        let Some(p) = self.players.get(id.0) else {
            return false;
        };
        if p.folded || id.0 != self.current {
            return false;
        }
        let to_call = self.current_bet.saturating_sub(p.bet);
        match kind {
            ActionKind::Fold => true,
            ActionKind::Check => to_call == 0,
            ActionKind::Call => to_call > 0 && p.chips > 0,
            ActionKind::Raise => p.chips + p.bet >= self.min_raise_to(),
            ActionKind::AllIn => p.chips > 0,
        }
    }

    // --- actions -----------------------------------------------------------

    /// Validate and apply one player action, then advance the turn (or the
    /// phase, or finish the hand). State is untouched unless every check
    /// passes.
    pub fn execute_action(&mut self, id: PlayerId, action: Action) -> Result<(), ActionError> {
        if self.game_over || self.phase == Phase::Showdown {
            return Err(ActionError::HandOver);
        }
        let seat = id.0;
        let p = self.players.get(seat).ok_or(ActionError::UnknownPlayer(id))?;
        if p.folded {
            return Err(ActionError::PlayerFolded(id));
        }
        if seat != self.current {
            return Err(ActionError::OutOfTurn { expected: PlayerId(self.current), got: id });
        }
        let to_call = self.current_bet.saturating_sub(p.bet);
        // All validation first; nothing below this match may fail.
        match action {
            Action::Fold | Action::Call => {}
            Action::Check => {
                if to_call > 0 {
                    return Err(ActionError::CheckNotAllowed { to_call });
                }
            }
            Action::Raise { to } => {
                let min = self.min_raise_to();
                if to < min {
                    return Err(ActionError::RaiseTooSmall { min, got: to });
                }
                let max = p.chips + p.bet;
                if to > max {
                    return Err(ActionError::RaiseTooLarge { max, got: to });
                }
            }
            Action::AllIn => {
                if p.chips == 0 {
                    return Err(ActionError::OutOfChips(id));
                }
            }
        }

        match action {
            Action::Fold => {
                let p = &mut self.players[seat];
                p.folded = true;
                p.last_action = Some("フォールド".to_string());
                self.record(id, LogVerb::Fold, None);
            }
            Action::Check => {
                self.players[seat].last_action = Some("チェック".to_string());
                self.record(id, LogVerb::Check, None);
            }
            Action::Call => {
                // Short stacks call for less: an implicit all-in.
                let p = &mut self.players[seat];
                let pay = to_call.min(p.chips);
                p.chips -= pay;
                p.bet += pay;
                p.last_action = Some(format!("コール {pay}"));
                self.pot += pay;
                self.record(id, LogVerb::Call, Some(pay));
            }
            Action::Raise { to } => {
                let p = &mut self.players[seat];
                let need = to - p.bet;
                p.chips -= need;
                p.bet = to;
                p.last_action = Some(format!("レイズ {to}"));
                self.pot += need;
                self.current_bet = to;
                self.reopen_betting(seat);
                self.record(id, LogVerb::RaiseTo, Some(to));
            }
            Action::AllIn => {
                let p = &mut self.players[seat];
                let pay = p.chips;
                p.chips = 0;
                p.bet += pay;
                let new_bet = p.bet;
                p.last_action = Some(format!("オールイン {new_bet}"));
                self.pot += pay;
                if new_bet > self.current_bet {
                    self.current_bet = new_bet;
                    self.reopen_betting(seat);
                }
                self.record(id, LogVerb::AllIn, Some(new_bet));
            }
        }
        self.players[seat].acted = true;

        // A lone survivor takes the pot without a showdown.
        if self.live_count() == 1 {
            self.resolve_showdown();
            return Ok(());
        }

        if self.round_complete() {
            self.advance_phase();
        } else {
            self.advance_turn();
        }
        Ok(())
    }

    /// A raise re-opens the round: everyone but the raiser owes a decision.
    fn reopen_betting(&mut self, raiser: usize) {
        self.last_aggressor = Some(raiser);
        for (i, p) in self.players.iter_mut().enumerate() {
            if i != raiser {
                p.acted = false;
            }
        }
    }

    fn live_count(&self) -> usize {
        self.players.iter().filter(|p| !p.folded).count()
    }

    /// Seats that still have a decision to make: unfolded and holding chips.
    fn can_still_act(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        !p.folded && p.chips > 0
    }

    fn next_actor_from(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        let mut i = (start + 1) % n;
        for _ in 0..n {
            if self.can_still_act(i) {
                return Some(i);
            }
            i = (i + 1) % n;
        }
        None
    }

    fn advance_turn(&mut self) {
        match self.next_actor_from(self.current) {
            Some(next) => self.current = next,
            // Everyone left is all-in: nothing more to decide, run the board out.
            None => self.run_out_and_showdown(),
        }
    }

    /// The round closes when every live player with chips has acted since the
    /// most recent raise and matches the table bet. Chip-less players are
    /// along for the ride.
    fn round_complete(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.folded && p.chips > 0)
            .all(|p| p.acted && p.bet == self.current_bet)
    }

    fn advance_phase(&mut self) {
        for p in &mut self.players {
            p.bet = 0;
            p.acted = false;
            if !p.folded {
                p.last_action = None;
            }
        }
        self.current_bet = 0;
        self.last_aggressor = None;

        match self.phase {
            Phase::PreFlop => {
                let flop = self.deck.draw_n(3);
                self.board.extend(flop);
                self.phase = Phase::Flop;
            }
            Phase::Flop => {
                self.board.extend(self.deck.draw());
                self.phase = Phase::Turn;
            }
            Phase::Turn => {
                self.board.extend(self.deck.draw());
                self.phase = Phase::River;
            }
            Phase::River | Phase::Showdown => {
                self.resolve_showdown();
                return;
            }
        }

        // Post-flop action starts left of the dealer.
        match self.next_actor_from(self.dealer) {
            Some(first) => self.current = first,
            None => self.run_out_and_showdown(),
        }
    }

    /// Deal any missing community cards, then resolve. Reached when betting
    /// can no longer change anything (all remaining players all-in).
    fn run_out_and_showdown(&mut self) {
        while self.board.len() < 5 {
            match self.deck.draw() {
                Some(c) => self.board.extend([c]),
                None => break,
            }
        }
        self.resolve_showdown();
    }

    fn resolve_showdown(&mut self) {
        self.phase = Phase::Showdown;
        self.game_over = true;
        for p in &mut self.players {
            p.bet = 0;
        }

        let live: Vec<usize> =
            self.players.iter().enumerate().filter(|(_, p)| !p.folded).map(|(i, _)| i).collect();

        // Uncontested: the last player standing takes the pot, cards stay down.
        if live.len() <= 1 {
            if let Some(&i) = live.first() {
                let amount = self.pot;
                self.players[i].chips += amount;
                self.players[i].last_action = Some(format!("{} 獲得", amount));
                self.record(PlayerId(i), LogVerb::Win, Some(amount));
                self.winners = vec![i];
            }
            self.pot = 0;
            return;
        }

        if self.board.len() < 5 {
            let missing = 5 - self.board.len();
            let cards = self.deck.draw_n(missing);
            self.board.extend(cards);
        }

        let mut best: Vec<usize> = Vec::new();
        let mut best_rank = None;
        for &i in &live {
            let Some(hole) = self.players[i].hole else {
                continue;
            };
            let Ok(ev) = evaluate_holdem(&hole, &self.board) else {
                continue;
            };
            self.showdown_categories[i] = Some(ev.category);
            match best_rank {
                Some(r) if ev.rank() < r => {}
                Some(r) if ev.rank() == r => best.push(i),
                _ => {
                    best_rank = Some(ev.rank());
                    best = vec![i];
                }
            }
        }
        if best.is_empty() {
            return;
        }

        // Split the pot; the remainder goes out one chip at a time in seat
        // order from the first winner after the dealer, so nothing vanishes.
        let n = self.players.len();
        let start = (self.dealer + 1) % n;
        best.sort_by_key(|&i| (i + n - start) % n);
        let share = self.pot / best.len() as u64;
        let mut rem = (self.pot % best.len() as u64) as usize;
        let split = best.len() > 1;
        for &i in &best {
            let mut amount = share;
            if rem > 0 {
                amount += 1;
                rem -= 1;
            }
            self.players[i].chips += amount;
            self.players[i].last_action = Some(format!("{} 獲得", amount));
            let verb = if split { LogVerb::Split } else { LogVerb::Win };
            self.record(PlayerId(i), verb, Some(amount));
        }
        self.pot = 0;
        self.winners = best;
    }

    fn record(&mut self, seat: PlayerId, verb: LogVerb, amount: Option<u64>) {
        self.log.push(LogEntry { seat, verb, amount, phase: self.phase });
    }
}
