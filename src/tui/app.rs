use crate::agents::{hand_strength, AgentTable, HeuristicAgent, HumanAgent};
use crate::effects::{EffectSink, GameEffect, NullSink};
use crate::evaluator::evaluate_best;
use crate::game::{Action, ActionKind, Game, GameConfig, LogVerb, PlayerId};
use crate::tui::storage::TutorialMarker;
use std::time::{Duration, Instant};

/// Seat 0 is always the human.
pub const HUMAN_SEAT: PlayerId = PlayerId(0);

/// Pacing defaults lifted from the original UI: a 1 s thinking pause for the
/// AI and a 10 s failsafe.
const AI_THINK_MS: u64 = 1000;
const AI_FAILSAFE_MS: u64 = 10_000;

/// First-launch tutorial pages. The last page renders the hand rankings.
pub const TUTORIAL_STEPS: [(&str, &str); 5] = [
    (
        "ポーカーへようこそ！",
        "テキサスホールデムポーカーの基本を学びましょう。このゲームは世界中で愛されているカードゲームです。",
    ),
    (
        "基本ルール",
        "各プレイヤーは2枚の手札を受け取ります。5枚のコミュニティカード（共通カード）と合わせて、最強の5枚のポーカーハンドを作ることが目標です。",
    ),
    (
        "ゲームの流れ",
        "1. プリフロップ: 手札2枚が配られる\n2. フロップ: コミュニティカード3枚が公開\n3. ターン: 4枚目のコミュニティカードが公開\n4. リバー: 5枚目のコミュニティカードが公開\n5. ショーダウン: 残ったプレイヤーが手札を公開",
    ),
    (
        "アクションの種類",
        "• フォールド: ゲームから降りる\n• チェック: ベットせずにパス（ベットがない場合のみ）\n• コール: 相手のベットに合わせる\n• レイズ: ベット額を上げる\n• オールイン: 全てのチップを賭ける",
    ),
    ("ポーカーハンドランキング（強い順）", ""),
];

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewGame,
    Fold,
    CheckCall,
    AllIn,
    RaiseOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountIncBb,
    AmountDecBb,
    AmountSubmit,
    AmountCancel,
    TutorialNext,
    TutorialPrev,
    TutorialClose,
}

pub struct AppState {
    pub game: Game,
    pub agents: AgentTable,
    config: GameConfig,
    dealer: usize,
    effects: Box<dyn EffectSink>,
    tutorial: TutorialMarker,
    tutorial_step: Option<usize>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
    seen_log: usize,
    result_announced: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Box::new(NullSink), TutorialMarker::default_location())
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn new(effects: Box<dyn EffectSink>, tutorial: TutorialMarker) -> Self {
        let config = GameConfig::default();
        let game = Game::with_dealer(config, 0);
        let mut agents = AgentTable::for_seats(game.players().len());
        for p in game.players() {
            if p.is_ai() {
                agents.set_agent(p.id(), Some(Box::new(HeuristicAgent::new())));
            } else {
                agents.set_agent(p.id(), Some(Box::new(HumanAgent::new())));
            }
        }
        agents.set_think_delay_ms(AI_THINK_MS);
        agents.set_failsafe_ms(AI_FAILSAFE_MS);
        let tutorial_step = if tutorial.seen() { None } else { Some(0) };
        let seen_log = game.history_len();
        Self {
            game,
            agents,
            config,
            dealer: 0,
            effects,
            tutorial,
            tutorial_step,
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            action_error: None,
            action_error_at: None,
            seen_log,
            result_announced: false,
        }
    }

    // --- overlay accessors -------------------------------------------------

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn tutorial_step(&self) -> Option<usize> {
        self.tutorial_step
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Strength hint for the human seat: the heuristic estimate plus, once
    /// community cards exist, the best makeable category label.
    pub fn human_strength(&self) -> Option<(f64, Option<&'static str>)> {
        let player = self.game.player(HUMAN_SEAT)?;
        if player.folded() {
            return None;
        }
        let hole = player.hole()?;
        let board = self.game.board();
        let strength = hand_strength(&hole, board);
        let label = if board.is_empty() {
            None
        } else {
            let mut cards = hole.as_array().to_vec();
            cards.extend_from_slice(board.as_slice());
            evaluate_best(&cards).ok().map(|e| e.description())
        };
        Some((strength, label))
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    // --- input -------------------------------------------------------------

    /// Handle one input action. Returns true when a game action was queued
    /// (the controller then drives the agents immediately).
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleHelp => {
                self.history_open = false;
                self.help_open = !self.help_open;
                false
            }
            InputAction::ToggleHistory => {
                self.help_open = false;
                if !self.history_open {
                    self.history_offset = 0;
                }
                self.history_open = !self.history_open;
                false
            }
            InputAction::HistoryUp => {
                if self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::NewGame => {
                self.new_game();
                false
            }
            InputAction::Fold => self.queue_action(Action::Fold, GameEffect::ButtonClick),
            InputAction::CheckCall => {
                let action = if self.game.to_call(HUMAN_SEAT) == 0 {
                    Action::Check
                } else {
                    Action::Call
                };
                self.queue_action(action, GameEffect::ButtonClick)
            }
            InputAction::AllIn => self.queue_action(Action::AllIn, GameEffect::ButtonClick),
            InputAction::RaiseOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                if let Some(buf) = self.amount_entry.as_mut() {
                    buf.pop();
                }
                self.amount_entry_error = None;
                false
            }
            InputAction::AmountIncBb => {
                self.amount_entry_adjust_bb(1);
                false
            }
            InputAction::AmountDecBb => {
                self.amount_entry_adjust_bb(-1);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry = None;
                self.amount_entry_error = None;
                false
            }
            InputAction::TutorialNext => {
                match self.tutorial_step {
                    Some(step) if step + 1 < TUTORIAL_STEPS.len() => {
                        self.tutorial_step = Some(step + 1);
                    }
                    Some(_) => self.close_tutorial(),
                    None => {}
                }
                false
            }
            InputAction::TutorialPrev => {
                if let Some(step) = self.tutorial_step {
                    self.tutorial_step = Some(step.saturating_sub(1));
                }
                false
            }
            InputAction::TutorialClose => {
                self.close_tutorial();
                false
            }
        }
    }

    fn close_tutorial(&mut self) {
        if self.tutorial_step.take().is_some() {
            self.tutorial.mark_seen();
        }
    }

    fn can_act_for_human(&self) -> bool {
        !self.game.game_over() && self.game.current() == HUMAN_SEAT
    }

    fn queue_action(&mut self, action: Action, effect: GameEffect) -> bool {
        if !self.can_act_for_human() {
            return false;
        }
        self.clear_action_error();
        self.effects.play(effect);
        self.agents.receive(HUMAN_SEAT, action)
    }

    fn open_amount_entry(&mut self) -> bool {
        if !self.can_act_for_human() || !self.game.can_perform(HUMAN_SEAT, ActionKind::Raise) {
            return false;
        }
        self.amount_entry = Some(self.game.min_raise_to().to_string());
        self.amount_entry_error = None;
        false
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() < 12 {
                buf.push(char::from(b'0' + digit));
            }
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_adjust_bb(&mut self, delta: i64) {
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<i64>().unwrap_or(0);
            let step = self.game.big_blind().max(1) as i64;
            let next = (cur + delta * step).max(0);
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_ref() else {
            return false;
        };
        let amount = match buf.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                self.amount_entry_error = Some("金額が不正です".to_string());
                return false;
            }
        };
        let min = self.game.min_raise_to();
        if amount < min {
            self.amount_entry_error = Some(format!("最低レイズ額は {min} です"));
            return false;
        }
        let max = self
            .game
            .player(HUMAN_SEAT)
            .map(|p| p.chips() + p.bet())
            .unwrap_or(0);
        if amount > max {
            self.amount_entry_error = Some(format!("最大レイズ額は {max} です"));
            return false;
        }
        if self.queue_action(Action::Raise { to: amount }, GameEffect::ChipsBet) {
            self.amount_entry = None;
            self.amount_entry_error = None;
            return true;
        }
        self.amount_entry_error = Some("今はレイズできません".to_string());
        false
    }

    // --- game lifecycle ----------------------------------------------------

    /// Start the next hand: rotate the dealer, fresh stacks, new shuffled deck.
    /// Only allowed once the current hand is over.
    pub fn new_game(&mut self) {
        if !self.game.game_over() {
            return;
        }
        self.dealer = (self.dealer + 1) % self.game.players().len();
        self.game = Game::with_dealer(self.config, self.dealer);
        self.seen_log = self.game.history_len();
        self.history_offset = 0;
        self.result_announced = false;
        self.clear_action_error();
        self.effects.play(GameEffect::CardShuffle);
        self.effects.play(GameEffect::CardDeal);
    }

    /// One tick of the agent loop: expire stale errors, drive the agent whose
    /// turn it is, and emit effects for whatever happened.
    pub fn agents_on_turn(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.game) {
            Ok(true) => self.clear_action_error(),
            Ok(false) => {}
            Err(err) => {
                self.action_error = Some(err.to_string());
                self.action_error_at = Some(Instant::now());
            }
        }
        self.pump_effects();
    }

    /// Translate new hand-log entries into effect events.
    fn pump_effects(&mut self) {
        let len = self.game.history_len();
        if len <= self.seen_log {
            return;
        }
        let fresh: Vec<LogVerb> = self
            .game
            .history_recent(len - self.seen_log)
            .iter()
            .map(|e| e.verb)
            .collect();
        self.seen_log = len;
        for verb in fresh {
            let effect = match verb {
                LogVerb::SmallBlind | LogVerb::BigBlind | LogVerb::AllIn => GameEffect::ChipsBet,
                LogVerb::Fold => GameEffect::Fold,
                LogVerb::Check => GameEffect::Check,
                LogVerb::Call => GameEffect::Call,
                LogVerb::RaiseTo => GameEffect::Raise,
                LogVerb::Win | LogVerb::Split => continue,
            };
            self.effects.play(effect);
        }
        if self.game.game_over() && !self.result_announced {
            self.result_announced = true;
            let won = self.game.winners().contains(&HUMAN_SEAT);
            self.effects.play(if won { GameEffect::GameWin } else { GameEffect::GameLose });
        }
    }
}
