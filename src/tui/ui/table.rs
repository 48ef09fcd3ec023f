use crate::evaluator::Category;
use crate::game::{ActionKind, Phase, Player};
use crate::tui::app::{AppState, HUMAN_SEAT, TUTORIAL_STEPS};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // board
            Constraint::Min(8),    // seats
            Constraint::Length(5), // status bar
        ])
        .split(size);

    draw_header(f, app, chunks[0]);
    draw_board(f, app, chunks[1]);
    draw_seats(f, app, chunks[2]);
    draw_status(f, app, chunks[3]);

    if app.tutorial_step().is_some() {
        draw_tutorial(f, app);
    } else if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let game = &app.game;
    let lines = vec![
        Line::from(format!(
            "SB: {}  BB: {}  BTN: {}  ポット: ${}",
            game.small_blind(),
            game.big_blind(),
            game.player(game.dealer()).map(|p| p.name()).unwrap_or("?"),
            game.pot(),
        )),
        Line::from(format!(
            "ベット: {}   コール額: {}   {}",
            game.current_bet(),
            game.to_call(HUMAN_SEAT),
            game.phase().label(),
        )),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().title("poker-dojo").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, app: &AppState, area: Rect) {
    let game = &app.game;
    let block = Block::default()
        .title(format!("コミュニティカード — {}", game.phase().label()))
        .borders(Borders::ALL);
    let board_inner = inner(area);
    let cards = game.board().as_slice();
    let card_width = board_inner.width.saturating_sub(2) / 5;
    let board_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(card_width); 5])
        .split(board_inner);
    f.render_widget(block, area);
    for i in 0..5 {
        let highlight = (matches!(game.phase(), Phase::Flop) && i < 3)
            || (matches!(game.phase(), Phase::Turn) && i == 3)
            || (matches!(game.phase(), Phase::River) && i == 4);
        render_card_widget(
            f,
            board_chunks[i],
            cards.get(i).copied(),
            if highlight { Some(Color::Yellow) } else { None },
        );
    }
}

fn draw_seats(f: &mut Frame, app: &AppState, area: Rect) {
    let players = app.game.players();
    let cols = players.len().max(1) as u16;
    let col_width = area.width / cols;
    let col_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..cols).map(|_| Constraint::Length(col_width)).collect::<Vec<_>>())
        .split(area);
    for (idx, p) in players.iter().enumerate() {
        render_player_card(f, col_chunks[idx], app, idx, p);
    }
}

fn render_player_card(f: &mut Frame, seat_area: Rect, app: &AppState, idx: usize, p: &Player) {
    let game = &app.game;
    let n = game.players().len();
    let dealer = game.dealer().index();
    let sb_pos = (dealer + 1) % n;
    let bb_pos = (dealer + 2) % n;

    let mut title = p.name().to_string();
    if idx == dealer {
        title.push_str(" [BTN]");
    }
    if idx == sb_pos {
        title.push_str(" [SB]");
    }
    if idx == bb_pos {
        title.push_str(" [BB]");
    }
    if p.is_ai() {
        title.push_str(" [AI]");
    }
    if p.all_in() {
        title.push_str(" [ALL-IN]");
    }
    if !game.game_over() && idx == game.current().index() {
        title.push_str(" [番]");
    }

    let status = if p.folded() {
        "フォールド"
    } else if p.all_in() {
        "オールイン"
    } else {
        "参加中"
    };
    let dim = Style::default().add_modifier(Modifier::DIM);
    let make_line = |label: &str, value: Option<String>| -> Line {
        if let Some(v) = value {
            Line::from(format!("{label}{v}"))
        } else {
            Line::from(vec![Span::raw(label.to_string()), Span::styled("--", dim)])
        }
    };
    let category_value = if matches!(game.phase(), Phase::Showdown) {
        game.showdown_categories().get(idx).and_then(|c| *c).map(|c| c.label().to_string())
    } else {
        None
    };
    let mut lines: Vec<Line> = Vec::with_capacity(5);
    lines.push(Line::from(format!("チップ: ${}", p.chips())));
    lines.push(Line::from(format!("ベット: {}", p.bet())));
    lines.push(Line::from(format!("状態: {status}")));
    lines.push(make_line("直前: ", p.last_action().map(|s| s.to_string())));
    lines.push(make_line("役: ", category_value));

    let mut block = Block::default().title(title).borders(Borders::ALL);
    if p.folded() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if matches!(game.phase(), Phase::Showdown)
        && game.winners().iter().any(|w| w.index() == idx)
    {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if p.all_in() {
        block = block.border_style(Style::default().fg(Color::LightRed));
    } else if !game.game_over() && idx == game.current().index() {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if idx == HUMAN_SEAT.index() {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    f.render_widget(block, seat_area);

    let seat_inner = inner(seat_area);
    let show_hole = idx == HUMAN_SEAT.index()
        || (matches!(game.phase(), Phase::Showdown) && !p.folded());
    let mut text_area = seat_inner;
    let mut cards_area: Option<Rect> = None;
    if show_hole && p.hole().is_some() && seat_inner.height > 3 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(seat_inner);
        text_area = split[0];
        cards_area = Some(split[1]);
    }
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, text_area);
    if let (Some(h), Some(area)) = (p.hole(), cards_area) {
        let cw = area.width.saturating_sub(2) / 2;
        let card_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(cw), Constraint::Length(cw)])
            .split(area);
        render_card_widget(f, card_chunks[0], Some(h.first()), Some(Color::Cyan));
        render_card_widget(f, card_chunks[1], Some(h.second()), Some(Color::Cyan));
    }
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    let game = &app.game;
    f.render_widget(Block::default().borders(Borders::ALL).title("操作"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let mut left: Vec<Line> = Vec::new();
    if let Some((strength, label)) = app.human_strength() {
        let pct = (strength * 100.0).round() as u32;
        let text = match label {
            Some(l) => format!("ハンド強度: {pct}%  ({l})"),
            None => format!("ハンド強度: {pct}%"),
        };
        let color = if strength > 0.6 {
            Color::Green
        } else if strength > 0.3 {
            Color::Yellow
        } else {
            Color::Red
        };
        left.push(Line::from(Span::styled(text, Style::default().fg(color))));
    }
    if game.game_over() {
        let verdict = match game.winner() {
            Some(w) if w == HUMAN_SEAT => "勝負あり — あなたの勝ち！".to_string(),
            Some(w) => format!(
                "勝負あり — {} の勝ち",
                game.player(w).map(|p| p.name()).unwrap_or("?")
            ),
            None => "勝負あり".to_string(),
        };
        left.push(Line::from(verdict));
        left.push(Line::from("Space: 次のゲーム • Q: 終了"));
    } else {
        let enabled = |kind: ActionKind| -> Style {
            if game.can_perform(HUMAN_SEAT, kind) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            }
        };
        let check_call = if game.to_call(HUMAN_SEAT) == 0 { ActionKind::Check } else { ActionKind::Call };
        left.push(Line::from(vec![
            Span::styled("F フォールド", enabled(ActionKind::Fold)),
            Span::raw(" • "),
            Span::styled("C チェック/コール", enabled(check_call)),
            Span::raw(" • "),
            Span::styled("R レイズ", enabled(ActionKind::Raise)),
            Span::raw(" • "),
            Span::styled("A オールイン", enabled(ActionKind::AllIn)),
        ]));
    }
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("エラー: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right = vec![Line::from(""), Line::from("? ヘルプ • H 履歴 • Q 終了")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_tutorial(f: &mut Frame, app: &AppState) {
    let Some(step) = app.tutorial_step() else {
        return;
    };
    let (title, content) = TUTORIAL_STEPS[step.min(TUTORIAL_STEPS.len() - 1)];
    let area = centered_rect(70, 80, f.area());
    let block = Block::default()
        .title(format!("{title}  ({}/{})", step + 1, TUTORIAL_STEPS.len()))
        .borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    if content.is_empty() {
        // Final page: the hand rankings, strongest first.
        for cat in Category::ALL.iter().rev() {
            lines.push(Line::from(cat.describe()));
        }
    } else {
        for part in content.split('\n') {
            lines.push(Line::from(part.trim().to_string()));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter/Space: 次へ • ←: 戻る • Esc: 閉じる",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("ヘルプ").borders(Borders::ALL);
    let mut lines = vec![
        Line::from(Span::styled("キー操作:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- Space: 次のゲーム（ショーダウン後）"),
        Line::from("- F: フォールド"),
        Line::from("- C: チェック / コール"),
        Line::from("- R: レイズ額入力（0-9, +/-, Enter, Esc）"),
        Line::from("- A: オールイン"),
        Line::from("- H: 履歴"),
        Line::from("- Q: 終了"),
        Line::from(""),
        Line::from(Span::styled(
            "ハンドランキング（強い順）:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for cat in Category::ALL.iter().rev() {
        lines.push(Line::from(cat.describe()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("閉じる: ? または Esc"));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("履歴").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("履歴はまだありません。"));
    } else {
        for entry in entries {
            let amount = entry.amount.map(|v| format!(" {v}")).unwrap_or_default();
            let name = app
                .game
                .player(entry.seat)
                .map(|p| p.name().to_string())
                .unwrap_or_else(|| entry.seat.to_string());
            lines.push(Line::from(format!(
                "{name} {}{amount} [{}]",
                entry.verb.label(),
                entry.phase.label()
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ スクロール • 閉じる: H または Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let min = app.game.min_raise_to();
    let current = app.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("金額: {current}")),
        Line::from(format!("最低: {min}")),
        Line::from("0-9 で入力、Backspace で削除"),
        Line::from("+/- はBB単位、Enter 決定、Esc キャンセル"),
    ];
    let block = Block::default().title("レイズ額").borders(Borders::ALL);
    let inner_area = inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, chunks[0]);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn render_card_widget(
    f: &mut Frame,
    area: Rect,
    card: Option<crate::cards::Card>,
    border: Option<Color>,
) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let content = if let Some(c) = card {
        let style = if c.suit().is_red() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(Span::styled(c.to_string(), style))
    } else {
        Line::from("[  ]")
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
