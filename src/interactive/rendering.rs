//! TUI rendering with ratatui
//!
//! Board, keyboard and glitch panels for the game interface.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Status, WORD_LENGTH};
use crate::game::{Phase, TileMark};
use crate::glitch::{DiceRoll, Glitch, SingleFalseFeedback};
use crate::output::formatters::{KEYBOARD_ROWS, percent_bar};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Message line
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Board + keyboard
            Constraint::Percentage(45), // Glitch panel
        ])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(main_chunks[0]);

    render_board(f, app, left[0]);
    render_keyboard(f, app, left[1]);
    render_glitch_panel(f, app, main_chunks[1]);
    render_message(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.session.config().title().as_str() {
        "Classic" => "🎯 GLITCHDLE - Classic".to_string(),
        other => format!("👾 {}", other.to_uppercase()),
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

const fn status_color(status: Status) -> Color {
    match status {
        Status::Green => Color::Green,
        Status::Yellow => Color::Yellow,
        Status::Gray => Color::DarkGray,
    }
}

fn tile_style(status: Status, mark: TileMark) -> Style {
    let style = Style::default()
        .fg(Color::Black)
        .bg(status_color(status))
        .add_modifier(Modifier::BOLD);

    match mark {
        TileMark::Plain => style,
        TileMark::Checked => style.add_modifier(Modifier::DIM),
        TileMark::Verified => style.add_modifier(Modifier::UNDERLINED),
        TileMark::GlitchDetected => style.fg(Color::Magenta),
        TileMark::Corrected => style.add_modifier(Modifier::ITALIC | Modifier::UNDERLINED),
    }
}

/// First board row to draw so the active row stays visible
fn first_visible_row(app: &App, visible: usize, total: usize) -> usize {
    let focus = match app.input_mode {
        InputMode::Detector => app.cursor.row,
        InputMode::Typing => app.session.current_row().min(total.saturating_sub(1)),
    };
    let start = (focus + 1).saturating_sub(visible);
    start.min(total.saturating_sub(visible))
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let total = session.config().max_guesses;
    let visible = usize::from(area.height.saturating_sub(2)).max(1);
    let start = first_visible_row(app, visible, total);
    let dice = session.glitch().and_then(Glitch::as_dice_roll);

    let mut lines = Vec::with_capacity(visible);
    for row in start..(start + visible).min(total) {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row + 1),
            Style::default().fg(Color::DarkGray),
        )];

        if let Some(board_row) = session.rows().get(row) {
            for position in 0..WORD_LENGTH {
                let letter = char::from(board_row.guess.char_at(position)).to_ascii_uppercase();
                let mut style = tile_style(
                    board_row.feedback[position],
                    session.tile_mark(row, position),
                );
                if app
                    .reveal
                    .is_some_and(|r| r.row == row && r.position == position)
                {
                    style = style.bg(Color::Magenta).fg(Color::White);
                }
                if app.input_mode == InputMode::Detector
                    && app.cursor.row == row
                    && app.cursor.position == position
                {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!(" {letter} "), style));
                spans.push(Span::raw(" "));
            }

            if let Some(turn) = dice.and_then(|d| d.turn_for_row(row)) {
                let [zero, one, two] = turn.rolls.faces();
                spans.push(Span::styled(
                    format!(" 🎲 {zero}{one}{two}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
        } else if row == session.current_row() && session.phase() == Phase::AwaitingInput {
            let typed: Vec<char> = session.buffer().chars().collect();
            for position in 0..WORD_LENGTH {
                let letter = typed
                    .get(position)
                    .map_or(' ', |c| c.to_ascii_uppercase());
                spans.push(Span::styled(
                    format!(" {letter} "),
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Rgb(58, 58, 60))
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(" "));
            }
        } else {
            for _ in 0..WORD_LENGTH {
                spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(" "));
            }
        }

        lines.push(Line::from(spans));
    }

    let title = format!(
        " Board | Guess {}/{} ",
        (session.current_row() + 1).min(total),
        total
    );
    let board = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, app: &App, area: Rect) {
    let keys = app.session.keys();
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let mut spans = vec![Span::raw(" ".repeat(indent * 2))];
            for letter in row.bytes() {
                let label = format!(" {} ", char::from(letter).to_ascii_uppercase());
                let style = match keys.get(letter) {
                    Some(Status::Gray) => Style::default().fg(Color::DarkGray),
                    Some(status) => Style::default()
                        .fg(Color::Black)
                        .bg(status_color(status))
                        .add_modifier(Modifier::BOLD),
                    None => Style::default().fg(Color::White),
                };
                spans.push(Span::styled(label, style));
            }
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Keyboard ").borders(Borders::ALL));
    f.render_widget(keyboard, area);
}

fn render_glitch_panel(f: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.session.glitch() {
        None => (
            " Classic ".to_string(),
            vec![
                Line::from("Honest feedback, six guesses."),
                Line::from(""),
                Line::from("F1 switches to Glitchdle, where the"),
                Line::from("feedback cannot always be trusted."),
            ],
        ),
        Some(Glitch::TimedCorrect(_)) => (" ⏱ Timed Correct ".to_string(), timed_lines()),
        Some(Glitch::SingleFalse(single)) => {
            (" 🔍 Single False ".to_string(), single_false_lines(app, single))
        }
        Some(Glitch::DiceRoll(dice)) => (" 🎲 Dice Roll ".to_string(), dice_lines(app, dice)),
    };

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn timed_lines() -> Vec<Line<'static>> {
    vec![
        Line::from("One tile of every guess is wrong."),
        Line::from("It is corrected after your next guess."),
        Line::from(""),
        Line::from(Span::styled(
            "Underlined italic = corrected tile",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn single_false_lines(app: &App, single: &SingleFalseFeedback) -> Vec<Line<'static>> {
    let info = single.detector_info();
    let mut lines = vec![
        Line::from("One tile of every guess is wrong,"),
        Line::from("and it stays wrong."),
        Line::from(""),
    ];

    if info.hard_mode {
        lines.push(Line::from(Span::styled(
            "Detectors disabled in Hard Mode",
            Style::default().fg(Color::Red),
        )));
    } else {
        let pips = format!(
            "{}{}",
            "●".repeat(info.remaining),
            "○".repeat(info.max - info.remaining)
        );
        lines.push(Line::from(vec![
            Span::raw("Detectors: "),
            Span::styled(pips, Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {}/{} left", info.remaining, info.max)),
        ]));
    }

    lines.push(Line::from(""));
    if app.input_mode == InputMode::Detector {
        let cursor = app.cursor;
        lines.push(Line::from(Span::styled(
            format!(
                "Selected: row {} tile {} | Enter probes",
                cursor.row + 1,
                cursor.position + 1
            ),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from("Tab: choose a tile to check"));
    }
    lines.push(Line::from(Span::styled(
        "Underlined = verified, dim = row checked",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn dice_lines(app: &App, dice: &DiceRoll) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Three dice decide how many tiles"),
        Line::from("(0, 1 or 2) of each guess are wrong."),
        Line::from(""),
    ];

    if app.dice_rolling() {
        lines.push(Line::from(Span::styled(
            "🎲 Rolling...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        return lines;
    }

    match dice.last_turn() {
        Some(turn) => {
            let [zero, one, two] = turn.rolls.faces();
            lines.push(Line::from(format!(
                "Last roll  Zero:{zero}  One:{one}  Two:{two}"
            )));
            for (label, pct) in ["0 wrong", "1 wrong", "2 wrong"]
                .iter()
                .zip(turn.odds.as_array())
            {
                lines.push(Line::from(format!(
                    "{label} [{}] {pct:3}%",
                    percent_bar(pct, 16)
                )));
            }
        }
        None => lines.push(Line::from("No dice rolled yet")),
    }

    lines.push(Line::from(""));
    if dice.hard_mode() {
        lines.push(Line::from(Span::styled(
            "Hard Mode: tile odds hidden",
            Style::default().fg(Color::Red),
        )));
    } else if app.input_mode == InputMode::Detector {
        let cursor = app.cursor;
        match app.session.status_odds(cursor.row, cursor.position) {
            Some(odds) => {
                lines.push(Line::from(format!(
                    "Row {} tile {} is really:",
                    cursor.row + 1,
                    cursor.position + 1
                )));
                for status in [Status::Green, Status::Yellow, Status::Gray] {
                    lines.push(Line::from(vec![
                        Span::styled("  ■ ", Style::default().fg(status_color(status))),
                        Span::raw(format!("{:<7}{:3}%", status.name(), odds.get(status))),
                    ]));
                }
            }
            None => lines.push(Line::from("No odds for this tile")),
        }
    } else {
        lines.push(Line::from("Tab: inspect tile odds"));
    }
    lines
}

fn render_message(f: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.message {
        Some(msg) => (
            msg.text.as_str(),
            match msg.style {
                MessageStyle::Info => Color::White,
                MessageStyle::Success => Color::Green,
                MessageStyle::Warning => Color::Yellow,
                MessageStyle::Error => Color::Red,
            },
        ),
        None => ("", Color::White),
    };

    let message = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
    f.render_widget(message, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let mode_text = match app.input_mode {
        InputMode::Typing => "Mode: Typing",
        InputMode::Detector => "Mode: Select tile",
    };
    let mode = Paragraph::new(mode_text).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        if app.stats.total_games > 0 {
            app.stats.games_won as f64 / app.stats.total_games as f64 * 100.0
        } else {
            0.0
        }
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let help_text = match app.input_mode {
        InputMode::Typing => {
            "Enter: Submit | Tab: Tiles | F1: Classic/Glitch | F2: Strategy | F3: Hard | ^N: New | Esc: Quit"
        }
        InputMode::Detector => "Arrows: Select | Enter: Check | Tab/Esc: Back",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
