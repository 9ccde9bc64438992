use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::capabilities::{RandomSource, StatusLine};
use crate::game::{Game, GameOverCause, Phase};
use crate::leaderboard::Leaderboard;
use crate::store::KeyValueStore;

use super::canvas::{BoardView, Renderer};

/// Widest the leaderboard panel gets.
const LEADERBOARD_WIDTH: u16 = 28;

pub fn draw<R, S>(
    frame: &mut Frame,
    game: &Game<R, S, StatusLine>,
    renderer: Renderer,
    name_input: &str,
) where
    R: RandomSource,
    S: KeyValueStore,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board + leaderboard
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    frame.render_widget(header(game), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(LEADERBOARD_WIDTH)])
        .split(chunks[1]);

    let grid = game.board().grid_size();
    let board_area = centered(body[0], grid * 2 + 2, grid + 2);
    let title = match game.phase() {
        Phase::Idle => " Snake ",
        Phase::Running => " Playing ",
        Phase::GameOver { .. } => " Game Over ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(title);
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    frame.render_widget(
        BoardView {
            board: game.board(),
            renderer,
        },
        inner,
    );

    match game.phase() {
        Phase::Idle => overlay(frame, inner, name_prompt(name_input)),
        Phase::GameOver { cause, final_score } => {
            overlay(frame, inner, game_over(cause, final_score))
        }
        Phase::Running => {}
    }

    frame.render_widget(leaderboard_panel(game.leaderboard(), game.player_name()), body[1]);
    frame.render_widget(status(game.notifier()), chunks[2]);
}

fn header<R, S>(game: &Game<R, S, StatusLine>) -> Paragraph<'static>
where
    R: RandomSource,
    S: KeyValueStore,
{
    let player = if game.player_name().is_empty() {
        "-".to_string()
    } else {
        game.player_name().to_string()
    };
    let speed = game
        .tick_interval()
        .map(|i| format!("{}ms", i.as_millis()))
        .unwrap_or_else(|| "-".to_string());

    Paragraph::new(Line::from(vec![
        Span::styled("Player: ", Style::default().fg(Color::Yellow)),
        Span::raw(player),
        Span::raw("    "),
        Span::styled("Score: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            game.board().score().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
        Span::raw(speed),
    ]))
    .alignment(Alignment::Left)
    .block(Block::default().borders(Borders::ALL))
}

fn name_prompt(name_input: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{name_input}_"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press ENTER to start",
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn game_over(cause: GameOverCause, final_score: u32) -> Vec<Line<'static>> {
    let (headline, color) = match cause {
        GameOverCause::BoardFull => ("BOARD CLEARED", Color::Green),
        _ => ("GAME OVER", Color::Red),
    };
    vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Final Score: {final_score}")),
        Line::from(""),
        Line::from(Span::styled(
            "Press ENTER to continue",
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn overlay(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 2;
    let popup = centered(area, area.width, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

fn leaderboard_panel<'a>(leaderboard: &'a Leaderboard, current: &str) -> Paragraph<'a> {
    let mut lines = vec![Line::from("")];

    if leaderboard.entries().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No scores yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (rank, record) in leaderboard.entries().iter().enumerate() {
        let style = if record.name == current {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3}. ", rank + 1), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<14.14}", record.name), style),
            Span::styled(format!("{:>5}", record.score), style.add_modifier(Modifier::BOLD)),
        ]));
    }

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Leaderboard "),
    )
}

fn status(status: &StatusLine) -> Paragraph<'_> {
    let line = match status.message() {
        Some(message) => Line::from(Span::styled(
            message,
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]),
    };

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// A `width` x `height` rect centred in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
