//! Stateless UI rendering for the grid and status panel.

use crate::app::App;
use crate::input::BoardLayout;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_marks::{Cell, Session};

/// Colour of the first player's marks.
const PLAYER_ONE_COLOR: Color = Color::Rgb(255, 248, 220);
/// Colour of every other mark.
const PLAYER_TWO_COLOR: Color = Color::Rgb(100, 50, 40);
/// Fill behind each cell.
const CELL_BACKGROUND: Color = Color::Rgb(220, 160, 120);

/// Renders the game and returns where the grid landed.
pub fn draw<S>(frame: &mut Frame, app: &App<S>) -> BoardLayout {
    let area = frame.area();
    let session = app.session();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Board
            Constraint::Length(5), // Status
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "Strictly Marks - {}x{}",
        session.grid().rows(),
        session.grid().cols()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let layout = BoardLayout::centered_in(chunks[1], session.grid().rows(), session.grid().cols());
    draw_board(frame, chunks[1], session, layout, *app.cursor());

    draw_status(frame, chunks[2], session);
    layout
}

fn draw_board<S>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S>,
    layout: BoardLayout,
    cursor: usize,
) {
    for (index, cell) in session.grid().cells().iter().enumerate() {
        let position = index + 1;
        let Some(rect) = layout.cell_rect(position) else {
            continue;
        };
        // Cells that do not fit the terminal are left out.
        if rect.right() > area.right() || rect.bottom() > area.bottom() {
            continue;
        }
        draw_cell(frame, rect, session, cell, position, position == cursor);
    }
}

fn draw_cell<S>(
    frame: &mut Frame,
    rect: Rect,
    session: &Session<S>,
    cell: &Cell,
    position: usize,
    selected: bool,
) {
    let (text, style) = match cell {
        Cell::Empty => (
            position.to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Marked(symbol) => {
            let color = if symbol == session.player_a().symbol() {
                PLAYER_ONE_COLOR
            } else {
                PLAYER_TWO_COLOR
            };
            (
                symbol.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
    };

    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .style(Style::default().bg(CELL_BACKGROUND))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(paragraph, rect);
}

fn draw_status<S>(frame: &mut Frame, area: Rect, session: &Session<S>) {
    let status_color = if session.is_over() {
        Color::Green
    } else {
        Color::Yellow
    };

    let mut lines = vec![Line::from(Span::styled(
        session.status_line(),
        Style::default().fg(status_color).add_modifier(Modifier::BOLD),
    ))];

    if session.is_over() {
        lines.push(Line::from("Press r to restart, q to quit"));
    } else if session.awaiting_automated() {
        lines.push(Line::from(format!(
            "{} is thinking...",
            session.current_player().name()
        )));
    } else {
        lines.push(Line::from(
            "Arrows + Enter, 1-9, or click to move; q to quit",
        ));
    }

    if session.last_persist_failed() {
        lines.push(Line::from(Span::styled(
            "Game could not be saved",
            Style::default().fg(Color::Red),
        )));
    }

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
