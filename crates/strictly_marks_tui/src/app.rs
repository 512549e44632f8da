//! Front-end state and the terminal event loop.

use crate::input::{self, BoardLayout};
use crate::timer::AutomatedMoveTimer;
use crate::ui;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use derive_getters::Getters;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};
use strictly_marks::{MoveResult, RecordStore, Session};
use tracing::{debug, info, instrument};

/// Longest wait between redraws when nothing is pending.
pub const FRAME_TIME: Duration = Duration::from_millis(100);

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Everything the terminal front-end tracks around a session.
#[derive(Debug, Getters)]
pub struct App<S> {
    /// The game being played.
    session: Session<S>,
    /// 1-based position under the keyboard cursor.
    cursor: usize,
    /// Where the grid was last drawn.
    layout: BoardLayout,
    /// Pending automated move.
    timer: AutomatedMoveTimer,
    #[getter(skip)]
    rng: StdRng,
    /// Set once the user asked to leave.
    should_quit: bool,
}

impl<S: RecordStore> App<S> {
    /// Wraps a session, arming the timer if an automated player moves first.
    #[instrument(skip_all, fields(delay_ms = delay.as_millis() as u64))]
    pub fn new(session: Session<S>, delay: Duration, rng: StdRng, now: Instant) -> Self {
        let layout = BoardLayout::new(0, 0, session.grid().rows(), session.grid().cols());
        let mut app = Self {
            session,
            cursor: 1,
            layout,
            timer: AutomatedMoveTimer::new(delay),
            rng,
            should_quit: false,
        };
        app.sync_timer(now);
        app
    }

    /// Records where the grid was drawn, for mapping clicks.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    /// Handles one key press.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> Control {
        let grid = self.session.grid();
        let (rows, cols, total) = (grid.rows(), grid.cols(), grid.len());

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
                return Control::Quit;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.session.is_over() {
                    self.restart(now);
                } else {
                    debug!("Restart ignored while game is in progress");
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = input::move_cursor(self.cursor, key, rows, cols);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move(self.cursor, now);
            }
            other => {
                if let Some(position) = input::digit_position(other, total) {
                    self.cursor = position;
                    self.human_move(position, now);
                }
            }
        }
        Control::Continue
    }

    /// Handles a mouse event; a left click on a cell plays it.
    #[instrument(skip(self, now))]
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        match self.layout.position_at(mouse.column, mouse.row) {
            Some(position) => {
                self.cursor = position;
                self.human_move(position, now);
            }
            None => debug!("Click outside the grid"),
        }
    }

    /// Plays a position for the human whose turn it is.
    ///
    /// Ignored while an automated player is to move.
    #[instrument(skip(self, now))]
    pub fn human_move(&mut self, position: usize, now: Instant) -> MoveResult {
        if self.session.awaiting_automated() {
            debug!("Automated player to move, input ignored");
            return MoveResult::Ignored;
        }
        let result = self.session.apply_move(position);
        self.sync_timer(now);
        result
    }

    /// Lets the automated player move if its timer has run out.
    #[instrument(skip(self, now))]
    pub fn tick(&mut self, now: Instant) -> MoveResult {
        if !self.timer.fire(now) {
            return MoveResult::Ignored;
        }
        let result = self.session.play_automated(&mut self.rng);
        self.sync_timer(now);
        result
    }

    /// Starts the game over from the configured setup.
    #[instrument(skip(self, now))]
    pub fn restart(&mut self, now: Instant) {
        self.timer.disarm();
        self.session.restart();
        self.cursor = 1;
        self.sync_timer(now);
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.timer
            .remaining(now)
            .map_or(FRAME_TIME, |remaining| remaining.min(FRAME_TIME))
    }

    fn sync_timer(&mut self, now: Instant) {
        if self.session.awaiting_automated() {
            self.timer.arm(now);
        } else {
            self.timer.disarm();
        }
    }
}

/// Runs the event loop until the user quits.
#[instrument(skip_all)]
pub fn run<B: Backend, S: RecordStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> anyhow::Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    info!("Starting game loop");

    while !app.should_quit {
        let mut layout = app.layout;
        terminal.draw(|frame| layout = ui::draw(frame, app))?;
        app.set_layout(layout);

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                // Skip key release events (crossterm fires both press and release).
                Event::Key(KeyEvent { kind, .. }) if kind == KeyEventKind::Release => {}
                Event::Key(key) => {
                    app.handle_key(key.code, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }

    info!("Game loop finished");
    Ok(())
}
