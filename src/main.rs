use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

use snake_board::capabilities::StatusLine;
use snake_board::config::{GameConfig, RenderConfig};
use snake_board::game::Game;
use snake_board::input::{Command, InputHandler};
use snake_board::render::{self, Renderer};
use snake_board::store::FileStore;

/// How long to block on input while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);
const MAX_NAME_LEN: usize = 16;

#[derive(Parser)]
#[command(name = "snake-board")]
#[command(version, about = "Snake with a local high-score leaderboard")]
struct Cli {
    /// Pre-fill the player name
    #[arg(long, default_value = "")]
    name: String,

    /// Cells per side of the board
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(2..=100))]
    grid_size: u16,

    /// Directory that holds leaderboard.json
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[arg(long, default_value = "snake-board.log")]
    log_file: PathBuf,
}

type TerminalGame = Game<ThreadRng, FileStore, StatusLine>;

struct App {
    game: TerminalGame,
    input_handler: InputHandler,
    renderer: Renderer,
    name_input: String,
    should_quit: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    info!("Starting snake-board");

    let config = GameConfig::with_grid_size(cli.grid_size);
    let store = FileStore::new(&cli.data_dir);
    let game = Game::new(config, rand::thread_rng(), store, StatusLine::default());
    let mut app = App::new(game, cli.name);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;

    let result = app.run(&mut terminal);

    // Cleanup terminal
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        error!("Exiting with error: {:#}", e);
    } else {
        info!("Bye");
    }
    result
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

impl App {
    fn new(game: TerminalGame, name: String) -> Self {
        App {
            game,
            input_handler: InputHandler::new(),
            renderer: Renderer::new(RenderConfig::terminal()),
            name_input: name,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|frame| render::draw(frame, &self.game, self.renderer, &self.name_input))
                .context("Failed to draw frame")?;

            // Block on input no longer than the next tick is due.
            let timeout = self
                .game
                .time_until_tick(Instant::now())
                .unwrap_or(IDLE_POLL);
            if event::poll(timeout).context("Failed to poll events")? {
                if let Event::Key(key) = event::read().context("Failed to read event")? {
                    // Only process key press events, not release
                    if key.kind == KeyEventKind::Press {
                        let command = self.input_handler.handle_key_event(key, self.game.phase());
                        self.handle_command(command, Instant::now());
                    }
                }
            }

            self.game.update(Instant::now());

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Turn(direction) => {
                self.game.turn(direction);
            }
            Command::Type(c) => {
                if self.name_input.chars().count() < MAX_NAME_LEN {
                    self.name_input.push(c);
                }
                self.game.notifier_mut().clear();
            }
            Command::Backspace => {
                self.name_input.pop();
            }
            Command::Start => {
                if self.game.start(&self.name_input, now) {
                    self.game.notifier_mut().clear();
                }
            }
            Command::Acknowledge => {
                self.game.acknowledge();
                self.game.notifier_mut().clear();
            }
            Command::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Command::None => {}
        }
    }
}
