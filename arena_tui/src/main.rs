//! arena_tui - Terminal front-end for arena battles
//!
//! Pick a hero, pick an opponent, then fight turn by turn.

mod app;
mod settings;
mod ui;

use app::{App, Screen};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::{AppError, Settings};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` directives when given and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Log to the file named by `ARENA_LOG`; the terminal belongs to the UI
fn init_logging() {
    let Ok(path) = std::env::var("ARENA_LOG") else {
        return;
    };
    let path = if path.is_empty() { "arena.log".to_string() } else { path };
    match File::create(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!("Cannot open log file '{}': {}", path, e),
    }
}

fn main() -> Result<(), AppError> {
    init_logging();

    let settings_path = std::env::var("ARENA_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("arena.toml"));
    let settings = Settings::load_or_default(&settings_path)?;
    let game = settings.build_game()?;
    tracing::info!("Arena starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game, settings.seed);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match (app.screen, key.code, key.modifiers) {
                (_, KeyCode::Char('c'), KeyModifiers::CONTROL) | (_, KeyCode::Esc, _) => app.quit(),
                (Screen::Fight, KeyCode::Char('q'), _) => app.quit(),
                (Screen::Fight, KeyCode::Char('a'), _) | (Screen::Fight, KeyCode::Char(' '), _) => {
                    app.hit()
                }
                (Screen::Fight, KeyCode::Char('s'), _) => app.use_skill(),
                (Screen::Fight, KeyCode::Char('p'), _) => app.pass_turn(),
                (Screen::Fight, KeyCode::Char('e'), _) => app.end_fight(),
                (_, KeyCode::Up, _) => app.on_up(),
                (_, KeyCode::Down, _) | (_, KeyCode::Tab, _) => app.on_down(),
                (_, KeyCode::Left, _) => app.on_left(),
                (_, KeyCode::Right, _) => app.on_right(),
                (_, KeyCode::Enter, _) => app.on_enter(),
                (_, KeyCode::Backspace, _) => app.on_backspace(),
                (_, KeyCode::Char(c), _) => app.on_char(c),
                _ => {}
            }
        }
    }
    Ok(())
}
