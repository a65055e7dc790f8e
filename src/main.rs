mod audio;
mod config;
mod event;
mod game;
mod input;
mod logging;
mod ui;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info, warn};

use audio::AudioManager;
use config::Config;
use event::{Event, EventHandler};
use game::Game;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    if let Err(e) = logging::init(&Config::log_file_from_env()) {
        eprintln!("warning: {e:#}; running without a log file");
    }
    let config = Config::from_env();
    info!(?config, "starting");

    let audio = match AudioManager::init(&config.music_path) {
        Ok(audio) => audio,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "audio unavailable, continuing without music");
            AudioManager::silent()
        }
    };
    print_banner(audio.track_name());

    let (mut terminal, release_aware) = match setup_terminal() {
        Ok(setup) => setup,
        Err(e) => {
            error!(error = %format!("{e:#}"), "terminal setup failed");
            return Err(e);
        }
    };
    info!(release_aware, "terminal ready");

    let tick_rate = config.frame_interval;
    let mut game = Game::new(config, audio, release_aware);
    let result = run(&mut terminal, &mut game, tick_rate);

    // Restore terminal
    let restored = restore_terminal(&mut terminal, release_aware);
    game.audio.cleanup();

    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "game loop failed");
    }
    info!(left = game.score.left, right = game.score.right, "exiting");
    result.and(restored)
}

fn run(terminal: &mut Tui, game: &mut Game, tick_rate: Duration) -> Result<()> {
    let events = EventHandler::new(tick_rate);

    loop {
        if let Some(title) = game.take_title_change() {
            execute!(terminal.backend_mut(), SetTitle(title))?;
        }
        terminal
            .draw(|frame| ui::render(frame, game))
            .context("failed to draw frame")?;

        match events.next().context("input thread stopped")? {
            Event::Tick => game.on_tick(Instant::now()),
            Event::Key(key) => game.on_key(key, Instant::now()),
        }

        if game.should_quit {
            return Ok(());
        }
    }
}

fn print_banner(track: Option<&str>) {
    println!("Welcome to Pong!");
    println!("=== MAIN MENU ===");
    println!("Arrow keys to navigate");
    println!("ENTER to select");
    println!("ESC to quit");
    println!();
    println!("=== IN-GAME CONTROLS ===");
    println!("Vs AI: W/S moves your paddle");
    println!("Multiplayer: Player 1 (W/S), Player 2 (arrow keys)");
    println!("M: toggle music");
    println!("+/-: volume up/down");
    println!("ESC: back to menu");
    if let Some(name) = track {
        println!();
        println!("♪ Music: {name}");
    }
}

/// Raw mode, alternate screen and, where the terminal supports it, key
/// release reporting. Returns whether releases will be reported.
fn setup_terminal() -> Result<(Tui, bool)> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to enter the alternate screen");
    }

    let release_aware = supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).and_then(|mut terminal| {
        terminal.clear()?;
        Ok(terminal)
    });
    match terminal {
        Ok(terminal) => Ok((terminal, release_aware)),
        Err(e) => {
            let _ = leave(&mut io::stdout(), release_aware);
            Err(e).context("failed to create terminal")
        }
    }
}

fn restore_terminal(terminal: &mut Tui, release_aware: bool) -> Result<()> {
    leave(terminal.backend_mut(), release_aware)?;
    terminal.show_cursor()?;
    Ok(())
}

fn leave(out: &mut impl io::Write, release_aware: bool) -> Result<()> {
    if release_aware {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}
