use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use vkeys::app::AppState;
use vkeys::cli::Cli;
use vkeys::config::Config;
use vkeys::constants::{APP_NAME, FRAME_DURATION_MS, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};
use vkeys::error::{AppError, Result};
use vkeys::keyboard::KeyboardOptions;
use vkeys::ui::{self, input_handler::InputHandler};

/// Set when the terminal accepted enhanced key reporting, so it can be undone
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    cli.validate().map_err(AppError::Other)?;

    // Initialize logging if requested; the guard flushes on drop
    let _log_guard = match &cli.log_file {
        Some(log_file) => {
            let guard = init_logging(log_file)?;
            tracing::info!("=== Virtual keyboard starting ===");
            tracing::info!("Log file: {}", log_file);
            Some(guard)
        }
        None => None,
    };

    let app = initialize_app_state(&cli)?;

    // Check terminal size
    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        tracing::error!(
            "Terminal too small: {}x{} (minimum: {}x{})",
            width,
            height,
            MIN_TERMINAL_WIDTH,
            MIN_TERMINAL_HEIGHT
        );
        return Err(AppError::TerminalTooSmall);
    }
    tracing::debug!("Terminal size: {}x{}", width, height);

    // Setup terminal
    setup_terminal()?;
    tracing::debug!("Terminal setup completed");

    // Setup Ctrl-C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        tracing::info!("Ctrl-C received, shutting down");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Other(format!("Failed to set Ctrl-C handler: {}", e)))?;

    // Run the application
    let result = run_app(app, running).await;

    // Cleanup terminal
    cleanup_terminal()?;
    tracing::debug!("Terminal cleanup completed");

    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        Hide
    )?;

    // Caps Lock and bare modifier presses are only reported with enhanced keys
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
        KEYBOARD_ENHANCED.store(true, Ordering::SeqCst);
        tracing::debug!("Keyboard enhancement enabled");
    } else {
        tracing::info!("Terminal lacks enhanced key reporting; Caps Lock key passthrough disabled");
    }

    // Set panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

fn cleanup_terminal() -> Result<()> {
    if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        io::stdout(),
        Show,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    Ok(())
}

fn init_logging(log_file: &str) -> Result<WorkerGuard> {
    let path = Path::new(log_file);
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Other(format!("Invalid log file path: {}", log_file)))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // Only log from our crate
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(format!("{}=debug", APP_NAME)))
        .try_init()
        .map_err(|e| AppError::Other(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

fn initialize_app_state(cli: &Cli) -> Result<AppState> {
    tracing::debug!("Initializing application state");

    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path)),
        None => Config::load_default(),
    }
    .map_err(|e| {
        tracing::error!("Failed to load config: {:#}", e);
        AppError::Config(format!("{:#}", e))
    })?;

    let table = config.layout_table()?;
    let options = KeyboardOptions {
        language: cli.layout.clone().or_else(|| config.language.clone()),
        repeat_interval: cli
            .repeat_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.repeat_interval()),
    };
    tracing::debug!(
        "Keyboard options: language={:?}, repeat_interval={:?}",
        options.language,
        options.repeat_interval
    );

    AppState::new(table, options)
}

async fn run_app(mut app: AppState, running: Arc<AtomicBool>) -> Result<()> {
    // Create backend and terminal
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    run_event_loop(&mut terminal, &mut app, running).await?;

    tracing::info!("Virtual keyboard shutting down");
    Ok(())
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    running: Arc<AtomicBool>,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_DURATION_MS);

    while running.load(Ordering::SeqCst) && !app.should_quit {
        let frame_start = Instant::now();

        // Drain pending input events (non-blocking)
        while event::poll(Duration::from_millis(0))? {
            handle_event(app, event::read()?);
        }

        // Fire key repeats that came due since the last frame
        app.keyboard.tick(Instant::now());

        // Render UI
        terminal.draw(|f| {
            ui::layout::render(f, app);
        })?;

        // Sleep to maintain frame rate
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }

    Ok(())
}

fn handle_event(app: &mut AppState, ev: Event) {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            InputHandler::handle_key(app, key);
        }
        Event::Mouse(mouse) => {
            InputHandler::handle_mouse(app, mouse, Instant::now());
        }
        Event::FocusLost => {
            // A release outside the terminal is never reported
            app.keyboard.pointer_up();
        }
        _ => {}
    }
}
