use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{info, warn};

use marketdash::app::{App, AppOptions, StatusLevel, DEFAULT_LISTING_LIMIT};
use marketdash::config::{self, Config};
use marketdash::core::{
    Action, PointerBus, PointerEvent, Presentation, Viewport, DEFAULT_NARROW_BREAKPOINT,
};
use marketdash::infrastructure::listings::{DEFAULT_ENDPOINT, FETCH_FAILED_MESSAGE};
use marketdash::infrastructure::{HttpListingSource, RuntimeBridge, RuntimeCommand, RuntimeEvent};
use marketdash::logging;
use marketdash::ui;

#[derive(Debug, Parser)]
#[command(
    name = "marketdash",
    version,
    about = "Marketdash: a marketplace listings dashboard for the terminal"
)]
struct Args {
    /// Listing endpoint returning a JSON array of posts
    #[arg(long)]
    endpoint: Option<String>,

    /// Number of listings to request
    #[arg(long)]
    limit: Option<usize>,

    /// Navigation menu style
    #[arg(long, value_enum)]
    presentation: Option<Presentation>,

    /// Narrow viewport breakpoint in logical units (8 per terminal column)
    #[arg(long)]
    breakpoint: Option<u32>,

    /// Seed for synthesized prices and locations
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (defaults to the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Effective settings after merging CLI arguments over the config file
#[derive(Debug, Clone)]
struct Settings {
    endpoint: String,
    options: AppOptions,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_problem) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err.to_string())),
    };
    let settings = resolve_settings(&args, &config);

    if let Some(path) = settings.log_file.as_deref() {
        if let Err(err) = logging::init(path) {
            eprintln!("logging disabled: {err:#}");
        }
    }
    if let Some(problem) = config_problem.as_deref() {
        warn!(error = problem, "config ignored");
    }
    info!(
        endpoint = %settings.endpoint,
        limit = settings.options.listing_limit,
        presentation = settings.options.presentation.title(),
        "starting dashboard"
    );

    let source = HttpListingSource::new(settings.endpoint.clone())?;
    let runtime = RuntimeBridge::new(Box::new(source), settings.seed)?;

    let mut app = App::new(settings.options, PointerBus::new());
    if config_problem.is_some() {
        app.set_status("Config file ignored, see log", StatusLevel::Warn);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn resolve_settings(args: &Args, config: &Config) -> Settings {
    let endpoint = args
        .endpoint
        .as_deref()
        .or(config.endpoint.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string();

    let options = AppOptions {
        presentation: args
            .presentation
            .or(config.presentation)
            .unwrap_or_default(),
        listing_limit: args.limit.or(config.limit).unwrap_or(DEFAULT_LISTING_LIMIT),
        narrow_breakpoint: args
            .breakpoint
            .or(config.narrow_breakpoint)
            .unwrap_or(DEFAULT_NARROW_BREAKPOINT),
    };

    let log_file = args
        .log_file
        .clone()
        .or_else(|| config.log_file.as_deref().and_then(config::expand_path))
        .or_else(config::default_log_path);

    Settings {
        endpoint,
        options,
        seed: args.seed.or(config.seed),
        log_file,
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            info!("dashboard closed");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key, current_viewport()),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::ListingsLoaded { listings } => app.apply_listings(listings),
            RuntimeEvent::ListingsFailed { message } => app.apply_fetch_failure(message),
        }
    }

    if let Some(limit) = app.take_fetch_request() {
        if let Err(err) = runtime.send(RuntimeCommand::FetchListings { limit }) {
            warn!(error = %err, "could not queue listing fetch");
            app.apply_fetch_failure(FETCH_FAILED_MESSAGE);
        }
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(size) = terminal_rect() else {
        return;
    };
    match mouse.kind {
        MouseEventKind::Down(_) => {
            app.handle_mouse_press(PointerEvent::new(mouse.column, mouse.row), size)
        }
        MouseEventKind::ScrollDown if !app.help_open => {
            app.apply_action(Action::ScrollDown, Viewport::new(size.width))
        }
        MouseEventKind::ScrollUp if !app.help_open => {
            app.apply_action(Action::ScrollUp, Viewport::new(size.width))
        }
        _ => {}
    }
}

/// Viewport at the time of the call; unknown sizes count as wide
fn current_viewport() -> Viewport {
    Viewport::current().unwrap_or(Viewport::new(u16::MAX))
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
