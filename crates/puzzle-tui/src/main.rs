mod app;
mod board;
mod render;
mod settings;
mod theme;

use anyhow::{Context, Result};
use app::App;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use puzzle_core::catalog;
use puzzle_core::puzzles::switch::OptimalTable;
use puzzle_core::{ContentStore, DailyGame, DailyRng, DayIndex, PuzzleKind};
use settings::Settings;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Content directory used when neither the command line nor the settings name one
const DEFAULT_CONTENT_DIR: &str = "content";

#[derive(Parser, Debug)]
#[command(name = "daily-puzzle", version, about = "A new small puzzle every day")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a puzzle in the terminal (default)
    Play(PlayArgs),
    /// Generate a day's puzzle and print its minimum move count
    Solve {
        /// Day index, defaults to today
        #[arg(long)]
        day: Option<i64>,
        /// Puzzle kind instead of the scheduled one
        #[arg(long)]
        puzzle: Option<PuzzleKind>,
    },
    /// List the recent puzzles
    History,
    /// Write the optimal move table of the switch puzzle
    PrecomputeSwitch {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct PlayArgs {
    /// Day index, clamped to [1, today]
    #[arg(long)]
    day: Option<i64>,
    /// Puzzle kind instead of the scheduled one
    #[arg(long)]
    puzzle: Option<PuzzleKind>,
    /// Play a random puzzle instead of a daily one
    #[arg(long, conflicts_with = "day")]
    practice: bool,
    /// Directory of puzzle and help fragments
    #[arg(long)]
    content: Option<PathBuf>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => {
            if let Some(path) = &args.log_file {
                init_file_logging(path)?;
            }
            play(args)
        }
        Command::Solve { day, puzzle } => {
            init_stderr_logging();
            solve(day, puzzle)
        }
        Command::History => {
            init_stderr_logging();
            print_history();
            Ok(())
        }
        Command::PrecomputeSwitch { out } => {
            init_stderr_logging();
            precompute_switch(&out)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

/// The alternate screen owns the terminal while playing, so logs go to a file
fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load the precomputed switch table from the content directory, computing it
/// when the file is missing or malformed
fn load_switch_table(content: &ContentStore) -> Option<OptimalTable> {
    let path = content.root().join("switch").join("optimal.csv");
    match OptimalTable::load(&path) {
        Ok(table) => {
            debug!("loaded switch table from {}", path.display());
            Some(table)
        }
        Err(err) => {
            debug!("switch table unavailable ({}), computing it", err);
            match OptimalTable::compute() {
                Ok(table) => Some(table),
                Err(err) => {
                    warn!("could not compute switch table: {}", err);
                    None
                }
            }
        }
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let settings = Settings::load();
    let content_dir = args
        .content
        .clone()
        .or_else(|| settings.content_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));
    let content = ContentStore::new(content_dir);
    let switch_table = load_switch_table(&content);

    let today = DayIndex::today();
    let game = if args.practice {
        let kind = args.puzzle.unwrap_or_else(|| catalog::select(today).kind);
        DailyGame::generate(kind, None, &mut DailyRng::from_entropy(), switch_table.as_ref())?
    } else {
        let day = DayIndex::resolve(args.day, today);
        let kind = args.puzzle.unwrap_or_else(|| catalog::select(day).kind);
        DailyGame::generate(kind, Some(day), &mut DailyRng::new(day.seed()), switch_table.as_ref())?
    };

    let mut app = App::new(game, today, content, switch_table, settings);

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    result?;

    if let Some(report) = app.game.report() {
        println!("{}\n", report.title);
        println!("{}\n", report.message);
        println!("{}", report.share_text);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn solve(day: Option<i64>, puzzle: Option<PuzzleKind>) -> Result<()> {
    let day = DayIndex::resolve(day, DayIndex::today());
    let kind = puzzle.unwrap_or_else(|| catalog::select(day).kind);

    let start = Instant::now();
    let mut game = DailyGame::generate(kind, Some(day), &mut DailyRng::new(day.seed()), None)
        .with_context(|| format!("generating {} for day {}", kind, day))?;
    let optimum = game.session_mut().wait_optimum();
    let elapsed = start.elapsed();

    info!("solved {} for day {} in {:?}", kind, day, elapsed);
    println!("Day {}: {}", day, kind);
    println!("Minimum moves: {}", optimum);
    println!("Time: {} ms", elapsed.as_millis());
    Ok(())
}

fn print_history() {
    let today = DayIndex::today();
    let entries = catalog::history(today);
    if entries.is_empty() {
        println!("No earlier puzzles yet.");
        return;
    }
    for entry in entries {
        println!("{:>6}  {} {}", entry.day.to_string(), entry.accent.emoji(), entry.kind.name());
    }
}

fn precompute_switch(out: &Path) -> Result<()> {
    let start = Instant::now();
    let table = OptimalTable::compute().context("computing switch table")?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    table
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("wrote switch table to {} in {:?}", out.display(), start.elapsed());
    Ok(())
}
